//! Account registration page.
//!
//! Registration never establishes a session: on success the visitor is sent
//! to the login view to sign in. Password length and confirmation are
//! checked locally before any network call.

use leptos::prelude::*;

use crate::app::AppStore;
use crate::net::types::RegisterRequest;
use crate::state::validate;

/// New-account form: name, email, role, password + confirmation.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<AppStore>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let role = RwSignal::new("staff".to_owned());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }

        // Local checks before spending a round trip.
        if let Err(err) =
            validate::password_confirmation(&password.get_untracked(), &confirm.get_untracked())
        {
            error.set(Some(err.user_message()));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            let navigate = navigate.clone();
            pending.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                let req = RegisterRequest {
                    name: name.get_untracked(),
                    email: email.get_untracked(),
                    password: password.get_untracked(),
                    role: role.get_untracked(),
                };
                match store.register(&req).await {
                    Ok(()) => {
                        navigate("/login", leptos_router::NavigateOptions::default());
                    }
                    Err(err) => error.set(Some(err.user_message())),
                }
                pending.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &store;
        }
    };

    view! {
        <div class="entry-page">
            <form class="entry-card" on:submit=submit>
                <h1>"Create account"</h1>

                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <label class="form-field">
                    "Name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    "Role"
                    <select
                        prop:value=move || role.get()
                        on:change=move |ev| role.set(event_target_value(&ev))
                    >
                        <option value="staff">"Staff"</option>
                        <option value="manager">"Manager"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                </label>
                <label class="form-field">
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    "Confirm password"
                    <input
                        type="password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                </label>

                <button type="submit" class="btn btn--primary" prop:disabled=move || pending.get()>
                    {move || if pending.get() { "Creating..." } else { "Create account" }}
                </button>

                <p class="entry-card__footer">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </form>
        </div>
    }
}
