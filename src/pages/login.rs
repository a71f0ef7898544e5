//! Login page.
//!
//! Failures leave the form populated and show an inline message; the
//! submit control is disabled while a call is outstanding, since store
//! operations are not deduplicated. A successful login flips the session
//! state and the public gate redirects — no navigation happens here.

use leptos::prelude::*;

use crate::app::AppStore;

/// Email + password sign-in form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<AppStore>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            pending.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                if let Err(err) = store
                    .login(&email.get_untracked(), &password.get_untracked())
                    .await
                {
                    error.set(Some(err.user_message()));
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
                <h1>"Catalog Console"</h1>
                <p class="entry-card__subtitle">"Sign in to manage your catalog"</p>

                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <label class="form-field">
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                <button type="submit" class="btn btn--primary" prop:disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>

                <p class="entry-card__footer">
                    "No account yet? " <a href="/register">"Register"</a>
                </p>
            </form>
        </div>
    }
}
