//! Profile page: own-profile updates and password changes.

use leptos::prelude::*;

use crate::app::AppStore;
use crate::net::types::ProfileUpdate;
use crate::state::session::SessionState;
use crate::state::validate;

/// Profile screen with two independent forms.
#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="profile-page">
            <h1>"Your profile"</h1>
            <ProfileForm/>
            <PasswordForm/>
        </div>
    }
}

/// Name/email patch form, prefilled from the current session user.
#[component]
fn ProfileForm() -> impl IntoView {
    let store = expect_context::<AppStore>();
    let state = expect_context::<RwSignal<SessionState>>();

    let current = state.get_untracked().user;
    let name = RwSignal::new(current.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = RwSignal::new(current.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);
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
            saved.set(false);
            leptos::task::spawn_local(async move {
                let patch = ProfileUpdate {
                    name: Some(name.get_untracked()),
                    email: Some(email.get_untracked()),
                };
                match store.update_profile(&patch).await {
                    Ok(_) => saved.set(true),
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
        <form class="profile-page__card" on:submit=submit>
            <h2>"Details"</h2>

            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || saved.get()>
                <p class="form-success">"Profile updated."</p>
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

            <button type="submit" class="btn btn--primary" prop:disabled=move || pending.get()>
                {move || if pending.get() { "Saving..." } else { "Save changes" }}
            </button>
        </form>
    }
}

/// Old/new/confirm password form. Length and confirmation are checked
/// locally before the round trip; the old-password mismatch message comes
/// from the backend.
#[component]
fn PasswordForm() -> impl IntoView {
    let store = expect_context::<AppStore>();

    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let changed = RwSignal::new(false);
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }

        if let Err(err) = validate::password_confirmation(
            &new_password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            error.set(Some(err.user_message()));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            pending.set(true);
            error.set(None);
            changed.set(false);
            leptos::task::spawn_local(async move {
                match store
                    .change_password(&old_password.get_untracked(), &new_password.get_untracked())
                    .await
                {
                    Ok(()) => {
                        changed.set(true);
                        old_password.set(String::new());
                        new_password.set(String::new());
                        confirm.set(String::new());
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
        <form class="profile-page__card" on:submit=submit>
            <h2>"Change password"</h2>

            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || changed.get()>
                <p class="form-success">"Password changed."</p>
            </Show>

            <label class="form-field">
                "Current password"
                <input
                    type="password"
                    prop:value=move || old_password.get()
                    on:input=move |ev| old_password.set(event_target_value(&ev))
                />
            </label>
            <label class="form-field">
                "New password"
                <input
                    type="password"
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
            </label>
            <label class="form-field">
                "Confirm new password"
                <input
                    type="password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
            </label>

            <button type="submit" class="btn btn--primary" prop:disabled=move || pending.get()>
                {move || if pending.get() { "Changing..." } else { "Change password" }}
            </button>
        </form>
    }
}
