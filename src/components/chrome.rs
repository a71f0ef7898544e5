//! Application chrome wrapping every protected screen.

use leptos::prelude::*;

use crate::app::AppStore;
use crate::state::session::SessionState;

/// Header with brand, navigation, current identity, and sign-out.
///
/// Sign-out drives `logout()`; the protected gate reacts to the resulting
/// state change and redirects, so no navigation happens here.
#[component]
pub fn AppChrome(children: Children) -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let store = expect_context::<AppStore>();

    let user_name = move || state.get().user.map(|u| u.name).unwrap_or_default();
    let role_name = move || {
        state
            .get()
            .user
            .map(|u| u.role_name().to_owned())
            .unwrap_or_default()
    };

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                store.logout().await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &store;
        }
    };

    view! {
        <div class="chrome">
            <header class="chrome__header">
                <a href="/" class="chrome__brand">"Catalog Console"</a>
                <nav class="chrome__nav">
                    <a href="/">"Dashboard"</a>
                    <a href="/users">"Users"</a>
                    <a href="/profile">"Profile"</a>
                </nav>
                <span class="chrome__spacer"></span>
                <span class="chrome__identity">
                    <span class="chrome__user">{user_name}</span>
                    <span class="chrome__role">{role_name}</span>
                </span>
                <button class="btn chrome__sign-out" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>
            <main class="chrome__content">{children()}</main>
        </div>
    }
}
