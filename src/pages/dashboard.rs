//! Landing page behind the protected gate.
//!
//! The catalog entity screens (companies, branches, categories, products,
//! menus) are separate modules; this page only greets the signed-in user
//! and links into them.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Default landing route: identity summary and quick links.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();

    let greeting = move || {
        state
            .get()
            .user
            .map(|u| format!("Welcome back, {}", u.name))
            .unwrap_or_default()
    };
    let role = move || {
        state
            .get()
            .user
            .map(|u| u.role_name().to_owned())
            .unwrap_or_default()
    };
    let company = move || {
        state
            .get()
            .user
            .and_then(|u| u.company.map(|c| c.display().to_owned()))
    };
    let branch = move || {
        state
            .get()
            .user
            .and_then(|u| u.branch.map(|b| b.display().to_owned()))
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{greeting}</h1>
                <p class="dashboard-page__role">{role}</p>
            </header>

            <dl class="dashboard-page__facts">
                <Show when=move || company().is_some()>
                    <dt>"Company"</dt>
                    <dd>{move || company().unwrap_or_default()}</dd>
                </Show>
                <Show when=move || branch().is_some()>
                    <dt>"Branch"</dt>
                    <dd>{move || branch().unwrap_or_default()}</dd>
                </Show>
            </dl>

            <nav class="dashboard-page__links">
                <a class="card" href="/users">"Manage users"</a>
                <a class="card" href="/profile">"Your profile"</a>
            </nav>
        </div>
    }
}
