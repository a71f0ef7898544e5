//! Root application component with routing and context providers.

use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::gate::{ProtectedGate, PublicGate};
use crate::net::api::RestAuthApi;
use crate::net::transport::{CredentialCell, Transport};
use crate::pages::{
    dashboard::DashboardPage, login::LoginPage, profile::ProfilePage, register::RegisterPage,
    users::UsersPage,
};
use crate::state::session::SessionStore;
use crate::state::storage::BrowserStorage;

/// The one concrete session store the application runs on.
pub type AppStore = SessionStore<RestAuthApi, BrowserStorage>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session store exactly once — credential cell shared between
/// the transport (which reads it on every request) and the store (its only
/// writer) — and provides it by context, alongside its reactive state for
/// gates and read-only consumers. Hydration is kicked off here and resolves
/// before any gate emits a non-loading render.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let credential: CredentialCell = Arc::new(Mutex::new(None));
    let transport = Transport::new("", credential.clone());
    let store = SessionStore::new(RestAuthApi::new(transport), BrowserStorage, credential);

    provide_context(store.state());
    provide_context(store.clone());

    #[cfg(feature = "hydrate")]
    {
        let store = store.clone();
        leptos::task::spawn_local(async move {
            store.hydrate().await;
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = &store;
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/catalog-console.css"/>
        <Title text="Catalog Console"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicGate><LoginPage/></PublicGate> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <PublicGate><RegisterPage/></PublicGate> }
                />
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedGate><DashboardPage/></ProtectedGate> }
                />
                <Route
                    path=StaticSegment("users")
                    view=|| view! { <ProtectedGate><UsersPage/></ProtectedGate> }
                />
                <Route
                    path=StaticSegment("profile")
                    view=|| view! { <ProtectedGate><ProfilePage/></ProtectedGate> }
                />
            </Routes>
        </Router>
    }
}
