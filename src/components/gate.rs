//! Route gates deciding what may render for the current session state.
//!
//! Both gates hold a loading view until hydration has resolved — admitting
//! or redirecting on `Idle`/`Hydrating` is what causes a flash of the wrong
//! screen on reload. The accept/redirect predicate is the only difference
//! between them, so it lives in a pair of pure decision functions.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::chrome::AppChrome;
use crate::state::session::{SessionState, SessionStatus};

/// What a gate does with its children for a given session status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Hydration unresolved; show a loading view.
    Wait,
    /// Render the gated content.
    Admit,
    /// Send the visitor to the gate's fallback route.
    Redirect,
}

/// Decision for screens that require an authenticated session.
#[must_use]
pub fn protected_decision(status: SessionStatus) -> GateDecision {
    match status {
        SessionStatus::Idle | SessionStatus::Hydrating => GateDecision::Wait,
        SessionStatus::Authenticated => GateDecision::Admit,
        SessionStatus::Unauthenticated => GateDecision::Redirect,
    }
}

/// Decision for entry screens that only make sense signed out.
#[must_use]
pub fn public_decision(status: SessionStatus) -> GateDecision {
    match status {
        SessionStatus::Idle | SessionStatus::Hydrating => GateDecision::Wait,
        SessionStatus::Authenticated => GateDecision::Redirect,
        SessionStatus::Unauthenticated => GateDecision::Admit,
    }
}

/// Gate for authenticated screens. Wraps admitted children in the
/// application chrome; redirects to the login entry with the history entry
/// replaced, so back-navigation cannot return to a stale protected view.
#[component]
pub fn ProtectedGate(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if protected_decision(state.get().status) == GateDecision::Redirect {
            navigate("/login", NavigateOptions { replace: true, ..Default::default() });
        }
    });

    view! {
        {move || match protected_decision(state.get().status) {
            GateDecision::Admit => {
                let kids = children.clone();
                view! { <AppChrome>{kids()}</AppChrome> }.into_any()
            }
            GateDecision::Wait | GateDecision::Redirect => gate_loading().into_any(),
        }}
    }
}

/// Gate for the public entry screens (login, register). Redirects an
/// already-authenticated visitor to the default landing route.
#[component]
pub fn PublicGate(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if public_decision(state.get().status) == GateDecision::Redirect {
            navigate("/", NavigateOptions { replace: true, ..Default::default() });
        }
    });

    view! {
        {move || match public_decision(state.get().status) {
            GateDecision::Admit => children().into_any(),
            GateDecision::Wait | GateDecision::Redirect => gate_loading().into_any(),
        }}
    }
}

fn gate_loading() -> impl IntoView {
    view! {
        <div class="gate-loading">
            <span class="gate-loading__spinner"></span>
            <p>"Checking session..."</p>
        </div>
    }
}
