use super::*;

// =============================================================
// Protected gate
// =============================================================

#[test]
fn protected_gate_waits_until_hydration_resolves() {
    assert_eq!(protected_decision(SessionStatus::Idle), GateDecision::Wait);
    assert_eq!(protected_decision(SessionStatus::Hydrating), GateDecision::Wait);
}

#[test]
fn protected_gate_admits_only_authenticated_sessions() {
    assert_eq!(protected_decision(SessionStatus::Authenticated), GateDecision::Admit);
}

#[test]
fn protected_gate_redirects_unauthenticated_visitors() {
    assert_eq!(protected_decision(SessionStatus::Unauthenticated), GateDecision::Redirect);
}

// =============================================================
// Public gate
// =============================================================

#[test]
fn public_gate_waits_until_hydration_resolves() {
    assert_eq!(public_decision(SessionStatus::Idle), GateDecision::Wait);
    assert_eq!(public_decision(SessionStatus::Hydrating), GateDecision::Wait);
}

#[test]
fn public_gate_redirects_iff_authenticated() {
    assert_eq!(public_decision(SessionStatus::Authenticated), GateDecision::Redirect);
    assert_eq!(public_decision(SessionStatus::Unauthenticated), GateDecision::Admit);
}
