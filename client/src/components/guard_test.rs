use super::*;
use crate::state::session::SessionPhase;

#[test]
fn holds_while_the_session_is_still_loading() {
    let state = SessionState::default();
    assert!(!should_redirect(&state));
}

#[test]
fn redirects_once_settled_without_a_user() {
    let state = SessionState::signed_out();
    assert!(should_redirect(&state));
}

#[test]
fn never_redirects_an_authenticated_session() {
    let state = SessionState {
        phase: SessionPhase::Authenticated,
        username: Some("dana".to_owned()),
        role: Some("WAREHOUSE".to_owned()),
    };
    assert!(!should_redirect(&state));
}
