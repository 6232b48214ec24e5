use verifier_core::{update, AppState, Msg};

#[test]
fn resize_to_same_width_is_noop() {
    let state = AppState::new();
    let width = state.presentation().viewport_width;
    let (mut next, effects) = update(state.clone(), Msg::ViewportResized { width });

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}

#[test]
fn dismissing_without_notice_leaves_state_clean() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::NoticeDismissed);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}
