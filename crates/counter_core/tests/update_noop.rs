use counter_core::{update, AppState, Msg, SessionState};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn input_before_model_list_is_ignored() {
    let state = AppState::new();
    assert_eq!(state.session(), SessionState::Loading);

    let (next, effects) = update(state.clone(), Msg::InputChanged("hello".to_string()));
    let (next, more) = update(next, Msg::CountClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty() && more.is_empty());
}
