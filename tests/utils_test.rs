use spotauthd::utils::{STATE_LENGTH, generate_state};

#[test]
fn test_generate_state_length() {
    assert_eq!(generate_state(STATE_LENGTH).len(), 16);
    assert_eq!(generate_state(32).len(), 32);
    assert_eq!(generate_state(0).len(), 0);
}

#[test]
fn test_generate_state_alphabet() {
    let state = generate_state(STATE_LENGTH);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_generate_state_is_not_constant() {
    // Two draws colliding over 62^16 possibilities would indicate a broken
    // random source.
    let a = generate_state(STATE_LENGTH);
    let b = generate_state(STATE_LENGTH);
    assert_ne!(a, b);
}
