use super::*;

#[test]
fn abort_error_is_a_cancellation() {
    assert_eq!(classify_failure("AbortError", "The user aborted a request."), TransportError::Aborted);
}

#[test]
fn other_errors_carry_the_browser_message() {
    assert_eq!(
        classify_failure("TypeError", "network error"),
        TransportError::Failed("network error".to_owned())
    );
}

#[test]
fn blank_message_falls_back_to_error_name() {
    assert_eq!(
        classify_failure("NetworkError", "  "),
        TransportError::Failed("NetworkError while reading response".to_owned())
    );
}
