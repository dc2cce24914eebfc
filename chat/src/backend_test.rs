use super::*;

#[test]
fn detail_comes_from_json_envelope() {
    assert_eq!(error_detail("Not Found", r#"{"detail":"Session not found"}"#), "Session not found");
}

#[test]
fn non_string_detail_is_rendered_as_json() {
    let body = r#"{"detail":[{"loc":["body","message"],"msg":"field required"}]}"#;
    let detail = error_detail("Unprocessable Entity", body);
    assert!(detail.contains("field required"));
}

#[test]
fn missing_or_blank_detail_falls_back_to_status_text() {
    assert_eq!(error_detail("Internal Server Error", "<html>oops</html>"), "Internal Server Error");
    assert_eq!(error_detail("Bad Gateway", "{}"), "Bad Gateway");
    assert_eq!(error_detail("Bad Gateway", r#"{"detail":"  "}"#), "Bad Gateway");
    assert_eq!(error_detail("", ""), "request failed");
}

#[test]
fn status_error_keeps_code_and_detail() {
    let err = ApiError::from_response(404, "Not Found", r#"{"detail":"Session not found"}"#);
    assert_eq!(err, ApiError::Status { status: 404, detail: "Session not found".to_owned() });
    assert_eq!(err.user_message(), "Session not found");
    assert_eq!(err.to_string(), "Session not found (HTTP 404)");
}

#[test]
fn transport_errors_convert() {
    assert_eq!(ApiError::from(TransportError::Aborted), ApiError::Aborted);
    assert_eq!(
        ApiError::from(TransportError::Failed("reset".to_owned())),
        ApiError::Transport("reset".to_owned())
    );
}

#[test]
fn endpoint_paths() {
    assert_eq!(session_path("abc"), "/api/sessions/abc");
    assert_eq!(chat_path("abc"), "/api/chat/abc");
}

#[test]
fn request_bodies_serialize() {
    assert_eq!(
        serde_json::to_string(&ChatRequest { message: "hi" }).unwrap(),
        r#"{"message":"hi"}"#
    );
    assert_eq!(
        serde_json::to_string(&NewSession { title: crate::model::DEFAULT_SESSION_TITLE }).unwrap(),
        r#"{"title":"新对话"}"#
    );
}
