use super::*;
use crate::config::{DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS};

#[test]
fn backend_builds_from_default_config() {
    let config = CliConfig::new(DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS).unwrap();
    let backend = ReqwestBackend::new(config.clone()).unwrap();
    assert_eq!(backend.config, config);
}

#[test]
fn session_list_body_decodes() {
    let sessions: Vec<Session> =
        decode_body(r#"[{"id":"s1","title":"Revenue","created_at":"2024-05-01T12:00:00","updated_at":"2024-05-01T12:00:00"}]"#)
            .unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].title, "Revenue");
}

#[test]
fn table_list_body_decodes() {
    let info: DatabaseInfo = decode_body(
        r#"{"dialect":"sqlite","tables":[{"name":"orders","columns":[{"name":"id","type":"INTEGER"}],"row_count":3,"sample_rows":[]}],"raw_schema":""}"#,
    )
    .unwrap();
    assert_eq!(info.tables[0].columns[0].data_type, "INTEGER");
}

#[test]
fn malformed_body_is_a_decode_error() {
    let err = decode_body::<SessionDetail>("<html>").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
