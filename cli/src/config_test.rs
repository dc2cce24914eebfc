use super::*;

#[test]
fn trailing_slashes_are_trimmed() {
    let cfg = CliConfig::new("http://localhost:8000/", 5).unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8000");
    assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
    assert_eq!(cfg.request_timeout, Duration::from_secs(REQUEST_TIMEOUT_SECS));
}

#[test]
fn url_joins_api_paths() {
    let cfg = CliConfig::new("https://askdb.example.test", DEFAULT_CONNECT_TIMEOUT_SECS).unwrap();
    assert_eq!(cfg.url("/api/sessions"), "https://askdb.example.test/api/sessions");
}

#[test]
fn default_base_url_is_valid() {
    assert!(CliConfig::new(DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS).is_ok());
}

#[test]
fn rejects_non_http_urls() {
    assert!(matches!(CliConfig::new("ftp://host", 5), Err(CliError::InvalidBaseUrl(_))));
    assert!(matches!(CliConfig::new("localhost:8000", 5), Err(CliError::InvalidBaseUrl(_))));
    assert!(matches!(CliConfig::new("http://", 5), Err(CliError::InvalidBaseUrl(_))));
}
