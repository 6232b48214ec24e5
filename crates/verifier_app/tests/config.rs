use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use verifier_app::platform::config::{load_config, parse_config, AppConfig, BackoffKind};
use verifier_app::platform::logging::LogDestination;
use verifier_core::presentation::ScreenClass;
use verifier_engine::Backoff;

#[test]
fn empty_document_uses_defaults() {
    let config = parse_config("()").unwrap();
    assert_eq!(config, AppConfig::default());

    let settings = config.client_settings(None).unwrap();
    assert_eq!(settings.endpoint.as_str(), "https://cms1.creatorsmela.com/verify");
    assert_eq!(settings.retry.max_attempts(), 4);
    assert_eq!(settings.retry.delay, Duration::from_secs(1));
    assert_eq!(settings.retry.backoff, Backoff::Constant);
}

#[test]
fn partial_sections_override_defaults() {
    let config = parse_config(
        r#"(
            service: (origin: "http://localhost:9000", request_timeout_ms: 500),
            retry: (max_retries: 5, delay_ms: 250, backoff: Exponential, max_delay_ms: 2000),
            display: (small_screen_below: 120, page_size: 20),
            logging: (destination: both, level: "debug"),
        )"#,
    )
    .unwrap();

    assert_eq!(config.retry.backoff, BackoffKind::Exponential);
    assert_eq!(config.logging.destination, LogDestination::Both);
    assert_eq!(config.logging.level, "debug");

    let settings = config.client_settings(None).unwrap();
    assert_eq!(settings.endpoint.as_str(), "http://localhost:9000/verify");
    assert_eq!(settings.request_timeout, Duration::from_millis(500));
    assert_eq!(settings.retry.max_attempts(), 6);
    assert_eq!(
        settings.retry.backoff,
        Backoff::Exponential {
            max_delay: Duration::from_secs(2)
        }
    );

    let presentation = config.display.presentation(110);
    assert_eq!(presentation.screen_class(), ScreenClass::Small);
    assert_eq!(presentation.page_size, 20);
}

#[test]
fn origin_flag_overrides_file() {
    let config = AppConfig::default();
    let settings = config.client_settings(Some("http://127.0.0.1:3000")).unwrap();
    assert_eq!(settings.endpoint.as_str(), "http://127.0.0.1:3000/verify");
    assert!(config.client_settings(Some("ftp://nope")).is_err());
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(parse_config("(retry: (retries: 3))").is_err());
}

#[test]
fn unsupported_page_size_falls_back() {
    let config = parse_config("(display: (page_size: 7))").unwrap();
    assert_eq!(config.display.presentation(200).page_size, 10);
}

#[test]
fn terminal_breakpoint_defaults_to_100_columns() {
    let display = AppConfig::default().display;
    assert_eq!(display.presentation(99).screen_class(), ScreenClass::Small);
    assert_eq!(display.presentation(100).screen_class(), ScreenClass::Regular);
}

#[test]
fn explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.ron");
    assert!(load_config(Some(&missing)).is_err());

    let present = temp.path().join("verifier.ron");
    fs::write(&present, "(retry: (max_retries: 0))").unwrap();
    let config = load_config(Some(&present)).unwrap();
    assert_eq!(config.retry.max_retries, 0);
}
