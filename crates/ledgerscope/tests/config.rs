use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use ledgerscope::{AppConfig, ConfigError, LogFormat};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_documented_values() {
    let config = AppConfig::default();

    assert_eq!(config.server.bind, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.server.max_upload_bytes, 10_485_760);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let config = AppConfig::from_toml_str(
        r#"
        [server]
        bind = "127.0.0.1:8080"

        [logging]
        format = "pretty"
        "#,
    )
    .expect("valid config");

    assert_eq!(config.server.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    assert_eq!(config.server.max_upload_bytes, 10_485_760);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn unknown_log_format_is_a_parse_error() {
    let err = AppConfig::from_toml_str("[logging]\nformat = \"xml\"").expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn environment_overrides_file_values() {
    let mut config = AppConfig::default();
    config
        .apply_overrides(lookup(&[
            ("LEDGERSCOPE_BIND", "127.0.0.1:9000"),
            ("LEDGERSCOPE_MAX_UPLOAD_BYTES", "2048"),
            ("LEDGERSCOPE_LOG_FORMAT", "Pretty"),
            ("LEDGERSCOPE_LOG_FILTER", "ledgerscope=debug"),
        ]))
        .expect("valid overrides");

    assert_eq!(config.server.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.server.max_upload_bytes, 2048);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.filter, "ledgerscope=debug");
}

#[test]
fn invalid_override_names_the_variable() {
    let mut config = AppConfig::default();
    let err = config
        .apply_overrides(lookup(&[("LEDGERSCOPE_MAX_UPLOAD_BYTES", "lots")]))
        .expect_err("must fail");

    match err {
        ConfigError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "LEDGERSCOPE_MAX_UPLOAD_BYTES");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = AppConfig::from_file(Path::new("does/not/exist.toml")).expect_err("must fail");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn config_file_is_read_from_disk() {
    let path = std::env::temp_dir().join(format!("ledgerscope-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[server]\nmax_upload_bytes = 512\n").expect("write config");

    let config = AppConfig::from_file(&path).expect("valid config");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.server.max_upload_bytes, 512);
}
