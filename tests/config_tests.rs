// Config loading and validation tests

use loadpulse::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[upstream]
base_url = "https://api.example.test"
api_token = "secret-token"
request_timeout_secs = 10
recent_limit = 25

[analytics]
anomaly_z_threshold = 2.25
min_baseline_samples = 3

[monitoring]
poll_interval_secs = 30
stats_log_interval_secs = 60
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.upstream.base_url, "https://api.example.test");
    assert_eq!(config.upstream.api_token.as_deref(), Some("secret-token"));
    assert_eq!(config.upstream.recent_limit, 25);
    assert_eq!(config.analytics.anomaly_z_threshold, 2.25);
    assert_eq!(config.analytics.min_baseline_samples, 3);
    assert_eq!(config.monitoring.poll_interval_secs, 30);
}

#[test]
fn test_config_defaults_fill_optional_fields() {
    let minimal = r#"
[server]
port = 8081
host = "0.0.0.0"

[upstream]
base_url = "https://api.example.test"

[analytics]

[monitoring]
poll_interval_secs = 30
stats_log_interval_secs = 60
"#;
    let config = AppConfig::load_from_str(minimal).expect("load_from_str");
    assert!(config.upstream.api_token.is_none());
    assert_eq!(config.upstream.request_timeout_secs, 10);
    assert_eq!(config.upstream.recent_limit, 25);
    assert_eq!(config.analytics.anomaly_z_threshold, 2.25);
    assert_eq!(config.analytics.min_baseline_samples, 3);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_base_url() {
    let bad = VALID_CONFIG.replace("base_url = \"https://api.example.test\"", "base_url = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("upstream.base_url"));
}

#[test]
fn test_config_validation_rejects_recent_limit_zero() {
    let bad = VALID_CONFIG.replace("recent_limit = 25", "recent_limit = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("recent_limit"));
}

#[test]
fn test_config_validation_rejects_nonpositive_z_threshold() {
    let bad = VALID_CONFIG.replace("anomaly_z_threshold = 2.25", "anomaly_z_threshold = 0.0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("anomaly_z_threshold"));
}

#[test]
fn test_config_validation_rejects_min_baseline_samples_zero() {
    let bad = VALID_CONFIG.replace("min_baseline_samples = 3", "min_baseline_samples = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("min_baseline_samples"));
}

#[test]
fn test_config_validation_rejects_poll_interval_zero() {
    let bad = VALID_CONFIG.replace("poll_interval_secs = 30", "poll_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("poll_interval_secs"));
}

#[test]
fn test_config_rejects_missing_section() {
    let bad = VALID_CONFIG.replace("[monitoring]", "[ignored]");
    assert!(AppConfig::load_from_str(&bad).is_err());
}
