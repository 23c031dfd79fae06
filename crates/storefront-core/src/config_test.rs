use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.api_base_url, "https://truongtin-api.onrender.com");
    assert_eq!(cfg.address_base_url, "https://esgoo.net/api-tinhthanh");
    assert_eq!(cfg.data_dir.to_str(), Some("./.storefront"));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.user_agent, "storefront/0.1");
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert_eq!(cfg.success_redirect_delay_ms, 1500);
}

#[test]
fn api_base_url_override_drops_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_API_BASE_URL", "http://localhost:5000/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:5000");
}

#[test]
fn api_base_url_rejects_relative_value() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_API_BASE_URL", "localhost:5000/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_API_BASE_URL"),
        "expected InvalidEnvVar(STOREFRONT_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn address_base_url_rejects_non_http_scheme() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_ADDRESS_BASE_URL", "ftp://esgoo.net/api-tinhthanh");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_ADDRESS_BASE_URL"),
        "expected InvalidEnvVar(STOREFRONT_ADDRESS_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREFRONT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREFRONT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 5);
}

#[test]
fn max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_MAX_RETRIES"),
        "expected InvalidEnvVar(STOREFRONT_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn success_redirect_delay_override() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_SUCCESS_REDIRECT_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.success_redirect_delay_ms, 0);
}

#[test]
fn data_dir_override() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_DATA_DIR", "/var/lib/storefront");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir.to_str(), Some("/var/lib/storefront"));
}

#[test]
fn unrelated_variables_are_ignored() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_ENV", "staging");
    map.insert("STOREFRONT_UNKNOWN", "x");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://truongtin-api.onrender.com");
}
