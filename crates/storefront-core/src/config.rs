use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        validate_base_url(&raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        })
    };

    let api_base_url = parse_base_url(
        "STOREFRONT_API_BASE_URL",
        "https://truongtin-api.onrender.com",
    )?;
    let address_base_url = parse_base_url(
        "STOREFRONT_ADDRESS_BASE_URL",
        "https://esgoo.net/api-tinhthanh",
    )?;
    let data_dir = PathBuf::from(or_default("STOREFRONT_DATA_DIR", "./.storefront"));
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1");

    let request_timeout_secs = parse_u64("STOREFRONT_REQUEST_TIMEOUT_SECS", "15")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let max_retries = parse_u32("STOREFRONT_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("STOREFRONT_RETRY_BACKOFF_BASE_SECS", "1")?;
    let success_redirect_delay_ms = parse_u64("STOREFRONT_SUCCESS_REDIRECT_DELAY_MS", "1500")?;

    Ok(AppConfig {
        api_base_url,
        address_base_url,
        data_dir,
        log_level,
        user_agent,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
        success_redirect_delay_ms,
    })
}

/// Checks that `raw` is an absolute `http(s)` URL and strips any trailing slash
/// so callers can append paths with a leading `/`.
fn validate_base_url(raw: &str) -> Result<String, String> {
    let url = reqwest::Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme \"{}\"", url.scheme()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
