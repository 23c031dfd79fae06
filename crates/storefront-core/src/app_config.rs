use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Root of the storefront REST API, e.g. `https://truongtin-api.onrender.com`.
    pub api_base_url: String,
    /// Root of the province/district/ward lookup service.
    pub address_base_url: String,
    /// Directory backing the local key-value store (cart, token, user).
    pub data_dir: PathBuf,
    pub log_level: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Pause between a confirmed cash-on-delivery order and the success view.
    pub success_redirect_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("address_base_url", &self.address_base_url)
            .field("data_dir", &self.data_dir)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("success_redirect_delay_ms", &self.success_redirect_delay_ms)
            .finish()
    }
}
