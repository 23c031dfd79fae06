//! Province → district → ward lookups.
//!
//! The public provider (esgoo.net) exposes one endpoint per hierarchy level:
//!
//! ```text
//! GET {base}/1/0.htm            provinces of the country
//! GET {base}/2/{province}.htm   districts of a province
//! GET {base}/3/{district}.htm   wards of a district
//! ```
//!
//! Each answers `{ "error": 0, "error_text": "...", "data": [{ "id", "full_name", ... }] }`.
//! A non-zero `error` is a failed lookup even though the HTTP status is 200.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use storefront_core::{AppConfig, Region};

use crate::error::ApiError;
use crate::retry::retry_with_backoff;

/// Level of the address hierarchy, numbered as the provider numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressLevel {
    Province,
    District,
    Ward,
}

impl AddressLevel {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AddressLevel::Province => 1,
            AddressLevel::District => 2,
            AddressLevel::Ward => 3,
        }
    }
}

impl std::fmt::Display for AddressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressLevel::Province => write!(f, "province"),
            AddressLevel::District => write!(f, "district"),
            AddressLevel::Ward => write!(f, "ward"),
        }
    }
}

/// Source of the three-level delivery address hierarchy.
pub trait AddressDirectory: Send + Sync {
    /// Top-level regions.
    fn provinces(&self) -> impl Future<Output = Result<Vec<Region>, ApiError>> + Send;

    /// Districts belonging to `province_id`.
    fn districts(
        &self,
        province_id: &str,
    ) -> impl Future<Output = Result<Vec<Region>, ApiError>> + Send;

    /// Wards belonging to `district_id`.
    fn wards(
        &self,
        district_id: &str,
    ) -> impl Future<Output = Result<Vec<Region>, ApiError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ProviderBody {
    error: i64,
    #[serde(default)]
    data: Vec<Region>,
}

/// [`AddressDirectory`] backed by the esgoo.net lookup service.
pub struct EsgooDirectory {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl EsgooDirectory {
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` is not absolute, or
    /// [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ApiError> {
        reqwest::Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// # Errors
    ///
    /// See [`EsgooDirectory::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.address_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    fn level_url(&self, level: AddressLevel, parent_id: &str) -> String {
        format!("{}/{}/{parent_id}.htm", self.base_url, level.code())
    }

    async fn lookup(&self, level: AddressLevel, parent_id: &str) -> Result<Vec<Region>, ApiError> {
        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "cannot look up {level} entries without a parent id"
            )));
        }
        let url = self.level_url(level, parent_id);
        let url = url.as_str();
        let regions = retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Rejected {
                    status: status.as_u16(),
                    url: url.to_owned(),
                    message: None,
                });
            }
            let body = response.text().await?;
            let parsed =
                serde_json::from_str::<ProviderBody>(&body).map_err(|e| ApiError::Deserialize {
                    context: format!("{level} list from {url}"),
                    source: e,
                })?;
            if parsed.error != 0 {
                return Err(ApiError::Provider {
                    url: url.to_owned(),
                    code: parsed.error,
                });
            }
            Ok(parsed.data)
        })
        .await?;
        tracing::debug!(%level, parent_id, count = regions.len(), "address lookup complete");
        Ok(regions)
    }
}

impl AddressDirectory for EsgooDirectory {
    async fn provinces(&self) -> Result<Vec<Region>, ApiError> {
        self.lookup(AddressLevel::Province, "0").await
    }

    async fn districts(&self, province_id: &str) -> Result<Vec<Region>, ApiError> {
        self.lookup(AddressLevel::District, province_id).await
    }

    async fn wards(&self, district_id: &str) -> Result<Vec<Region>, ApiError> {
        self.lookup(AddressLevel::Ward, district_id).await
    }
}
