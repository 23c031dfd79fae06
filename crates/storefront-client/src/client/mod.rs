//! HTTP client for the storefront REST API.

mod catalog;
mod orders;
mod reviews;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use storefront_core::AppConfig;

use crate::envelope::{ApiEnvelope, ErrorBody};
use crate::error::ApiError;
use crate::retry::retry_with_backoff;

pub use catalog::ProductQuery;

/// HTTP client for the storefront REST API.
///
/// Every request carries the configured timeout so a stalled backend surfaces
/// as [`ApiError::Http`] instead of hanging the caller. When a bearer token is
/// set it is attached as `Authorization: Bearer <token>` to every request.
///
/// Reads are retried on transient failures; writes are attempted once.
pub struct StorefrontClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) bearer_token: Option<String>,
    /// Maximum number of retry attempts after the first failure of a read.
    pub(super) max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(super) backoff_base_secs: u64,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// URL, or [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
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
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            bearer_token: None,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Attaches (or clears) the bearer token sent with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Builds an absolute endpoint URL from a `/api/...` path and query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the joined URL does not parse.
    pub(super) fn endpoint(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, ApiError> {
        self.endpoint_with(path, &[], query)
    }

    /// Like [`Self::endpoint`], with `segments` appended to `path` as
    /// percent-encoded path segments. Use it for any caller-supplied value
    /// (slugs, ids) so `/`, `?` or `#` cannot change the request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the joined URL does not parse.
    pub(super) fn endpoint_with(
        &self,
        path: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<String, ApiError> {
        let joined = format!("{}{path}", self.base_url);
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason,
        };
        let mut url = reqwest::Url::parse(&joined)
            .map_err(|e| invalid(format!("\"{joined}\" is not a valid URL: {e}")))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| invalid(format!("\"{joined}\" cannot take path segments")))?
                .pop_if_empty()
                .extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GETs `url` and unwraps the standard envelope, retrying transient failures.
    pub(super) async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let request = self
                .authorize(self.client.get(url))
                .header(reqwest::header::ACCEPT, "application/json");
            let response = request.send().await?;
            let body = read_success_body(response, url).await?;
            let envelope =
                serde_json::from_str::<ApiEnvelope<T>>(&body).map_err(|e| ApiError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })?;
            ensure_success(envelope, url)
        })
        .await
    }

    /// GETs `url` and decodes the body as-is, retrying transient failures.
    pub(super) async fn get_raw<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.authorize(self.client.get(url)).send().await?;
            let body = read_success_body(response, url).await?;
            serde_json::from_str::<T>(&body).map_err(|e| ApiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }

    /// POSTs `payload` as JSON exactly once and decodes the response body.
    pub(super) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &B,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.client.post(url))
            .json(payload)
            .send()
            .await?;
        let body = read_success_body(response, url).await?;
        serde_json::from_str::<T>(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Maps non-2xx responses to typed errors and returns the body text otherwise.
///
/// A rejection keeps the server's `message` field when the error body carries one.
async fn read_success_body(response: Response, url: &str) -> Result<String, ApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ApiError::RateLimited {
            url: url.to_owned(),
            retry_after_secs,
        });
    }

    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);
    Err(ApiError::Rejected {
        status: status.as_u16(),
        url: url.to_owned(),
        message,
    })
}

/// Treats a 2xx envelope with `"success": false` as a rejection.
fn ensure_success<T>(envelope: ApiEnvelope<T>, url: &str) -> Result<ApiEnvelope<T>, ApiError> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ApiError::Rejected {
            status: 200,
            url: url.to_owned(),
            message: envelope.message,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
