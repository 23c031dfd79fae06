//! Retry with exponential backoff for idempotent storefront reads.
//!
//! Only `GET` requests go through [`retry_with_backoff`]. Order creation is a
//! `POST` with side effects on stock, so it is attempted exactly once and any
//! failure is handed back to the shopper, who retries manually.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ApiError::RateLimited`]: HTTP 429.
/// - [`ApiError::Http`]: timeout or connection failure.
/// - [`ApiError::Rejected`] with a 5xx status.
///
/// Everything else (4xx rejections, malformed bodies, provider error codes,
/// bad input) is returned immediately.
pub(crate) fn is_retriable(err: &ApiError) -> bool {
    match err {
        ApiError::RateLimited { .. } => true,
        ApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ApiError::Rejected { status, .. } => *status >= 500,
        ApiError::Deserialize { .. }
        | ApiError::Provider { .. }
        | ApiError::InvalidBaseUrl { .. }
        | ApiError::InvalidInput(_) => false,
    }
}

/// Upper bound on any single wait between attempts.
const MAX_DELAY_MS: u64 = 60_000;

/// Wait before retry number `attempt` (1-based) after `err`.
///
/// `backoff_base_secs * 2^(attempt-1)` seconds with ±25 % jitter. A 429 waits
/// at least as long as its `Retry-After`. Never longer than [`MAX_DELAY_MS`].
pub(crate) fn backoff_delay(err: &ApiError, attempt: u32, backoff_base_secs: u64) -> Duration {
    let base_ms = backoff_base_secs
        .saturating_mul(1_000)
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10))
        .min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (base_ms as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    let floor_ms = match err {
        ApiError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1_000),
        _ => 0,
    };
    Duration::from_millis(jittered.max(floor_ms).min(MAX_DELAY_MS))
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// See [`backoff_delay`] for the wait between attempts. With
/// `max_retries = 2` the operation runs at most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = backoff_delay(&err, attempt, backoff_base_secs);
                #[allow(clippy::cast_possible_truncation)]
                let delay_ms = delay.as_millis() as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient storefront API error; retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
