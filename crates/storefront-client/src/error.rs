use thiserror::Error;

/// Message shown to shoppers when the backend gives no usable explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Lỗi hệ thống, vui lòng thử lại sau.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    /// The backend answered with a non-2xx status or `"success": false`.
    #[error("request to {url} rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        url: String,
        message: Option<String>,
    },

    /// The address provider answered with a non-zero `error` code.
    #[error("address provider returned error code {code} for {url}")]
    Provider { url: String, code: i64 },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Text suitable for a transient notification: the server's own message
    /// when it sent one, a generic failure otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::InvalidInput(reason) => reason.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP status of a rejected request, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_message() {
        let err = ApiError::Rejected {
            status: 400,
            url: "http://api/api/orders".to_string(),
            message: Some("Sản phẩm đã hết hàng".to_string()),
        };
        assert_eq!(err.user_message(), "Sản phẩm đã hết hàng");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn user_message_falls_back_to_generic_text() {
        let blank = ApiError::Rejected {
            status: 500,
            url: "http://api/api/orders".to_string(),
            message: Some("   ".to_string()),
        };
        assert_eq!(blank.user_message(), GENERIC_FAILURE_MESSAGE);

        let provider = ApiError::Provider {
            url: "http://esgoo/1/0.htm".to_string(),
            code: 1,
        };
        assert_eq!(provider.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(provider.status(), None);
    }
}
