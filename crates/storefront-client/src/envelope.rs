//! Wire shapes of the storefront REST API.
//!
//! Every endpoint answers with `{ success, data, pagination?, message? }`.
//! `pagination` is only sent by list endpoints that were asked for a page, and
//! `message` is only sent on failures; both are modelled as `Option` so the
//! "field may be absent" contract survives deserialization.

use serde::Deserialize;

use storefront_core::order::deserialize_order_code;
use storefront_core::OrderPlacement;

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default = "one")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: Option<u64>,
}

fn one() -> u32 {
    1
}

impl Pagination {
    /// Whether a page after `page` exists.
    #[must_use]
    pub fn has_next(&self, page: u32) -> bool {
        page < self.total_pages
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// `None` when the backend did not paginate the response.
    pub pagination: Option<Pagination>,
}

/// Body of a `POST /api/orders` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderCreatedBody {
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_order_code")]
    pub order_code: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl OrderCreatedBody {
    /// Presence of a non-empty `checkoutUrl` selects the redirect flow.
    pub(crate) fn into_placement(self) -> OrderPlacement {
        match self.checkout_url.filter(|url| !url.trim().is_empty()) {
            Some(checkout_url) => OrderPlacement::Gateway {
                order_code: self.order_code,
                checkout_url,
            },
            None => OrderPlacement::Confirmed {
                order_code: self.order_code,
            },
        }
    }
}

/// Minimal error body; any JSON object with a `message` field.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_pagination() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2]}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2]));
        assert!(env.pagination.is_none());
        assert!(env.message.is_none());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NoDefault {
        code: String,
    }

    fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> ApiEnvelope<T> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn envelope_data_needs_no_default_impl() {
        let failed: ApiEnvelope<NoDefault> =
            decode(r#"{"success":false,"message":"Không tìm thấy"}"#);
        assert!(failed.data.is_none());
        assert_eq!(failed.message.as_deref(), Some("Không tìm thấy"));

        let ok: ApiEnvelope<NoDefault> = decode(r#"{"success":true,"data":{"code":"DH1"}}"#);
        assert_eq!(
            ok.data,
            Some(NoDefault {
                code: "DH1".to_string()
            })
        );
    }

    #[test]
    fn envelope_with_pagination() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success":true,"data":[],"pagination":{"currentPage":2,"totalPages":5,"totalItems":58}}"#,
        )
        .unwrap();
        let pagination = env.pagination.unwrap();
        assert_eq!(pagination.current_page, Some(2));
        assert!(pagination.has_next(2));
        assert!(!pagination.has_next(5));
        assert_eq!(pagination.total_items, Some(58));
    }

    #[test]
    fn order_body_with_checkout_url_is_gateway() {
        let body: OrderCreatedBody = serde_json::from_str(
            r#"{"success":true,"orderCode":1733120001,"checkoutUrl":"https://pay.payos.vn/web/x"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_placement(),
            OrderPlacement::Gateway {
                order_code: Some("1733120001".to_string()),
                checkout_url: "https://pay.payos.vn/web/x".to_string(),
            }
        );
    }

    #[test]
    fn order_body_without_checkout_url_is_confirmed() {
        let body: OrderCreatedBody =
            serde_json::from_str(r#"{"success":true,"orderCode":"DH001"}"#).unwrap();
        assert_eq!(
            body.into_placement(),
            OrderPlacement::Confirmed {
                order_code: Some("DH001".to_string())
            }
        );
    }

    #[test]
    fn blank_checkout_url_counts_as_absent() {
        let body: OrderCreatedBody =
            serde_json::from_str(r#"{"success":true,"orderCode":"DH002","checkoutUrl":""}"#)
                .unwrap();
        assert!(matches!(
            body.into_placement(),
            OrderPlacement::Confirmed { .. }
        ));
    }
}
