//! Order creation and customer self-service tracking.

use serde::Serialize;

use storefront_core::{OrderPlacement, OrderRequest, TrackedOrder};

use crate::envelope::{ApiEnvelope, OrderCreatedBody};
use crate::error::ApiError;

use super::StorefrontClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackRequest<'a> {
    order_code: &'a str,
    phone: &'a str,
}

impl StorefrontClient {
    /// Submits an order. Never retried: a duplicate POST could place the
    /// order twice.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`]: non-2xx status or `"success": false`; carries
    ///   the server's `message` when present.
    /// - [`ApiError::Http`]: network failure or timeout.
    /// - [`ApiError::Deserialize`]: the response body is not JSON.
    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderPlacement, ApiError> {
        let url = self.endpoint("/api/orders", &[])?;
        tracing::info!(
            payment_method = %order.payment_method,
            items = order.items.len(),
            "submitting order"
        );
        let body: OrderCreatedBody = self.post_json(&url, order, "order creation").await?;
        if !body.success {
            return Err(ApiError::Rejected {
                status: 200,
                url,
                message: body.message,
            });
        }
        let placement = body.into_placement();
        tracing::info!(
            order_code = placement.order_code().unwrap_or("<none>"),
            gateway = matches!(placement, OrderPlacement::Gateway { .. }),
            "order accepted"
        );
        Ok(placement)
    }

    /// Looks up an order by its code and the phone number it was placed with.
    ///
    /// Both inputs are trimmed; an empty value is rejected before any request.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidInput`]: order code or phone is blank.
    /// - [`ApiError::Rejected`]: the backend did not find a matching order.
    /// - [`ApiError::Http`] / [`ApiError::Deserialize`]: transport or shape failures.
    pub async fn track_order(
        &self,
        order_code: &str,
        phone: &str,
    ) -> Result<TrackedOrder, ApiError> {
        let order_code = order_code.trim();
        let phone = phone.trim();
        if order_code.is_empty() || phone.is_empty() {
            return Err(ApiError::InvalidInput(
                "Vui lòng nhập đầy đủ Mã đơn và Số điện thoại!".to_owned(),
            ));
        }
        let url = self.endpoint("/api/orders/track", &[])?;
        let envelope: ApiEnvelope<TrackedOrder> = self
            .post_json(&url, &TrackRequest { order_code, phone }, "order tracking")
            .await?;
        match envelope.data {
            Some(order) if envelope.success => Ok(order),
            _ => Err(ApiError::Rejected {
                status: 200,
                url,
                message: envelope.message,
            }),
        }
    }
}
