//! Product reviews: public reads, signed-in writes.

use storefront_core::{NewReview, Review};

use crate::envelope::ApiEnvelope;
use crate::error::ApiError;

use super::StorefrontClient;

const RATING_REQUIRED: &str = "Vui lòng chọn số sao để đánh giá!";
const LOGIN_REQUIRED: &str = "Đăng nhập để chia sẻ trải nghiệm của bạn";

impl StorefrontClient {
    /// Lists the published reviews of a product, newest first as the backend
    /// orders them.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_reviews(&self, product_id: i64) -> Result<Vec<Review>, ApiError> {
        let id = product_id.to_string();
        let url = self.endpoint_with("/api/products", &[id.as_str(), "reviews"], &[])?;
        let envelope = self
            .get_envelope::<Vec<Review>>(&url, &format!("reviews of product {product_id}"))
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Posts a review as the signed-in shopper. Sent once, never retried.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidInput`]: rating outside 1..=5, or no bearer token
    ///   is set; no request is sent.
    /// - [`ApiError::Rejected`]: non-2xx status (401 once the session has
    ///   expired) or `"success": false`.
    /// - [`ApiError::Http`] / [`ApiError::Deserialize`]: transport or shape failures.
    pub async fn submit_review(&self, review: &NewReview) -> Result<Review, ApiError> {
        if !review.has_valid_rating() {
            return Err(ApiError::InvalidInput(RATING_REQUIRED.to_owned()));
        }
        if self.bearer_token.is_none() {
            return Err(ApiError::InvalidInput(LOGIN_REQUIRED.to_owned()));
        }
        let url = self.endpoint("/api/reviews", &[])?;
        let envelope: ApiEnvelope<Review> =
            self.post_json(&url, review, "review submission").await?;
        match envelope.data {
            Some(created) if envelope.success => {
                tracing::info!(
                    product_id = review.product_id,
                    review_id = created.id,
                    "review posted"
                );
                Ok(created)
            }
            _ => Err(ApiError::Rejected {
                status: 200,
                url,
                message: envelope.message,
            }),
        }
    }
}
