//! Catalog reads: products, categories, search suggestions.

use storefront_core::{Category, Product};

use crate::envelope::Listing;
use crate::error::ApiError;

use super::StorefrontClient;

/// Suggestions are only requested once the shopper typed this many characters.
const MIN_SUGGEST_CHARS: usize = 2;

/// Filters for `GET /api/products`. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Category slug.
    pub category: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
}

impl ProductQuery {
    #[must_use]
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub(super) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_owned()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_owned()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

impl StorefrontClient {
    /// Lists products matching `query`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`]: non-2xx status or `"success": false`.
    /// - [`ApiError::Http`]: network failure or timeout after all retries.
    /// - [`ApiError::Deserialize`]: body does not match the product shape.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Listing<Product>, ApiError> {
        let url = self.endpoint("/api/products", &query.to_pairs())?;
        let envelope = self
            .get_envelope::<Vec<Product>>(&url, "product listing")
            .await?;
        tracing::debug!(
            url = %url,
            count = envelope.data.as_ref().map_or(0, Vec::len),
            "fetched product listing"
        );
        Ok(Listing {
            items: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// Fetches a single product by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with status 404 for unknown slugs, and
    /// the same errors as [`Self::list_products`] otherwise.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ApiError::InvalidInput("product slug is empty".to_owned()));
        }
        let url = self.endpoint_with("/api/products", &[slug], &[])?;
        let envelope = self
            .get_envelope::<Product>(&url, &format!("product {slug}"))
            .await?;
        envelope.data.ok_or_else(|| ApiError::Rejected {
            status: 404,
            url,
            message: Some(format!("product {slug} not found")),
        })
    }

    /// Lists every category.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint("/api/categories", &[])?;
        let envelope = self
            .get_envelope::<Vec<Category>>(&url, "category listing")
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Returns search-box suggestions for `term`.
    ///
    /// Terms shorter than two characters (after trimming) return an empty list
    /// without touching the network. A body that is not a JSON array of
    /// strings also yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`]: non-2xx status.
    /// - [`ApiError::Http`]: network failure or timeout after all retries.
    pub async fn search_suggestions(&self, term: &str) -> Result<Vec<String>, ApiError> {
        let term = term.trim();
        if term.chars().count() < MIN_SUGGEST_CHARS {
            return Ok(Vec::new());
        }
        let url = self.endpoint("/api/search/suggest", &[("q", term.to_owned())])?;
        let value = self
            .get_raw::<serde_json::Value>(&url, "search suggestions")
            .await?;
        Ok(serde_json::from_value::<Vec<String>>(value).unwrap_or_default())
    }
}
