use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Image shown for products that were uploaded without one.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200";

/// Unit label used when a product has none configured.
pub const DEFAULT_UNIT: &str = "Cái";

/// One purchasable line in the shopper's cart.
///
/// Serialized in the backend's camelCase shape because the persisted list is
/// also sent verbatim as the `items` field of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: i64,
    pub product_name: String,
    /// Links the line back to its product page.
    pub slug: String,
    pub image: String,
    /// The priced, stocked SKU. At most one line exists per variant.
    pub variant_id: i64,
    /// Unit price in whole currency units.
    pub price: i64,
    pub quantity: u32,
    pub unit: String,
}

impl CartItem {
    /// Builds a cart line for `quantity` units of the product's default variant.
    ///
    /// Returns `None` when the product has no variants or the default
    /// variant is out of stock.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Option<Self> {
        let variant = product.default_variant().filter(|v| v.in_stock())?;
        Some(Self {
            product_id: product.id,
            product_name: product.name.clone(),
            slug: product.slug.clone(),
            image: product
                .primary_image()
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
            variant_id: variant.id,
            price: variant.price,
            quantity: quantity.max(1),
            unit: product
                .unit
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(DEFAULT_UNIT)
                .to_string(),
        })
    }

    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}
