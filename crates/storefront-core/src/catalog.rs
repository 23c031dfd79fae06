use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A purchasable SKU of a [`Product`], carrying its own price and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Unit price in whole currency units (VND has no minor unit).
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
}

impl Variant {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<i64>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit-of-measure label shown next to quantities, e.g. `"Cái"` or `"Bộ"`.
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Embedded by list endpoints; absent on some detail responses.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

fn default_visible() -> bool {
    true
}

impl Product {
    /// The variant the storefront sells when a shopper does not pick one.
    #[must_use]
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Lowest variant price, used for "from" labels on listings.
    #[must_use]
    pub fn starting_price(&self) -> Option<i64> {
        self.variants.iter().map(|v| v.price).min()
    }
}
