use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

/// Accepts an order code sent either as a JSON string or a JSON number.
///
/// The backend issues numeric codes for gateway orders and string codes
/// elsewhere; both are normalized to `String`.
///
/// # Errors
///
/// Fails when the value is neither null, a string, nor a number.
pub fn deserialize_order_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    }))
}

fn deserialize_required_order_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_order_code(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("orderCode must not be null"))
}

/// How the shopper pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery; the order is confirmed immediately.
    #[serde(rename = "COD")]
    CashOnDelivery,
    /// PayOS gateway; the shopper is redirected to an external checkout page.
    #[serde(rename = "PAYOS")]
    PayOs,
}

impl PaymentMethod {
    /// The literal tag the backend expects in `paymentMethod`.
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "COD",
            PaymentMethod::PayOs => "PAYOS",
        }
    }

    #[must_use]
    pub fn redirects_to_gateway(self) -> bool {
        matches!(self, PaymentMethod::PayOs)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COD" => Ok(PaymentMethod::CashOnDelivery),
            "PAYOS" => Ok(PaymentMethod::PayOs),
            other => Err(format!("unknown payment method \"{other}\" (expected COD or PAYOS)")),
        }
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub full_name: String,
    pub phone: String,
    /// Single formatted line: `detail, [ward, ]district, province`.
    pub address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartItem>,
}

/// Outcome of a successful order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderPlacement {
    /// The backend confirmed the order outright (cash on delivery).
    Confirmed { order_code: Option<String> },
    /// The backend opened a payment session; the shopper must be sent to
    /// `checkout_url` before the order is confirmed.
    Gateway {
        order_code: Option<String>,
        checkout_url: String,
    },
}

impl OrderPlacement {
    #[must_use]
    pub fn order_code(&self) -> Option<&str> {
        match self {
            OrderPlacement::Confirmed { order_code }
            | OrderPlacement::Gateway { order_code, .. } => order_code.as_deref(),
        }
    }
}

/// Lifecycle state of an order as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    PendingCod,
    PendingPayOs,
    PaidAndConfirmed,
    PaidButOutOfStock,
    Cancelled,
    Shipping,
    Completed,
    /// A status this client does not know yet.
    Other(String),
}

impl OrderStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Chờ xử lý",
            OrderStatus::PendingCod => "Chờ xác nhận (COD)",
            OrderStatus::PendingPayOs => "Chờ thanh toán (PayOS)",
            OrderStatus::PaidAndConfirmed => "Đã thanh toán & Chờ giao",
            OrderStatus::PaidButOutOfStock => "Đã thanh toán (Hết hàng)",
            OrderStatus::Cancelled => "Đã hủy",
            OrderStatus::Shipping => "Đang giao hàng",
            OrderStatus::Completed => "Đã giao thành công",
            OrderStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => OrderStatus::Pending,
            "PENDING_COD" => OrderStatus::PendingCod,
            "PENDING_PAYOS" => OrderStatus::PendingPayOs,
            "PAID_AND_CONFIRMED" => OrderStatus::PaidAndConfirmed,
            "PAID_BUT_OUT_OF_STOCK" => OrderStatus::PaidButOutOfStock,
            "CANCELLED" => OrderStatus::Cancelled,
            "SHIPPING" => OrderStatus::Shipping,
            "COMPLETED" => OrderStatus::Completed,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => "PENDING".to_string(),
            OrderStatus::PendingCod => "PENDING_COD".to_string(),
            OrderStatus::PendingPayOs => "PENDING_PAYOS".to_string(),
            OrderStatus::PaidAndConfirmed => "PAID_AND_CONFIRMED".to_string(),
            OrderStatus::PaidButOutOfStock => "PAID_BUT_OUT_OF_STOCK".to_string(),
            OrderStatus::Cancelled => "CANCELLED".to_string(),
            OrderStatus::Shipping => "SHIPPING".to_string(),
            OrderStatus::Completed => "COMPLETED".to_string(),
            OrderStatus::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackedProduct {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackedVariant {
    pub name: String,
    #[serde(default)]
    pub product: Option<TrackedProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackedOrderItem {
    pub id: i64,
    pub quantity: u32,
    pub price: i64,
    #[serde(default)]
    pub variant: Option<TrackedVariant>,
}

impl TrackedOrderItem {
    /// `"Product - Variant"` when both names are known, whichever is known otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.variant {
            Some(TrackedVariant {
                name,
                product: Some(product),
            }) => format!("{} - {name}", product.name),
            Some(TrackedVariant { name, product: None }) => name.clone(),
            None => format!("#{}", self.id),
        }
    }

    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

/// Order detail returned by the customer self-service lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
    #[serde(deserialize_with = "deserialize_required_order_code")]
    pub order_code: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_code: Option<String>,
    pub total: i64,
    #[serde(default)]
    pub items: Vec<TrackedOrderItem>,
}
