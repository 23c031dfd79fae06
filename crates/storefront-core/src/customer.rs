use serde::{Deserialize, Serialize};

/// Identity of the person placing an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub full_name: String,
    pub phone: String,
}
