use serde::{Deserialize, Serialize};

/// One entry of the province/district/ward hierarchy.
///
/// Identifiers are opaque strings (the provider zero-pads them, e.g. `"01"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub full_name: String,
}

impl Region {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
        }
    }
}
