use storefront_cart::CartError;
use storefront_client::ApiError;
use thiserror::Error;

use crate::validation::FormField;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("{} field(s) failed validation: {fields:?}", .fields.len())]
    Invalid { fields: Vec<FormField> },

    #[error("order submission failed: {0}")]
    Api(#[from] ApiError),

    #[error("cart update failed: {0}")]
    Cart(#[from] CartError),

    #[error("{level} \"{id}\" is not among the loaded options")]
    UnknownRegion { level: &'static str, id: String },

    #[error("checkout already finished in phase {phase}")]
    Finished { phase: &'static str },
}
