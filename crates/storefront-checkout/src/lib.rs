//! Checkout: turns the cart plus customer and address input into a remote
//! order, branching on payment method.

pub mod address;
pub mod error;
pub mod flow;
pub mod notice;
pub mod validation;

pub use address::{
    format_address, AddressPicker, AddressSelection, LevelState, LookupOutcome, LookupTicket,
    RegionOptions,
};
pub use error::CheckoutError;
pub use flow::{
    confirm_gateway_return, gateway_cancelled, CheckoutFlow, CheckoutPhase, Navigation,
    OrderSuccessView,
};
pub use notice::{Notice, NoticeKind};
pub use validation::{is_valid_phone, validate, FieldErrors, FormField};
