pub mod address;
pub mod client;
pub mod envelope;
pub mod error;
mod retry;

pub use address::{AddressDirectory, AddressLevel, EsgooDirectory};
pub use client::{ProductQuery, StorefrontClient};
pub use envelope::{ApiEnvelope, Listing, Pagination};
pub use error::ApiError;
