pub mod address;
pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod customer;
pub mod order;
pub mod review;
pub mod user;

use thiserror::Error;

pub use address::Region;
pub use app_config::AppConfig;
pub use cart::CartItem;
pub use catalog::{Category, Product, ProductImage, Variant};
pub use config::{load_app_config, load_app_config_from_env};
pub use customer::CustomerInfo;
pub use order::{
    OrderPlacement, OrderRequest, OrderStatus, PaymentMethod, TrackedOrder, TrackedOrderItem,
};
pub use review::{NewReview, Review, ReviewAuthor};
pub use user::CurrentUser;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
