//! Cart commands. Every mutation goes through `CartStore` so the persisted
//! list and the change broadcast stay in step.

use anyhow::Context;
use clap::Subcommand;
use storefront_cart::{CartBadge, CartStore};
use storefront_client::StorefrontClient;
use storefront_core::CartItem;

use crate::display::{format_price, format_total};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart lines and total
    Show,
    /// Add the default variant of a product
    Add {
        /// Product slug (see `products`)
        slug: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line; values below 1 are ignored
    Set {
        variant_id: i64,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { variant_id: i64 },
    /// Empty the cart
    Clear,
}

pub(crate) async fn run_cart(
    command: CartCommands,
    cart: &CartStore,
    client: &StorefrontClient,
) -> anyhow::Result<()> {
    let mut badge = CartBadge::attach(cart);

    match command {
        CartCommands::Show => {
            print_cart(cart);
            return Ok(());
        }
        CartCommands::Add { slug, quantity } => {
            let product = client.product_by_slug(&slug).await?;
            let item = CartItem::from_product(&product, quantity)
                .with_context(|| format!("product {slug} is out of stock or has no variant"))?;
            let name = item.product_name.clone();
            cart.add(item)?;
            println!("Đã thêm {quantity} x {name} vào giỏ hàng.");
        }
        CartCommands::Set {
            variant_id,
            quantity,
        } => {
            if !cart.update_quantity(variant_id, quantity)? {
                println!("Số lượng phải từ 1 trở lên; giỏ hàng không thay đổi.");
            }
        }
        CartCommands::Remove { variant_id } => cart.remove(variant_id)?,
        CartCommands::Clear => cart.clear()?,
    }

    badge.sync();
    println!("Giỏ hàng: {} sản phẩm", badge.count());
    Ok(())
}

fn print_cart(cart: &CartStore) {
    let items = cart.items();
    if items.is_empty() {
        println!("Giỏ hàng trống.");
        return;
    }
    for line in &items {
        println!(
            "  #{:<6} {:<36} {:>4} {:<6} x {:>12} = {:>14}",
            line.variant_id,
            line.product_name,
            line.quantity,
            line.unit,
            format_price(line.price),
            format_total(line.line_total())
        );
    }
    println!("Tổng cộng: {}", format_total(cart.total()));
}
