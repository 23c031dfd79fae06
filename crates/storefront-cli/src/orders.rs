//! Order tracking and the payment gateway's return pages.

use storefront_cart::CartStore;
use storefront_checkout::{confirm_gateway_return, gateway_cancelled};
use storefront_client::StorefrontClient;

use crate::display::{format_timestamp, format_total};

pub(crate) async fn run_track(
    client: &StorefrontClient,
    order_code: &str,
    phone: &str,
) -> anyhow::Result<()> {
    let order = client.track_order(order_code, phone).await?;

    println!("Đơn hàng #{}", order.order_code);
    println!("Trạng thái: {}", order.status.label());
    println!("Ngày đặt:   {}", format_timestamp(order.created_at));
    println!("Người nhận: {} ({})", order.customer_name, order.phone);
    println!("Địa chỉ:    {}", order.address);
    if let Some(code) = &order.tracking_code {
        println!("Mã vận đơn: {code}");
    }
    println!();
    for item in &order.items {
        println!(
            "  {:<40} x{:<4} {:>14}",
            item.display_name(),
            item.quantity,
            format_total(item.line_total())
        );
    }
    println!("Tổng cộng: {}", format_total(order.total));
    Ok(())
}

pub(crate) fn run_gateway_return(
    cart: &CartStore,
    order_code: Option<String>,
) -> anyhow::Result<()> {
    let view = confirm_gateway_return(cart, order_code)?;
    println!("{view}");
    Ok(())
}

pub(crate) fn run_gateway_cancel(cart: &CartStore) {
    println!("{}", gateway_cancelled());
    println!("Giỏ hàng: {} sản phẩm", cart.count());
}
