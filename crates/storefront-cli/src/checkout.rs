//! Non-interactive checkout: the same flow the checkout page drives, fed
//! from command-line arguments.

use std::time::Duration;

use clap::Args;
use storefront_cart::CartStore;
use storefront_checkout::{CheckoutError, CheckoutFlow, Navigation, Notice};
use storefront_client::{EsgooDirectory, StorefrontClient};
use storefront_core::{AppConfig, PaymentMethod};

use crate::display::format_total;

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Recipient's full name
    #[arg(long)]
    pub name: String,
    /// Mobile number, e.g. 0912345678
    #[arg(long)]
    pub phone: String,
    /// Province id (see `address provinces`)
    #[arg(long)]
    pub province: String,
    /// District id (see `address districts`)
    #[arg(long)]
    pub district: String,
    /// Ward id (see `address wards`)
    #[arg(long)]
    pub ward: Option<String>,
    /// House number and street
    #[arg(long)]
    pub detail: String,
    /// `cod` or `payos`
    #[arg(long, default_value = "cod")]
    pub payment: PaymentMethod,
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        println!("{notice}");
    }
}

pub(crate) async fn run_checkout(
    args: CheckoutArgs,
    config: &AppConfig,
    cart: &CartStore,
    client: &StorefrontClient,
    directory: &EsgooDirectory,
) -> anyhow::Result<()> {
    let (mut flow, ticket) = CheckoutFlow::mount(
        cart,
        Duration::from_millis(config.success_redirect_delay_ms),
    );
    flow.run_lookup(ticket, directory).await;

    flow.set_full_name(args.name);
    flow.set_phone(args.phone);
    flow.set_detail(args.detail);
    flow.choose_province(&args.province, directory).await?;
    flow.choose_district(&args.district, directory).await?;
    if let Some(ward) = args.ward.as_deref() {
        flow.select_ward(ward)?;
    }
    print_notices(flow.take_notices());

    println!(
        "Đặt {} dòng hàng, tổng {} ({})",
        flow.items().len(),
        format_total(flow.total()),
        args.payment
    );

    let outcome = flow.submit(args.payment, client, cart).await;
    print_notices(flow.take_notices());

    match outcome {
        Ok(Navigation::External { url }) => {
            println!("Mở liên kết sau để thanh toán: {url}");
            Ok(())
        }
        Ok(Navigation::OrderSuccess { view, after }) => {
            tokio::time::sleep(after).await;
            println!("{view}");
            Ok(())
        }
        Err(CheckoutError::Invalid { .. }) => {
            for (field, message) in flow.errors().iter() {
                println!("  {field}: {message}");
            }
            anyhow::bail!("checkout form is incomplete")
        }
        Err(e) => Err(e.into()),
    }
}
