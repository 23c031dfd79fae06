use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use storefront_cart::{CartStore, FileStore, Session};
use storefront_client::{EsgooDirectory, ProductQuery, StorefrontClient};
use tracing_subscriber::EnvFilter;

mod address;
mod cart;
mod catalog;
mod checkout;
mod display;
mod orders;
mod reviews;

use address::AddressCommands;
use cart::CartCommands;
use checkout::CheckoutArgs;
use reviews::ReviewCommands;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront command line client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 12)]
        limit: u32,
        /// Category slug
        #[arg(long)]
        category: Option<String>,
        /// Free-text search
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one product
    Product { slug: String },
    /// List categories
    Categories,
    /// Search-as-you-type suggestions
    Suggest { term: String },
    /// Read or write product reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Look up delivery regions
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Place an order for the current cart
    Checkout(CheckoutArgs),
    /// Look up an order by code and phone number
    Track { order_code: String, phone: String },
    /// Complete a gateway payment: clears the cart
    GatewayReturn { order_code: Option<String> },
    /// Abandoned gateway payment: keeps the cart
    GatewayCancel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = storefront_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("storefront: use --help to list commands");
        return Ok(());
    };

    let storage = Arc::new(
        FileStore::open(&config.data_dir)
            .with_context(|| format!("cannot open data dir {}", config.data_dir.display()))?,
    );
    let session = Session::new(storage.clone());
    let client = StorefrontClient::from_config(&config)?.with_bearer_token(session.bearer_token()?);
    if let Some(user) = session.current_user()? {
        tracing::debug!(user = %user.name, admin = user.is_admin(), "signed in");
    }
    let cart = CartStore::load(storage);

    match command {
        Commands::Products {
            page,
            limit,
            category,
            query,
        } => {
            let query = ProductQuery {
                category,
                q: query,
                ..ProductQuery::page(page, limit)
            };
            catalog::run_products(&client, &query).await?;
        }
        Commands::Product { slug } => catalog::run_product(&client, &slug).await?,
        Commands::Categories => catalog::run_categories(&client).await?,
        Commands::Suggest { term } => catalog::run_suggest(&client, &term).await?,
        Commands::Reviews { command } => reviews::run_reviews(command, &client).await?,
        Commands::Cart { command } => cart::run_cart(command, &cart, &client).await?,
        Commands::Address { command } => {
            let directory = EsgooDirectory::from_config(&config)?;
            address::run_address(command, &directory).await?;
        }
        Commands::Checkout(args) => {
            let directory = EsgooDirectory::from_config(&config)?;
            checkout::run_checkout(args, &config, &cart, &client, &directory).await?;
        }
        Commands::Track { order_code, phone } => {
            orders::run_track(&client, &order_code, &phone).await?;
        }
        Commands::GatewayReturn { order_code } => orders::run_gateway_return(&cart, order_code)?,
        Commands::GatewayCancel => orders::run_gateway_cancel(&cart),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
