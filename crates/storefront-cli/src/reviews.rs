//! Product review commands.

use clap::Subcommand;
use storefront_client::{ApiError, StorefrontClient};
use storefront_core::NewReview;

use crate::display::format_timestamp;

const SESSION_EXPIRED: &str = "Phiên đăng nhập hết hạn, vui lòng đăng nhập lại!";

#[derive(Debug, Subcommand)]
pub enum ReviewCommands {
    /// Show the reviews of a product
    List { slug: String },
    /// Review a product (requires a signed-in session)
    Add {
        slug: String,
        /// Stars, 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

pub(crate) async fn run_reviews(
    command: ReviewCommands,
    client: &StorefrontClient,
) -> anyhow::Result<()> {
    match command {
        ReviewCommands::List { slug } => {
            let product = client.product_by_slug(&slug).await?;
            let reviews = client.list_reviews(product.id).await?;
            if reviews.is_empty() {
                println!("Chưa có đánh giá nào. Hãy là người đầu tiên nhận xét sản phẩm này!");
                return Ok(());
            }
            for review in &reviews {
                let when = review.created_at.map(format_timestamp).unwrap_or_default();
                println!("{} {}  {when}", review.stars(), review.author_name());
                if let Some(comment) = review.comment.as_deref().filter(|c| !c.trim().is_empty()) {
                    println!("    {}", comment.trim());
                }
            }
        }
        ReviewCommands::Add {
            slug,
            rating,
            comment,
        } => {
            let product = client.product_by_slug(&slug).await?;
            let review = NewReview {
                product_id: product.id,
                rating,
                comment: comment.trim().to_string(),
            };
            match client.submit_review(&review).await {
                Ok(_) => println!("Cảm ơn bạn đã đánh giá!"),
                Err(e) if e.status() == Some(401) => anyhow::bail!(SESSION_EXPIRED),
                Err(e @ ApiError::InvalidInput(_)) => anyhow::bail!(e.user_message()),
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
