//! Catalog browsing commands.

use storefront_client::{ProductQuery, StorefrontClient};

use crate::display::format_price;

pub(crate) async fn run_products(
    client: &StorefrontClient,
    query: &ProductQuery,
) -> anyhow::Result<()> {
    let listing = client.list_products(query).await?;
    if listing.items.is_empty() {
        println!("Không tìm thấy sản phẩm nào.");
        return Ok(());
    }

    for product in &listing.items {
        let stock = if product.variants.iter().any(storefront_core::Variant::in_stock) {
            ""
        } else {
            "  (hết hàng)"
        };
        println!(
            "{:<40} {:>14}  {}{stock}",
            product.name,
            format_price(product.starting_price().unwrap_or(0)),
            product.slug
        );
    }

    if let Some(pagination) = listing.pagination {
        let page = pagination.current_page.or(query.page).unwrap_or(1);
        let more = if pagination.has_next(page) {
            " (còn trang sau)"
        } else {
            ""
        };
        println!("\nTrang {page}/{}{more}", pagination.total_pages);
    }
    Ok(())
}

pub(crate) async fn run_product(client: &StorefrontClient, slug: &str) -> anyhow::Result<()> {
    let product = client.product_by_slug(slug).await?;

    println!("{}", product.name);
    if let Some(category) = &product.category {
        println!("Danh mục: {}", category.name);
    }
    if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("\n{}\n", description.trim());
    }
    for variant in &product.variants {
        println!(
            "  #{:<6} {:<24} {:>14}  tồn kho: {}",
            variant.id,
            variant.name,
            format_price(variant.price),
            variant.stock
        );
    }
    if let Some(image) = product.primary_image() {
        println!("Ảnh: {image}");
    }
    Ok(())
}

pub(crate) async fn run_categories(client: &StorefrontClient) -> anyhow::Result<()> {
    for category in client.list_categories().await? {
        println!("{:<6} {:<32} {}", category.id, category.name, category.slug);
    }
    Ok(())
}

pub(crate) async fn run_suggest(client: &StorefrontClient, term: &str) -> anyhow::Result<()> {
    for suggestion in client.search_suggestions(term).await? {
        println!("{suggestion}");
    }
    Ok(())
}
