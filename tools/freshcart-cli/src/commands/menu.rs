//! Menu browsing.

use anyhow::{anyhow, Result};
use freshcart_commerce::catalog::{Product, ProductFilters, SortOption};
use freshcart_storefront::StorefrontApi;

use super::{MenuArgs, MenuCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    match args.command {
        MenuCommand::List {
            category,
            search,
            sort,
            min,
            max,
            available,
            diet,
            page,
        } => {
            let mut filters = ProductFilters::new();
            if let Some(category) = category {
                filters = filters.category(category);
            }
            if let Some(search) = search {
                filters = filters.search(search);
            }
            if let Some(sort) = sort {
                let sort: SortOption = sort.parse().map_err(|e: String| anyhow!(e))?;
                filters = filters.sort(sort);
            }
            if let Some(page) = page {
                filters = filters.page(page);
            }
            filters.min = min;
            filters.max = max;
            filters.available = available.then_some(true);
            filters.diet = diet;
            list_products(&filters, ctx).await
        }
        MenuCommand::Show { slug } => show_product(&slug, ctx).await,
        MenuCommand::Categories => list_categories(ctx).await,
        MenuCommand::Bundles => list_bundles(ctx).await,
    }
}

async fn list_products(filters: &ProductFilters, ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    let page = api.products(filters).await?;

    if ctx.output.is_json() {
        ctx.output.json(&page.items);
        return Ok(());
    }

    ctx.output.header("Menu");
    if page.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [28, 24, 14, 10];
    ctx.output.table_row(&["NAME", "SLUG", "PRICE", "STATUS"], &widths);
    for product in &page.items {
        let price = product.base_price.to_string();
        ctx.output.table_row(
            &[
                &truncate(&product.name, widths[0]),
                &truncate(&product.slug, widths[1]),
                &price,
                availability(product),
            ],
            &widths,
        );
    }

    if let Some(meta) = &page.meta {
        ctx.output.info(&format!(
            "Page {} of {} ({} products)",
            meta.page, meta.total_pages, meta.total
        ));
        if meta.has_next() {
            ctx.output.debug(&format!("Next: --page {}", meta.page + 1));
        }
    }

    Ok(())
}

fn availability(product: &Product) -> &'static str {
    if product.is_orderable() {
        "available"
    } else {
        "sold out"
    }
}

async fn show_product(slug: &str, ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    let product = api.product_by_slug(slug).await?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.base_price.to_string());
    if let (Some(original), Some(discount)) = (product.original_price, product.discount()) {
        ctx.output
            .kv("was", &format!("{} (save {})", original, discount));
    }
    if let Some(category) = &product.category {
        ctx.output.kv("category", &category.name);
    }
    if let Some(badge) = &product.badge {
        ctx.output.kv("badge", badge.display_name());
    }
    if let Some(rating) = product.rating {
        let reviews = product.review_count.unwrap_or(0);
        ctx.output
            .kv("rating", &format!("{:.1} ({} reviews)", rating, reviews));
    }
    ctx.output.kv("status", availability(&product));
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }

    if product.has_variants() {
        ctx.output.info("Variants:");
        for variant in &product.variants {
            let price = product.price_for(Some(&variant.id))?;
            ctx.output
                .list_item(&format!("{} [{}] {}", variant.name, variant.id, price));
        }
    }

    Ok(())
}

async fn list_categories(ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    let categories = api.categories().await?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        let count = category
            .count
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        ctx.output
            .list_item(&format!("{} [{}]{}", category.name, category.slug, count));
    }

    Ok(())
}

async fn list_bundles(ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    let bundles = api.bundles().await?;

    if ctx.output.is_json() {
        ctx.output.json(&bundles);
        return Ok(());
    }

    ctx.output.header("Bundles");
    for bundle in &bundles {
        let popular = if bundle.is_popular.unwrap_or(false) {
            " *popular*"
        } else {
            ""
        };
        ctx.output.list_item(&format!(
            "{} {} (save {}, {} items){}",
            bundle.name,
            bundle.price,
            bundle.savings(),
            bundle.item_count(),
            popular
        ));
        for item in &bundle.items {
            ctx.output.kv(&format!("{}x", item.qty), &item.product.name);
        }
    }

    Ok(())
}
