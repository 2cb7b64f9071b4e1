//! Admin panel commands.
//!
//! Drafts are read from JSON files and validated locally before anything is
//! sent. Deletes ask for confirmation unless `--yes` is given.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use freshcart_commerce::admin::{BundleDraft, CategoryDraft, OrderStatusUpdate, ProductDraft};
use freshcart_commerce::catalog::ProductFilters;
use freshcart_commerce::checkout::OrderStatus;
use freshcart_commerce::ids::{BundleId, CategoryId, OrderId, ProductId};
use freshcart_storefront::{AdminApi, StorefrontError};
use serde::de::DeserializeOwned;

use super::{AdminArgs, AdminCommand, AdminOrdersCommand, CrudCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

const ADMIN_PATH: &str = "/admin";

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    ctx.require_access(ADMIN_PATH)?;

    match args.command {
        AdminCommand::Products { command } => products(command, ctx).await,
        AdminCommand::Categories { command } => categories(command, ctx).await,
        AdminCommand::Bundles { command } => bundles(command, ctx).await,
        AdminCommand::Orders { command } => orders(command, ctx).await,
        AdminCommand::Stats => stats(ctx).await,
    }
}

fn read_draft<T: DeserializeOwned>(path: &Path, ctx: &Context) -> Result<T> {
    let path = ctx.resolve_path(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read draft: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse draft: {}", path.display()))
}

fn confirm_delete(what: &str, id: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(format!("Delete {} {}?", what, id))
        .default(false)
        .interact()?)
}

async fn products(command: CrudCommand, ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    match command {
        CrudCommand::List => {
            let page = api.list_products(&ProductFilters::new()).await?;
            if ctx.output.is_json() {
                ctx.output.json(&page.items);
                return Ok(());
            }
            ctx.output.header("Products");
            let widths = [12, 28, 14, 8, 10];
            ctx.output
                .table_row(&["ID", "NAME", "PRICE", "STOCK", "AVAILABLE"], &widths);
            for p in &page.items {
                ctx.output.table_row(
                    &[
                        p.id.as_str(),
                        &truncate(&p.name, widths[1]),
                        &p.base_price.to_string(),
                        &p.stock.to_string(),
                        if p.is_available { "yes" } else { "no" },
                    ],
                    &widths,
                );
            }
        }
        CrudCommand::Create { file } => {
            let draft: ProductDraft = read_draft(&file, ctx)?;
            let payload = draft.into_payload().map_err(StorefrontError::from)?;
            let product = api.create_product(&payload).await?;
            ctx.output
                .success(&format!("Created product {} ({})", product.name, product.id));
        }
        CrudCommand::Update { id, file } => {
            let draft: ProductDraft = read_draft(&file, ctx)?;
            let payload = draft.into_payload().map_err(StorefrontError::from)?;
            let product = api.update_product(&ProductId::new(id), &payload).await?;
            ctx.output
                .success(&format!("Updated product {} ({})", product.name, product.id));
        }
        CrudCommand::Delete { id, yes } => {
            if !confirm_delete("product", &id, yes)? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            api.delete_product(&ProductId::new(id.clone())).await?;
            ctx.output.success(&format!("Deleted product {}", id));
        }
    }
    Ok(())
}

async fn categories(command: CrudCommand, ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    match command {
        CrudCommand::List => {
            let categories = api.list_categories().await?;
            if ctx.output.is_json() {
                ctx.output.json(&categories);
                return Ok(());
            }
            ctx.output.header("Categories");
            let widths = [12, 24, 24];
            ctx.output.table_row(&["ID", "NAME", "SLUG"], &widths);
            for c in &categories {
                ctx.output
                    .table_row(&[c.id.as_str(), &c.name, &c.slug], &widths);
            }
        }
        CrudCommand::Create { file } => {
            let draft: CategoryDraft = read_draft(&file, ctx)?;
            let payload = draft.into_payload().map_err(StorefrontError::from)?;
            let category = api.create_category(&payload).await?;
            ctx.output
                .success(&format!("Created category {} ({})", category.name, category.id));
        }
        CrudCommand::Update { id, file } => {
            let draft: CategoryDraft = read_draft(&file, ctx)?;
            let payload = draft.into_payload().map_err(StorefrontError::from)?;
            let category = api
                .update_category(&CategoryId::new(id), &payload)
                .await?;
            ctx.output
                .success(&format!("Updated category {} ({})", category.name, category.id));
        }
        CrudCommand::Delete { id, yes } => {
            if !confirm_delete("category", &id, yes)? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            api.delete_category(&CategoryId::new(id.clone())).await?;
            ctx.output.success(&format!("Deleted category {}", id));
        }
    }
    Ok(())
}

async fn bundles(command: CrudCommand, ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    match command {
        CrudCommand::List => {
            let bundles = api.list_bundles().await?;
            if ctx.output.is_json() {
                ctx.output.json(&bundles);
                return Ok(());
            }
            ctx.output.header("Bundles");
            let widths = [12, 28, 14, 14];
            ctx.output
                .table_row(&["ID", "NAME", "PRICE", "ORIGINAL"], &widths);
            for b in &bundles {
                ctx.output.table_row(
                    &[
                        b.id.as_str(),
                        &truncate(&b.name, widths[1]),
                        &b.price.to_string(),
                        &b.original_price.to_string(),
                    ],
                    &widths,
                );
            }
        }
        CrudCommand::Create { file } => {
            let draft: BundleDraft = read_draft(&file, ctx)?;
            let payload = draft.into_payload().map_err(StorefrontError::from)?;
            let bundle = api.create_bundle(&payload).await?;
            ctx.output
                .success(&format!("Created bundle {} ({})", bundle.name, bundle.id));
        }
        CrudCommand::Update { id, file } => {
            let draft: BundleDraft = read_draft(&file, ctx)?;
            let payload = draft.into_payload().map_err(StorefrontError::from)?;
            let bundle = api.update_bundle(&BundleId::new(id), &payload).await?;
            ctx.output
                .success(&format!("Updated bundle {} ({})", bundle.name, bundle.id));
        }
        CrudCommand::Delete { id, yes } => {
            if !confirm_delete("bundle", &id, yes)? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            api.delete_bundle(&BundleId::new(id.clone())).await?;
            ctx.output.success(&format!("Deleted bundle {}", id));
        }
    }
    Ok(())
}

/// Parse a status typed by the admin. Only the known workflow statuses
/// may be set.
fn parse_status(input: &str) -> Result<OrderStatus> {
    let status = OrderStatus::from(input.trim().replace([' ', '-'], "_"));
    if let OrderStatus::Other(s) = &status {
        let all = OrderStatus::ALL;
        let known: Vec<&str> = all.iter().map(OrderStatus::as_str).collect();
        bail!("Unknown status '{}'. Expected one of: {}", s, known.join(", "));
    }
    Ok(status)
}

async fn orders(command: AdminOrdersCommand, ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    match command {
        AdminOrdersCommand::List { status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let orders = api.list_orders(status).await?;
            if ctx.output.is_json() {
                ctx.output.json(&orders);
                return Ok(());
            }
            ctx.output.header("Orders");
            super::orders::print_order_table(&orders, ctx);
        }
        AdminOrdersCommand::SetStatus { id, status } => {
            let status = parse_status(&status)?;
            let label = status_badge(&status);
            api.update_order_status(&OrderId::new(id.clone()), &OrderStatusUpdate { status })
                .await?;
            ctx.output.success(&format!("Order {} is now {}", id, label));
        }
    }
    Ok(())
}

async fn stats(ctx: &Context) -> Result<()> {
    let api = ctx.storefront()?;
    let stats = api.stats().await?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Dashboard");
    if stats.is_empty() {
        ctx.output.info("No figures available.");
        return Ok(());
    }
    for (key, value) in stats.entries() {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        ctx.output.kv(key, &value);
    }
    Ok(())
}
