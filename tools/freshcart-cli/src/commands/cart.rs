//! Cart commands.

use anyhow::{bail, Context as _, Result};
use freshcart_commerce::cart::{CartLineItem, CartSession, FeeSchedule};
use freshcart_commerce::catalog::Product;
use freshcart_commerce::checkout::OrderType;
use freshcart_commerce::ids::{ProductId, VariantId};
use freshcart_commerce::CommerceError;
use freshcart_storefront::{StorefrontApi, StorefrontError};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;
use crate::session::SessionStore;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.session()?;
    let mut session = store.load_cart().context("Failed to load cart")?;

    match args.command {
        CartCommand::Add {
            slug,
            variant,
            qty,
            note,
        } => add(&slug, variant.map(VariantId::new), qty, note, &mut session, ctx).await?,
        CartCommand::Show => {}
        CartCommand::Remove {
            product_id,
            variant,
        } => {
            let product_id = ProductId::new(product_id);
            let variant = variant.map(VariantId::new);
            if !session.cart_mut().remove_item(&product_id, variant.as_ref()) {
                return Err(CommerceError::ItemNotInCart(product_id.to_string()).into());
            }
            ctx.output.success("Removed from cart");
        }
        CartCommand::Set {
            product_id,
            qty,
            variant,
        } => {
            let product_id = ProductId::new(product_id);
            let variant = variant.map(VariantId::new);
            if !session
                .cart_mut()
                .update_qty(&product_id, variant.as_ref(), qty)
            {
                return Err(CommerceError::ItemNotInCart(product_id.to_string()).into());
            }
            ctx.output.success("Cart updated");
        }
        CartCommand::Clear => {
            session.cart_mut().clear();
            ctx.output.success("Cart cleared");
        }
    }

    save(&store, &session)?;
    print_cart(&session, &ctx.config.pricing.fee_schedule(), ctx);
    Ok(())
}

async fn add(
    slug: &str,
    variant: Option<VariantId>,
    qty: u32,
    note: Option<String>,
    session: &mut CartSession,
    ctx: &Context,
) -> Result<()> {
    if qty == 0 {
        bail!("Quantity must be at least 1");
    }

    let api = ctx.storefront()?;
    let product = api.product_by_slug(slug).await.map_err(|e| match e {
        StorefrontError::Remote(ref f) if f.status() == Some(404) => {
            anyhow::Error::new(CommerceError::ProductNotFound(slug.to_string()))
        }
        other => other.into(),
    })?;

    if product.has_variants() && variant.is_none() {
        ctx.output
            .debug("Product has variants; adding the base option");
    }

    let item = add_product(session, &product, variant.as_ref(), qty, note)?;
    ctx.output.success(&format!(
        "Added {} x{} to cart",
        item.display_name(),
        item.quantity
    ));
    Ok(())
}

/// Add `qty` of `product` unless it is sold out or the cart would then hold
/// more than is in stock.
fn add_product(
    session: &mut CartSession,
    product: &Product,
    variant: Option<&VariantId>,
    qty: u32,
    note: Option<String>,
) -> Result<CartLineItem, CommerceError> {
    let in_cart = session.cart().product_quantity(&product.id);
    product.ensure_orderable(in_cart + u64::from(qty))?;

    let item = product.line_item(variant, qty, note)?;
    session.add_to_cart(item.clone());
    Ok(item)
}

fn save(store: &SessionStore, session: &CartSession) -> Result<()> {
    store.save_cart(session).context("Failed to save cart")
}

/// Print the cart with a delivery quote.
pub fn print_cart(session: &CartSession, fees: &FeeSchedule, ctx: &Context) {
    let cart = session.cart();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "totalItems": cart.total_items(),
            "totalPrice": cart.total_price().amount,
            "delivery": fees.compute_totals(cart.total_price(), OrderType::Delivery),
        }));
        return;
    }

    ctx.output.header("Your cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [32, 10, 6, 14];
    ctx.output
        .table_row(&["ITEM", "PRODUCT", "QTY", "TOTAL"], &widths);
    for item in cart.items() {
        ctx.output.table_row(
            &[
                &truncate(&item.display_name(), widths[0]),
                item.product_id.as_str(),
                &item.quantity.to_string(),
                &item.line_total().to_string(),
            ],
            &widths,
        );
        if let Some(note) = &item.note {
            ctx.output.kv("note", note);
        }
    }

    let subtotal = cart.total_price();
    let totals = fees.compute_totals(subtotal, OrderType::Delivery);
    ctx.output.kv("items", &cart.total_items().to_string());
    ctx.output.kv("subtotal", &subtotal.to_string());
    ctx.output.kv("delivery", &totals.delivery_fee.to_string());
    ctx.output.kv("total", &totals.total.to_string());
    if let Some(remaining) = fees.remaining_for_free_delivery(subtotal) {
        ctx.output
            .info(&format!("Add {} more for free delivery", remaining));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl(stock: i64, is_available: bool) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": "7",
            "name": "Poke Bowl",
            "slug": "poke-bowl",
            "basePrice": 55000,
            "stock": stock,
            "isAvailable": is_available,
            "variants": [{ "id": "v1", "name": "Large", "additionalPrice": 10000 }]
        }))
        .unwrap()
    }

    #[test]
    fn test_sold_out_product_is_not_added() {
        let mut session = CartSession::new();
        let err = add_product(&mut session, &bowl(2, false), None, 1, None).unwrap_err();
        assert!(matches!(err, CommerceError::ProductUnavailable(_)));
        assert!(session.cart().is_empty());
        assert!(!session.drawer().is_open());
    }

    #[test]
    fn test_quantity_above_stock_is_not_added() {
        let mut session = CartSession::new();
        let err = add_product(&mut session, &bowl(2, true), None, 50, None).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { available: 2, .. }));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_stock_limit_counts_lines_already_in_cart() {
        let mut session = CartSession::new();
        let product = bowl(3, true);
        add_product(&mut session, &product, None, 2, None).unwrap();

        let variant = VariantId::new("v1");
        let err = add_product(&mut session, &product, Some(&variant), 2, None).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { .. }));

        add_product(&mut session, &product, Some(&variant), 1, None).unwrap();
        assert_eq!(session.cart().total_items(), 3);
        assert!(session.drawer().is_open());
    }
}
