//! Customer order history.

use anyhow::Result;
use freshcart_commerce::checkout::Order;
use freshcart_storefront::StorefrontApi;

use super::OrdersArgs;
use crate::context::Context;
use crate::output::status_badge;

const ORDERS_PATH: &str = "/orders";

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    ctx.require_access(ORDERS_PATH)?;
    print_orders(ctx, args.limit).await
}

/// Fetch and print the customer's orders, newest first.
pub async fn print_orders(ctx: &Context, limit: Option<usize>) -> Result<()> {
    let api = ctx.storefront()?;
    let mut orders = api.orders().await?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Your orders");
    print_order_table(&orders, ctx);
    Ok(())
}

/// Table shared with the admin order list.
pub fn print_order_table(orders: &[Order], ctx: &Context) {
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return;
    }

    let widths = [14, 18, 10, 14, 8, 12];
    ctx.output.table_row(
        &["ORDER", "DATE", "TYPE", "TOTAL", "ITEMS", "STATUS"],
        &widths,
    );
    for order in orders {
        let date = order
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &date,
                order.order_type.display_name(),
                &order.total_price.to_string(),
                &order.item_count().to_string(),
                &status_badge(&order.status),
            ],
            &widths,
        );
        if !order.is_paid() && !order.status.is_terminal() && !order.payment_status.is_empty() {
            ctx.output.kv("payment", &order.payment_status);
        }
    }
}
