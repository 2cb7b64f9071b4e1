//! Checkout commands.

use anyhow::{Context as _, Result};
use freshcart_commerce::checkout::{CheckoutForm, OrderType};
use freshcart_storefront::{CheckoutOutcome, CheckoutService};

use super::{CheckoutArgs, CheckoutCommand, SubmitArgs};
use crate::context::Context;

/// Path the checkout screen lives at, for the route guard.
const CHECKOUT_PATH: &str = "/checkout";

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CheckoutCommand::Quote { order_type } => quote(&order_type, ctx),
        CheckoutCommand::Submit(args) => submit(args, ctx).await,
    }
}

fn quote(order_type: &str, ctx: &Context) -> Result<()> {
    let order_type: OrderType = order_type.parse()?;
    let session = ctx.session()?.load_cart().context("Failed to load cart")?;
    let totals = ctx
        .config
        .pricing
        .fee_schedule()
        .compute_totals(session.cart().total_price(), order_type);

    if ctx.output.is_json() {
        ctx.output.json(&totals);
        return Ok(());
    }

    ctx.output
        .header(&format!("{} quote", order_type.display_name()));
    ctx.output.kv("subtotal", &totals.subtotal.to_string());
    ctx.output.kv("delivery", &totals.delivery_fee.to_string());
    ctx.output.kv("total", &totals.total.to_string());
    if order_type == OrderType::Delivery && totals.is_free_delivery() && !totals.subtotal.is_zero() {
        ctx.output.success("Free delivery");
    }
    Ok(())
}

fn build_form(args: SubmitArgs) -> Result<CheckoutForm> {
    let order_type: OrderType = args.order_type.parse()?;
    let mut form = CheckoutForm::new(args.name, args.phone, order_type);
    form.address = args.address;
    form.pickup_time = args.pickup_time;
    form.notes = args.notes;
    Ok(form)
}

async fn submit(args: SubmitArgs, ctx: &Context) -> Result<()> {
    ctx.require_access(CHECKOUT_PATH)?;

    let form = build_form(args)?;
    let store = ctx.session()?;
    let mut session = store.load_cart().context("Failed to load cart")?;
    let service: CheckoutService = ctx.checkout_service(&store)?;

    let totals = service.quote(session.cart(), form.order_type);
    ctx.output
        .debug(&format!("Placing order for {}", totals.total));

    let spinner = ctx.output.spinner("Placing your order...");
    let result = service.submit(&mut session, &form).await;
    spinner.finish_and_clear();

    store
        .save_checkout_keys(&service.idempotency_keys())
        .context("Failed to save pending checkout")?;
    let outcome = result?;
    store.save_cart(&session).context("Failed to save cart")?;

    if ctx.output.is_json() {
        let payment_url = match &outcome {
            CheckoutOutcome::RedirectToPayment { url, .. } => Some(url.as_str()),
            CheckoutOutcome::ShowOrders { .. } => None,
        };
        ctx.output.json(&serde_json::json!({
            "orderId": outcome.order_id(),
            "paymentUrl": payment_url,
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Order {} placed", outcome.order_id()));
    match outcome {
        CheckoutOutcome::RedirectToPayment { url, .. } => {
            ctx.output.info("Complete your payment at:");
            println!("  {}", url);
        }
        CheckoutOutcome::ShowOrders { .. } => {
            super::orders::print_orders(ctx, None).await?;
        }
    }

    Ok(())
}
