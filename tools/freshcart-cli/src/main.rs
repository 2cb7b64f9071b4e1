//! FreshCart CLI - Command line storefront for FreshCart.
//!
//! Commands:
//! - `freshcart menu` - Browse products, categories and bundles
//! - `freshcart cart` - Add, change and remove cart lines
//! - `freshcart checkout` - Quote totals and place an order
//! - `freshcart orders` - Show your order history
//! - `freshcart auth` - Log in, register, log out
//! - `freshcart admin` - Manage the catalog and orders
//! - `freshcart config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AdminArgs, AuthArgs, CartArgs, CheckoutArgs, ConfigArgs, MenuArgs, OrdersArgs};

/// FreshCart CLI - Order food from the FreshCart storefront
#[derive(Parser)]
#[command(name = "freshcart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(MenuArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Quote totals or place an order
    Checkout(CheckoutArgs),

    /// List your orders
    Orders(OrdersArgs),

    /// Log in, register or log out
    Auth(AuthArgs),

    /// Admin panel
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&commands::describe_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
