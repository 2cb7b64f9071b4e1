//! CLI command implementations.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod orders;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use freshcart_storefront::StorefrontError;

/// Text shown for a failed command.
///
/// Storefront errors show the customer-facing message; anything else shows
/// the full context chain.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<StorefrontError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    #[command(subcommand)]
    pub command: MenuCommand,
}

#[derive(Subcommand)]
pub enum MenuCommand {
    /// List products.
    List {
        /// Category slug.
        #[arg(short, long)]
        category: Option<String>,
        /// Search text.
        #[arg(short, long)]
        search: Option<String>,
        /// popular, newest, price_asc or price_desc.
        #[arg(long)]
        sort: Option<String>,
        /// Minimum price.
        #[arg(long)]
        min: Option<i64>,
        /// Maximum price.
        #[arg(long)]
        max: Option<i64>,
        /// Only products that can be ordered.
        #[arg(long)]
        available: bool,
        /// Dietary tag (repeatable).
        #[arg(long)]
        diet: Vec<String>,
        /// Page number.
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show one product.
    Show {
        /// Product slug.
        slug: String,
    },
    /// List categories.
    Categories,
    /// List bundles.
    Bundles,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product to the cart.
    Add {
        /// Product slug.
        slug: String,
        /// Variant ID.
        #[arg(long)]
        variant: Option<String>,
        /// Quantity.
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
        /// Note for the kitchen.
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Show the cart.
    Show,
    /// Remove a line.
    Remove {
        /// Product ID.
        product_id: String,
        /// Variant ID.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Set a line's quantity (0 removes it).
    Set {
        /// Product ID.
        product_id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        qty: i64,
        /// Variant ID.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Show totals for the current cart.
    Quote {
        /// delivery or pickup.
        #[arg(short = 't', long = "type", default_value = "delivery")]
        order_type: String,
    },
    /// Place the order.
    Submit(SubmitArgs),
}

/// Arguments for checkout submit.
#[derive(Args)]
pub struct SubmitArgs {
    /// Your name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Phone number.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// delivery or pickup.
    #[arg(short = 't', long = "type", default_value = "delivery")]
    pub order_type: String,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Pickup slot, e.g. 12:00.
    #[arg(long)]
    pub pickup_time: Option<String>,

    /// Order notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Show only the last N orders.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Log in.
    Login {
        /// Email address (prompted if omitted).
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Create an account.
    Register {
        /// Full name (prompted if omitted).
        #[arg(long)]
        name: Option<String>,
        /// Email address (prompted if omitted).
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the stored credentials.
    Logout,
    /// Show the logged-in user.
    Whoami,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage products.
    Products {
        #[command(subcommand)]
        command: CrudCommand,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CrudCommand,
    },
    /// Manage bundles.
    Bundles {
        #[command(subcommand)]
        command: CrudCommand,
    },
    /// Manage orders.
    Orders {
        #[command(subcommand)]
        command: AdminOrdersCommand,
    },
    /// Show dashboard figures.
    Stats,
}

/// Create, update and delete for one catalog resource.
#[derive(Subcommand)]
pub enum CrudCommand {
    /// List all.
    List,
    /// Create from a JSON draft file.
    Create {
        /// Path to the JSON draft.
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace from a JSON draft file.
    Update {
        /// ID to update.
        id: String,
        /// Path to the JSON draft.
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete.
    Delete {
        /// ID to delete.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminOrdersCommand {
    /// List orders.
    List {
        /// Only orders with this status.
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change an order's status.
    SetStatus {
        /// Order ID.
        id: String,
        /// New status, e.g. PROCESSING.
        status: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default freshcart.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
