//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    let storefront = ctx.config.storefront();

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &storefront.base_url);
    if storefront.base_url != ctx.config.api.base_url {
        ctx.output.kv("base_url (file)", &ctx.config.api.base_url);
    }
    ctx.output
        .kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("[pricing]");
    ctx.output
        .kv("delivery_fee", &ctx.config.pricing.delivery_fee.to_string());
    ctx.output.kv(
        "free_delivery_threshold",
        &ctx.config.pricing.free_delivery_threshold.to_string(),
    );

    ctx.output.info("[session]");
    ctx.output
        .kv("dir", &ctx.session_dir().display().to_string());

    ctx.output.info("[logging]");
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
