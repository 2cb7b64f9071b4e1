//! Login, registration and logout.

use anyhow::{Context as _, Result};
use dialoguer::{Input, Password};
use freshcart_auth::{CredentialStore, Credentials, LoginForm, RegisterForm, User};
use freshcart_storefront::{StorefrontApi, StorefrontError};

use super::{AuthArgs, AuthCommand};
use crate::context::Context;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login { email } => login(email, ctx).await,
        AuthCommand::Register { name, email } => register(name, email, ctx).await,
        AuthCommand::Logout => logout(ctx),
        AuthCommand::Whoami => whoami(ctx).await,
    }
}

fn prompt_text(prompt: &str, given: Option<String>) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

async fn login(email: Option<String>, ctx: &Context) -> Result<()> {
    let email = prompt_text("Email", email)?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    let api = ctx.storefront()?;
    let response = api.login(&LoginForm::new(email, password)).await?;
    let credentials = Credentials::from(response);
    api.credentials()
        .save(&credentials)
        .context("Failed to save credentials")?;

    if let Some(user) = &credentials.user {
        greet(user, ctx);
    }
    Ok(())
}

async fn register(name: Option<String>, email: Option<String>, ctx: &Context) -> Result<()> {
    let name = prompt_text("Full name", name)?;
    let email = prompt_text("Email", email)?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;
    let confirm = Password::new()
        .with_prompt("Confirm password")
        .allow_empty_password(true)
        .interact()?;

    let request = RegisterForm {
        name,
        email,
        password,
        confirm,
    }
    .into_request()
    .map_err(StorefrontError::from)?;

    let api = ctx.storefront()?;
    let response = api.register(&request).await?;
    let credentials = Credentials::from(response);
    api.credentials()
        .save(&credentials)
        .context("Failed to save credentials")?;

    if let Some(user) = &credentials.user {
        greet(user, ctx);
    }
    Ok(())
}

fn greet(user: &User, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(user);
        return;
    }
    ctx.output
        .success(&format!("Logged in as {} ({})", user.display_name(), user.role));
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.session()?
        .clear()
        .context("Failed to clear credentials")?;
    ctx.output.success("Logged out");
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    let store = ctx.session()?;
    let Some(mut credentials) = store.load()? else {
        ctx.output.info("Not logged in.");
        return Ok(());
    };

    let api = ctx.storefront()?;
    let user = api.me().await?;
    credentials.user = Some(user.clone());
    store
        .save(&credentials)
        .context("Failed to save credentials")?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
        return Ok(());
    }

    ctx.output.header(user.display_name());
    ctx.output.kv("id", user.id.as_str());
    ctx.output.kv("email", &user.email);
    ctx.output.kv("role", user.role.as_str());
    Ok(())
}
