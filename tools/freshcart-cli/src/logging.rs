//! Tracing subscriber setup.

use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` wins over the defaults.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<(), TryInitError> {
    match config.format {
        LogFormat::Compact => init_with_layer(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
            verbose,
        ),
        LogFormat::Json => init_with_layer(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(std::io::stderr),
            verbose,
        ),
    }
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,freshcart=debug,freshcart_storefront=debug,freshcart_data=debug"
    } else {
        "warn,freshcart=info,freshcart_storefront=info"
    }
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn init_with_layer<L>(fmt_layer: L, verbose: bool) -> Result<(), TryInitError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(verbose))
        .try_init()
}
