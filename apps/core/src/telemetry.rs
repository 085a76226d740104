//! Tracing subscriber setup for the chat binary.
//!
//! Logs go to stderr so they never interleave with the conversation on stdout.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::AppError;

const APP_NAME: &str = "lunara-chat";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(format: LogFormat) -> Result<(), AppError> {
    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Bunyan => tracing_subscriber::registry()
            .with(env_filter())
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| AppError::Config(format!("failed to install tracing subscriber: {}", e)))
}
