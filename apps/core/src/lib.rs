//! Lunara Jewels storefront assistant.
//!
//! A rule-based support chat: customer text is matched against a static
//! catalog of intents and answered with a canned response plus follow-up
//! quick replies. Sessions live in memory behind a supervisor actor.

pub mod actors;
pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod preflight;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use config::Config;
use error::AppError;
use matcher::{IntentCatalog, IntentMatcher};

/// Loads the configured catalog, falling back to the embedded one.
pub fn load_catalog(config: &Config) -> Result<IntentCatalog, AppError> {
    match &config.catalog_path {
        Some(path) => IntentCatalog::from_path(path),
        None => IntentCatalog::builtin(),
    }
}

/// Builds the matcher described by `config`.
pub fn build_matcher(config: &Config) -> Result<IntentMatcher, AppError> {
    let catalog = load_catalog(config)?;
    Ok(IntentMatcher::new(Arc::new(catalog), config.policy))
}
