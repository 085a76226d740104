//! Test Module
//!
//! Cross-module tests for the storefront assistant.
//!
//! ## Test Categories
//! - `matcher_tests`: conversations against the embedded catalog, preflight
//! - `supervisor_tests`: session lifecycle through the actor handle
//! - `config_tests`: environment configuration and catalog loading

pub mod config_tests;
pub mod matcher_tests;
