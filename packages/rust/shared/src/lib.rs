//! Shared error model, domain types, and configuration for confscrape.
//!
//! This crate is the foundation depended on by all other confscrape crates.
//! It provides:
//! - [`ConfscrapeError`], the unified error type
//! - The [`Profile`] domain type
//! - Environment-sourced configuration ([`Config`])

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::Config;
pub use error::{ConfscrapeError, Result};
pub use types::Profile;
