//! Conference backend access: HTTP client, response decoding, and the
//! profile walker.
//!
//! This crate provides:
//! - [`client`]: authenticated requests against the attendee endpoints
//! - `decode` (private): vendor envelope structs and their mapping to the
//!   normalized [`Profile`](confscrape_shared::Profile)
//! - [`walker`]: pagination plus per-attendee detail expansion

pub mod client;
mod decode;
pub mod walker;

pub use client::{ApiClient, AttendeePage};
pub use walker::{ScrapeProgress, SilentProgress, Walker};
