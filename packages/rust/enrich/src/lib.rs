//! LinkedIn enrichment for scraped attendee profiles.
//!
//! Uses a web-search API (Google Custom Search) to find public LinkedIn
//! profile URLs for attendees the backend did not supply one for. Configure
//! a compliant search API and respect its terms of service and rate limits.

pub mod matcher;

pub use matcher::{EnrichOutcome, EnrichProgress, Matcher, SilentEnrichProgress};
