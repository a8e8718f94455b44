//! Environment-sourced runtime configuration.
//!
//! All settings come from `CONFSCRAPE_*` environment variables; the per-run
//! knobs (paths, page limits, timeout) are CLI flags instead. Loading goes
//! through an injectable variable lookup so tests never touch the process
//! environment.

use std::time::Duration;

use crate::error::{ConfscrapeError, Result};

const ENV_API_BASE_URL: &str = "CONFSCRAPE_API_BASE_URL";
const ENV_EVENT_ID: &str = "CONFSCRAPE_EVENT_ID";
const ENV_AUTH_TOKEN: &str = "CONFSCRAPE_API_AUTH_TOKEN";
const ENV_ACCESS_TOKEN: &str = "CONFSCRAPE_ACCESS_TOKEN";
const ENV_CLIENT: &str = "CONFSCRAPE_CLIENT";
const ENV_UID: &str = "CONFSCRAPE_UID";
const ENV_SESSION_COOKIE: &str = "CONFSCRAPE_SESSION_COOKIE";
const ENV_MEDIA_TYPE: &str = "CONFSCRAPE_MEDIA_TYPE";
const ENV_REQUEST_DELAY_MS: &str = "CONFSCRAPE_REQUEST_DELAY_MS";
const ENV_SEARCH_API_KEY: &str = "CONFSCRAPE_SEARCH_API_KEY";
const ENV_SEARCH_ENGINE_ID: &str = "CONFSCRAPE_SEARCH_ENGINE_ID";
const ENV_SEARCH_DELAY_MS: &str = "CONFSCRAPE_SEARCH_DELAY_MS";

/// Default `x-brella-media-type` header value.
const DEFAULT_MEDIA_TYPE: &str = "brella.latest";

/// Default pause between backend detail fetches.
const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Default pause between search API profiles.
const DEFAULT_SEARCH_DELAY_MS: u64 = 1000;

/// Runtime configuration, loaded from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the conference backend, e.g. `https://api.brella.io`.
    pub api_base_url: String,

    /// Identifier of the event whose attendees are scraped, e.g. `AMS25`.
    pub event_id: String,

    /// Optional bearer token for the `Authorization` header.
    pub auth_token: Option<String>,

    /// Optional vendor `access-token` header.
    pub access_token: Option<String>,

    /// Optional vendor `client` header.
    pub client_id: Option<String>,

    /// Optional vendor `uid` header.
    pub uid: Option<String>,

    /// Optional raw `_brella_session` cookie value.
    pub session_cookie: Option<String>,

    /// Value for the `x-brella-media-type` header.
    pub media_type: String,

    /// Pause between backend detail fetches. Zero disables the pause.
    pub request_delay: Duration,

    /// Search API key; enrichment needs both this and the engine id.
    pub search_api_key: Option<String>,

    /// Search engine identifier (the Custom Search `cx` parameter).
    pub search_engine_id: Option<String>,

    /// Pause between search API profiles. Zero disables the pause.
    pub search_delay: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = require(&lookup, ENV_API_BASE_URL)?;
        let event_id = require(&lookup, ENV_EVENT_ID)?;

        Ok(Self {
            api_base_url,
            event_id,
            auth_token: optional(&lookup, ENV_AUTH_TOKEN),
            access_token: optional(&lookup, ENV_ACCESS_TOKEN),
            client_id: optional(&lookup, ENV_CLIENT),
            uid: optional(&lookup, ENV_UID),
            session_cookie: optional(&lookup, ENV_SESSION_COOKIE),
            media_type: optional(&lookup, ENV_MEDIA_TYPE)
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
            request_delay: delay_ms(&lookup, ENV_REQUEST_DELAY_MS, DEFAULT_REQUEST_DELAY_MS),
            search_api_key: optional(&lookup, ENV_SEARCH_API_KEY),
            search_engine_id: optional(&lookup, ENV_SEARCH_ENGINE_ID),
            search_delay: delay_ms(&lookup, ENV_SEARCH_DELAY_MS, DEFAULT_SEARCH_DELAY_MS),
        })
    }

    /// Whether LinkedIn enrichment is configured at all.
    pub fn search_enabled(&self) -> bool {
        self.search_api_key.is_some() && self.search_engine_id.is_some()
    }
}

/// Fetch a required variable; empty counts as unset.
fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    optional(lookup, key).ok_or_else(|| ConfscrapeError::config(format!("{key} is not set")))
}

/// Fetch an optional variable, normalizing empty to `None`.
fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

/// Parse a millisecond delay variable, falling back to `default_ms` when the
/// variable is unset or unparseable. An explicit `0` disables the pause.
fn delay_ms(lookup: &impl Fn(&str) -> Option<String>, key: &str, default_ms: u64) -> Duration {
    let ms = optional(lookup, key)
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
