//! HTTP client for the conference backend attendee endpoints.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE, HeaderMap, HeaderValue};
use tracing::{debug, instrument};

use confscrape_shared::{Config, ConfscrapeError, Profile, Result};

use crate::decode::{AttendeeDetailResponse, AttendeeListResponse, profile_from_detail};

/// User-Agent string for backend requests.
const USER_AGENT: &str = concat!("confscrape/", env!("CARGO_PKG_VERSION"));

/// Versioned vendor media type expected by the backend.
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.brella.v4+json";

// ---------------------------------------------------------------------------
// AttendeePage
// ---------------------------------------------------------------------------

/// One page of attendee stubs plus the continuation flag.
#[derive(Debug, Clone)]
pub struct AttendeePage {
    /// Stub profiles carrying only backend ids; entries with empty ids are
    /// dropped here.
    pub stubs: Vec<Profile>,
    /// Continuation heuristic: true iff the raw item count equals the
    /// requested page size. An exactly-full final page yields one extra
    /// empty-page call before the walk terminates.
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Client for the conference backend attendee endpoints.
///
/// Auth and vendor headers are attached to every outgoing request; the
/// underlying connection pool is reused across all calls. No retries.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
        headers.insert("x-brella-media-type", header_value(&config.media_type)?);

        if let Some(token) = &config.auth_token {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        }
        if let Some(value) = &config.access_token {
            headers.insert("access-token", header_value(value)?);
        }
        if let Some(value) = &config.client_id {
            headers.insert("client", header_value(value)?);
        }
        if let Some(value) = &config.uid {
            headers.insert("uid", header_value(value)?);
        }
        if let Some(cookie) = &config.session_cookie {
            // The config holds just the cookie value, not a Set-Cookie string.
            headers.insert(COOKIE, header_value(&format!("_brella_session={cookie}"))?);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfscrapeError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }

    /// Fetch one page of attendee stubs for an event.
    #[instrument(skip(self))]
    pub async fn list_attendees(
        &self,
        event_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<AttendeePage> {
        if event_id.is_empty() {
            return Err(ConfscrapeError::validation("event id is empty"));
        }

        // The backend expects literal brackets in the page parameters, so the
        // query string is assembled by hand rather than percent-encoded.
        let url = format!(
            "{}/api/events/{}/attendees?ignore_networking=true&order=newest&page[number]={}&page[size]={}&search=",
            self.base_url, event_id, page, page_size
        );

        let body = self.get_ok(&url).await?;
        let list: AttendeeListResponse = serde_json::from_str(&body)
            .map_err(|e| ConfscrapeError::Decode(format!("attendees list: {e}")))?;

        let raw_count = list.data.len();
        let stubs: Vec<Profile> = list
            .data
            .into_iter()
            .filter(|item| !item.id.is_empty())
            .map(|item| Profile::stub(item.id))
            .collect();

        debug!(page, raw_count, stubs = stubs.len(), "listed attendee page");

        Ok(AttendeePage {
            stubs,
            has_more: raw_count == page_size as usize,
        })
    }

    /// Fetch the detailed profile for a single attendee.
    #[instrument(skip(self))]
    pub async fn attendee_detail(&self, event_id: &str, attendee_id: &str) -> Result<Profile> {
        if event_id.is_empty() {
            return Err(ConfscrapeError::validation("event id is empty"));
        }
        if attendee_id.is_empty() {
            return Err(ConfscrapeError::validation("attendee id is empty"));
        }

        let url = format!(
            "{}/api/events/{}/attendees/{}",
            self.base_url, event_id, attendee_id
        );

        let body = self.get_ok(&url).await?;
        let detail: AttendeeDetailResponse = serde_json::from_str(&body)
            .map_err(|e| ConfscrapeError::Decode(format!("attendee detail: {e}")))?;

        Ok(profile_from_detail(detail))
    }

    /// Issue one GET and return the body of an OK response.
    async fn get_ok(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ConfscrapeError::Request(format!("{url}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ConfscrapeError::status(status.as_u16(), body));
        }

        response
            .text()
            .await
            .map_err(|e| ConfscrapeError::Request(format!("{url}: body read failed: {e}")))
    }
}

/// Convert a configured string into a header value.
fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ConfscrapeError::config(format!("invalid header value: {e}")))
}
