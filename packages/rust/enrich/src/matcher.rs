//! Best-effort LinkedIn URL discovery via the Google Custom Search JSON API.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use confscrape_shared::{Config, ConfscrapeError, Profile, Result};

/// Google Custom Search JSON API endpoint.
const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Results requested per search call.
const RESULTS_PER_QUERY: u32 = 10;

/// Substring marking a personal profile link.
const PERSONAL_PATTERN: &str = "linkedin.com/in/";

/// Substring marking any LinkedIn link.
const DOMAIN_PATTERN: &str = "linkedin.com/";

/// User-Agent string for search requests.
const USER_AGENT: &str = concat!("confscrape/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callbacks for enrichment reporting.
pub trait EnrichProgress: Send + Sync {
    /// Called before a profile's search attempts begin.
    fn profile_started(&self, name: &str, current: usize, total: usize);
    /// Called when a profile gained a primary URL.
    fn profile_matched(&self, name: &str, url: &str, alternatives: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentEnrichProgress;

impl EnrichProgress for SilentEnrichProgress {
    fn profile_started(&self, _name: &str, _current: usize, _total: usize) {}
    fn profile_matched(&self, _name: &str, _url: &str, _alternatives: usize) {}
}

// ---------------------------------------------------------------------------
// EnrichOutcome
// ---------------------------------------------------------------------------

/// Outcome of an enrichment pass.
///
/// Always carries the full profile sequence, enriched as far as the pass
/// got. When `error` is set the pass stopped early at the failing profile;
/// the caller can persist the partial sequence before propagating.
#[derive(Debug)]
pub struct EnrichOutcome {
    /// Best-effort profile sequence.
    pub profiles: Vec<Profile>,
    /// The error that stopped the pass, if any.
    pub error: Option<ConfscrapeError>,
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Matcher over a web-search API for public LinkedIn profile URLs.
pub struct Matcher {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    search_delay: Duration,
    enabled: bool,
}

impl Matcher {
    /// Build a matcher from the loaded configuration.
    ///
    /// When the search API key or engine id is missing, the matcher is
    /// disabled and [`Matcher::enrich_profiles`] is an identity pass.
    pub fn new(config: &Config, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfscrapeError::Request(format!("failed to build HTTP client: {e}")))?;

        let (api_key, engine_id) = match (&config.search_api_key, &config.search_engine_id) {
            (Some(key), Some(cx)) => (key.clone(), cx.clone()),
            _ => (String::new(), String::new()),
        };

        Ok(Self {
            client,
            endpoint: SEARCH_ENDPOINT.to_string(),
            enabled: !api_key.is_empty() && !engine_id.is_empty(),
            api_key,
            engine_id,
            search_delay: config.search_delay,
        })
    }

    /// Whether enrichment will actually run.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Point the matcher at a mock search endpoint.
    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Attach LinkedIn URLs to profiles lacking one.
    ///
    /// Profiles with a resolved URL or a blank name are left untouched.
    /// The first search failure stops the whole pass; the outcome still
    /// carries every profile so partial progress can be persisted.
    #[instrument(skip_all, fields(profiles = profiles.len()))]
    pub async fn enrich_profiles(
        &self,
        profiles: Vec<Profile>,
        progress: &dyn EnrichProgress,
    ) -> EnrichOutcome {
        if !self.enabled {
            info!("search API not configured; skipping LinkedIn enrichment");
            return EnrichOutcome {
                profiles,
                error: None,
            };
        }

        let total = profiles.len();
        let mut out = profiles;

        for i in 0..out.len() {
            if !out[i].linkedin_url.is_empty() || out[i].name.trim().is_empty() {
                continue;
            }

            progress.profile_started(&out[i].name, i + 1, total);

            let candidates = match self.find_candidates(&out[i]).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    // Stop on the first search error so the caller can
                    // persist partial results instead of hammering a
                    // quota- or auth-broken API.
                    warn!(name = %out[i].name, id = %out[i].id, error = %e, "search failed, stopping enrichment");
                    return EnrichOutcome {
                        profiles: out,
                        error: Some(e),
                    };
                }
            };

            if let Some((first, rest)) = candidates.split_first() {
                out[i].linkedin_url = first.clone();
                out[i].possible_linkedin_urls = rest.to_vec();
                progress.profile_matched(&out[i].name, first, rest.len());
                debug!(name = %out[i].name, url = %first, alternatives = rest.len(), "matched");
            } else {
                debug!(name = %out[i].name, id = %out[i].id, "no linkedin results");
            }

            if !self.search_delay.is_zero() {
                tokio::time::sleep(self.search_delay).await;
            }
        }

        EnrichOutcome {
            profiles: out,
            error: None,
        }
    }

    /// Run the query-variant cascade for one profile.
    ///
    /// Variants are tried in priority order; the first one yielding at
    /// least one candidate stops the cascade.
    async fn find_candidates(&self, profile: &Profile) -> Result<Vec<String>> {
        for (idx, query) in query_variants(profile).iter().enumerate() {
            debug!(name = %profile.name, variant = idx + 1, %query, "searching");

            let urls = self.search_once(query).await?;
            if !urls.is_empty() {
                if idx > 0 {
                    debug!(name = %profile.name, variant = idx + 1, "matched on fallback variant");
                }
                return Ok(urls);
            }
        }

        Ok(Vec::new())
    }

    /// Issue one search request and rank the returned links.
    async fn search_once(&self, query: &str) -> Result<Vec<String>> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ConfscrapeError::Request(format!("search endpoint: {e}")))?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("q", query)
            .append_pair("num", &RESULTS_PER_QUERY.to_string());

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ConfscrapeError::Request(format!("{url}: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ConfscrapeError::status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ConfscrapeError::Request(format!("{url}: body read failed: {e}")))?;

        let results: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| ConfscrapeError::Decode(format!("search response: {e}")))?;

        Ok(rank_candidates(results.items))
    }
}

// ---------------------------------------------------------------------------
// Query variants and candidate ranking
// ---------------------------------------------------------------------------

/// Ordered query variants for one profile, highest precision first.
fn query_variants(profile: &Profile) -> Vec<String> {
    let name = profile.name.trim();
    let company = profile.company.trim();

    let mut queries = Vec::new();
    if !name.is_empty() && !company.is_empty() {
        queries.push(format!("\"{name}\" \"{company}\" site:linkedin.com"));
    }
    if !name.is_empty() {
        queries.push(format!("\"{name}\" site:linkedin.com"));
        queries.push(format!("{name} site:linkedin.com"));
    }
    queries
}

/// Rank result links: personal profile links (`/in/`) first, then any other
/// LinkedIn links, each partition keeping its original relative order.
fn rank_candidates(items: Vec<SearchItem>) -> Vec<String> {
    let mut personal = Vec::new();
    let mut other = Vec::new();

    for item in items {
        let link = item.link.trim();
        if link.is_empty() {
            continue;
        }
        if link.contains(PERSONAL_PATTERN) {
            personal.push(link.to_string());
        } else if link.contains(DOMAIN_PATTERN) {
            other.push(link.to_string());
        }
    }

    personal.extend(other);
    personal
}

/// Minimal Custom Search response envelope: only result links are read.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    link: String,
}
