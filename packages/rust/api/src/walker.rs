//! Full-collection enumeration: walks listing pages and expands every stub
//! into a detailed profile.

use std::time::Duration;

use tracing::{debug, info, instrument};

use confscrape_shared::{ConfscrapeError, Profile, Result};

use crate::client::ApiClient;

/// Page size applied when the caller passes 0.
const DEFAULT_PAGE_SIZE: u32 = 50;

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callbacks for scrape reporting.
pub trait ScrapeProgress: Send + Sync {
    /// Called after a listing page has been fetched.
    fn page_listed(&self, page: u32, stub_count: usize);
    /// Called after each attendee detail fetch.
    fn attendee_fetched(&self, attendee_id: &str, collected: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ScrapeProgress for SilentProgress {
    fn page_listed(&self, _page: u32, _stub_count: usize) {}
    fn attendee_fetched(&self, _attendee_id: &str, _collected: usize) {}
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Walks the attendee collection of one event, page by page.
pub struct Walker<'a> {
    client: &'a ApiClient,
    event_id: String,
    page_size: u32,
    request_delay: Duration,
}

impl<'a> Walker<'a> {
    /// Create a walker. A `page_size` of 0 falls back to the default of 50.
    pub fn new(
        client: &'a ApiClient,
        event_id: impl Into<String>,
        page_size: u32,
        request_delay: Duration,
    ) -> Self {
        Self {
            client,
            event_id: event_id.into(),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            request_delay,
        }
    }

    /// Collect detailed profiles across all pages, in listing order.
    ///
    /// Starting at page 1, the walk stops at the optional `max_pages`
    /// ceiling (0 means unlimited), on a page with zero stubs, or when the
    /// continuation flag goes false after the page's entries are processed.
    /// Any list or detail error aborts the walk and propagates unchanged;
    /// partial results are discarded here.
    #[instrument(skip_all, fields(event_id = %self.event_id, max_pages))]
    pub async fn scrape_all(
        &self,
        max_pages: u32,
        progress: &dyn ScrapeProgress,
    ) -> Result<Vec<Profile>> {
        if self.event_id.is_empty() {
            return Err(ConfscrapeError::validation("event id is empty"));
        }

        let mut all: Vec<Profile> = Vec::new();
        let mut page: u32 = 1;

        loop {
            if max_pages > 0 && page > max_pages {
                break;
            }

            debug!(page, page_size = self.page_size, "fetching listing page");

            let listed = self
                .client
                .list_attendees(&self.event_id, page, self.page_size)
                .await?;

            if listed.stubs.is_empty() {
                debug!(page, "page returned no attendees, stopping");
                break;
            }

            progress.page_listed(page, listed.stubs.len());

            for stub in &listed.stubs {
                if stub.id.is_empty() {
                    continue;
                }

                let profile = self.client.attendee_detail(&self.event_id, &stub.id).await?;
                all.push(profile);
                progress.attendee_fetched(&stub.id, all.len());

                if !self.request_delay.is_zero() {
                    tokio::time::sleep(self.request_delay).await;
                }
            }

            if !listed.has_more {
                break;
            }

            page += 1;
        }

        info!(profiles = all.len(), "scrape finished");

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confscrape_shared::Config;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_base_url: server.uri(),
            event_id: "AMS25".into(),
            auth_token: None,
            access_token: None,
            client_id: None,
            uid: None,
            session_cookie: None,
            media_type: "brella.latest".into(),
            request_delay: Duration::ZERO,
            search_api_key: None,
            search_engine_id: None,
            search_delay: Duration::ZERO,
        };
        ApiClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    fn detail_body(id: &str, first: &str, last: &str) -> String {
        format!(
            r#"{{
                "data": {{
                    "id": "{id}",
                    "relationships": {{ "user": {{ "data": {{ "id": "u-{id}", "type": "user" }} }} }}
                }},
                "included": [{{
                    "id": "u-{id}",
                    "type": "user",
                    "attributes": {{ "first-name": "{first}", "last-name": "{last}" }}
                }}]
            }}"#
        )
    }

    async fn mount_detail(server: &MockServer, id: &str, first: &str, last: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/events/AMS25/attendees/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_body(id, first, last)))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn walks_two_pages_in_order_without_a_third_listing_call() {
        let server = MockServer::start().await;

        // Page 1 is exactly full (2 of 2), page 2 is short (1 of 2): the
        // walk must end after page 2 without requesting page 3.
        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees"))
            .and(query_param("page[number]", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":"a"},{"id":"b"}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":"c"}]}"#))
            .expect(1)
            .mount(&server)
            .await;

        mount_detail(&server, "a", "Ada", "Lovelace").await;
        mount_detail(&server, "b", "Bob", "Smith").await;
        mount_detail(&server, "c", "Cleo", "Jones").await;

        let client = client_for(&server);
        let walker = Walker::new(&client, "AMS25", 2, Duration::ZERO);
        let profiles = walker.scrape_all(0, &SilentProgress).await.unwrap();

        let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(profiles[0].name, "Ada Lovelace");

        // Exactly three listing + three detail requests, no page 3.
        assert_eq!(server.received_requests().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn empty_first_page_stops_immediately() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let walker = Walker::new(&client, "AMS25", 50, Duration::ZERO);
        let profiles = walker.scrape_all(0, &SilentProgress).await.unwrap();
        assert!(profiles.is_empty());
    }

    #[tokio::test]
    async fn page_limit_caps_the_walk() {
        let server = MockServer::start().await;

        // Every page is exactly full; only the limit ends the walk.
        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":"a"}]}"#))
            .expect(1)
            .mount(&server)
            .await;

        mount_detail(&server, "a", "Ada", "Lovelace").await;

        let client = client_for(&server);
        let walker = Walker::new(&client, "AMS25", 1, Duration::ZERO);
        let profiles = walker.scrape_all(1, &SilentProgress).await.unwrap();
        assert_eq!(profiles.len(), 1);
    }

    #[tokio::test]
    async fn never_fetches_detail_for_empty_stub_ids() {
        let server = MockServer::start().await;

        // Raw count 1 at page size 50: no continuation, and the only entry
        // has an empty id, so no detail request may go out.
        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":""}]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let walker = Walker::new(&client, "AMS25", 50, Duration::ZERO);
        let profiles = walker.scrape_all(0, &SilentProgress).await.unwrap();

        assert!(profiles.is_empty());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn detail_error_aborts_the_walk() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":"a"}]}"#))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/events/AMS25/attendees/a"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let walker = Walker::new(&client, "AMS25", 50, Duration::ZERO);
        let err = walker.scrape_all(0, &SilentProgress).await.unwrap_err();
        assert!(matches!(err, ConfscrapeError::Status { code: 500, .. }));
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        // Constructed without a server; only the stored page size matters.
        let config = Config {
            api_base_url: "http://unused.invalid".into(),
            event_id: "AMS25".into(),
            auth_token: None,
            access_token: None,
            client_id: None,
            uid: None,
            session_cookie: None,
            media_type: "brella.latest".into(),
            request_delay: Duration::ZERO,
            search_api_key: None,
            search_engine_id: None,
            search_delay: Duration::ZERO,
        };
        let client = ApiClient::new(&config, Duration::from_secs(5)).unwrap();
        let walker = Walker::new(&client, "AMS25", 0, Duration::ZERO);
        assert_eq!(walker.page_size, 50);
    }
}
