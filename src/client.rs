use crate::{
    bookmarks::{Bookmark, BookmarksPage},
    errors::LinkdownError,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, trace};
use parking_lot::Mutex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client as ReqwestClient, StatusCode, Url,
};
use std::{fmt, sync::Arc, time::Duration};

/// The number of bookmarks requested per page.
pub const PAGE_SIZE: usize = 100;

/// The default request timeout in seconds.
pub const REQUEST_TIMEOUT_DEFAULT: u64 = 30;

/// The filter applied to the bookmark collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BookmarkQuery {
    /// The search text, sent as `q` if not empty.
    pub query: String,
    /// Only bookmarks added since this time.
    pub added_since: Option<DateTime<Utc>>,
    /// Only bookmarks modified since this time.
    pub modified_since: Option<DateTime<Utc>>,
}

impl BookmarkQuery {
    pub fn new(
        query: &str,
        added_since: Option<DateTime<Utc>>,
        modified_since: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            query: query.to_owned(),
            added_since,
            modified_since,
        }
    }

    /// The query parameters for a single page request.
    pub fn params(&self, limit: usize, offset: usize) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if !self.query.is_empty() {
            params.push(("q", self.query.clone()));
        }

        if let Some(added_since) = self.added_since {
            params.push((
                "added_since",
                added_since.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        if let Some(modified_since) = self.modified_since {
            params.push((
                "modified_since",
                modified_since.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        if limit > 0 {
            params.push(("limit", limit.to_string()));
        }

        if offset > 0 {
            params.push(("offset", offset.to_string()));
        }

        params
    }
}

/// A trait to fetch bookmarks from a real or mock client.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a single page of bookmarks.
    async fn fetch_page(
        &self,
        query: &BookmarkQuery,
        limit: usize,
        offset: usize,
    ) -> Result<BookmarksPage, LinkdownError>;

    /// Fetch all bookmarks matching the query, page by page.
    ///
    /// Pages are requested sequentially until a page is empty or shorter than
    /// [`PAGE_SIZE`]. The bookmarks are returned in the order they arrived.
    /// If any page fails, the whole fetch fails.
    async fn fetch_all(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, LinkdownError> {
        let mut bookmarks = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(query, PAGE_SIZE, offset).await?;
            let page_len = page.len();
            debug!(
                "Fetched {page_len} bookmarks at offset {offset} (total: {})",
                page.count
            );

            if page.is_empty() {
                break;
            }

            bookmarks.extend(page.results);

            if page_len < PAGE_SIZE {
                break;
            }

            offset += PAGE_SIZE;
        }

        Ok(bookmarks)
    }
}

/// The connection settings for the linkding API.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    /// The url of the linkding instance.
    pub base_url: String,
    /// The API token.
    pub token: String,
    /// The request timeout per page.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.to_owned(),
            token: token.to_owned(),
            timeout,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A client for the linkding REST API.
#[derive(Debug, Clone)]
pub struct Client {
    client: ReqwestClient,
    endpoint: Url,
}

impl Client {
    pub fn new(config: &ClientConfig) -> Result<Self, LinkdownError> {
        if config.base_url.is_empty() {
            return Err(LinkdownError::Configuration(
                "linkding url is required (--url or config file)".to_owned(),
            ));
        }

        if config.token.is_empty() {
            return Err(LinkdownError::Configuration(
                "linkding API token is required (--token or config file)".to_owned(),
            ));
        }

        let endpoint = Url::parse(&format!(
            "{}/api/bookmarks/",
            config.base_url.trim_end_matches('/')
        ))?;

        let mut authorization = HeaderValue::from_str(&format!("Token {}", config.token))
            .map_err(|_| {
                LinkdownError::Configuration("API token contains invalid characters".to_owned())
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(LinkdownError::CreateClient)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Fetch for Client {
    async fn fetch_page(
        &self,
        query: &BookmarkQuery,
        limit: usize,
        offset: usize,
    ) -> Result<BookmarksPage, LinkdownError> {
        let params = query.params(limit, offset);
        debug!("Fetch bookmarks from {} with {params:?}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await
            .map_err(|err| LinkdownError::Connection { offset, err })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| LinkdownError::Connection { offset, err })?;
        trace!("Response body: {}", String::from_utf8_lossy(&body));

        if status != StatusCode::OK {
            return Err(LinkdownError::Api {
                offset,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice::<BookmarksPage>(&body)
            .map_err(|err| LinkdownError::Decode { offset, err })
    }
}

/// A mock client serving predefined pages, used in testing.
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    pages: Vec<Vec<Bookmark>>,
    /// Offsets answered with the given status code instead of a page.
    failures: Vec<(usize, u16)>,
    requested_offsets: Arc<Mutex<Vec<usize>>>,
}

impl MockClient {
    /// Serve the given pages in order; page `n` answers offset `n * limit`.
    pub fn new(pages: Vec<Vec<Bookmark>>) -> Self {
        Self {
            pages,
            failures: Vec::new(),
            requested_offsets: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Split the bookmarks into pages of [`PAGE_SIZE`].
    pub fn from_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        let pages = bookmarks
            .chunks(PAGE_SIZE)
            .map(|chunk| chunk.to_vec())
            .collect();
        Self::new(pages)
    }

    /// Answer the request at `offset` with the HTTP `status`.
    pub fn fail_at(mut self, offset: usize, status: u16) -> Self {
        self.failures.push((offset, status));
        self
    }

    /// The offsets requested so far, in order.
    pub fn requested_offsets(&self) -> Vec<usize> {
        self.requested_offsets.lock().clone()
    }
}

#[async_trait]
impl Fetch for MockClient {
    async fn fetch_page(
        &self,
        _query: &BookmarkQuery,
        limit: usize,
        offset: usize,
    ) -> Result<BookmarksPage, LinkdownError> {
        self.requested_offsets.lock().push(offset);

        if let Some((_, status)) = self.failures.iter().find(|(at, _)| *at == offset) {
            return Err(LinkdownError::Api {
                offset,
                status: *status,
                body: String::new(),
            });
        }

        let count = self.pages.iter().map(|page| page.len()).sum();
        let results = if limit == 0 {
            Vec::new()
        } else {
            self.pages.get(offset / limit).cloned().unwrap_or_default()
        };

        Ok(BookmarksPage::new(count, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param, query_param_is_missing},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_config(base_url: &str) -> ClientConfig {
        ClientConfig::new(base_url, "secret-token", Duration::from_secs(5))
    }

    fn page_json(ids: std::ops::Range<u64>) -> serde_json::Value {
        test_utils::page_json(
            ids.map(|id| test_utils::bookmark_json(id, "2025-01-01T00:00:00Z"))
                .collect(),
        )
    }

    fn ids(bookmarks: &[Bookmark]) -> Vec<u64> {
        bookmarks.iter().map(|bookmark| bookmark.id()).collect()
    }

    #[test]
    fn test_params_default() {
        let query = BookmarkQuery::default();
        assert_eq!(query.params(100, 0), vec![("limit", "100".to_owned())]);
    }

    #[test]
    fn test_params_all() {
        let added_since = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let modified_since = Utc.with_ymd_and_hms(2025, 1, 31, 12, 30, 0).unwrap();
        let query = BookmarkQuery::new("rust lang", Some(added_since), Some(modified_since));

        assert_eq!(
            query.params(100, 200),
            vec![
                ("q", "rust lang".to_owned()),
                ("added_since", "2025-01-01T00:00:00Z".to_owned()),
                ("modified_since", "2025-01-31T12:30:00Z".to_owned()),
                ("limit", "100".to_owned()),
                ("offset", "200".to_owned()),
            ]
        );
    }

    #[test]
    fn test_client_config_debug_redacts_token() {
        let config = client_config("https://linkding.example.com");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_client_missing_url() {
        let res = Client::new(&client_config(""));
        assert_matches!(res, Err(LinkdownError::Configuration(_)));
    }

    #[test]
    fn test_client_missing_token() {
        let config = ClientConfig::new("https://linkding.example.com", "", Duration::from_secs(5));
        let res = Client::new(&config);
        assert_matches!(res, Err(LinkdownError::Configuration(_)));
    }

    #[test]
    fn test_client_invalid_url() {
        let res = Client::new(&client_config("not a url"));
        assert_matches!(res, Err(LinkdownError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_endpoint() {
        let client = Client::new(&client_config("https://linkding.example.com/")).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://linkding.example.com/api/bookmarks/"
        );

        let client = Client::new(&client_config("https://example.com/linkding")).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://example.com/linkding/api/bookmarks/"
        );
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_page_order() {
        let pages = vec![
            test_utils::bookmarks(100..200),
            test_utils::bookmarks(0..100),
            test_utils::bookmarks(500..507),
        ];
        let expected = pages.concat();
        let client = MockClient::new(pages);

        let bookmarks = client.fetch_all(&BookmarkQuery::default()).await.unwrap();

        assert_eq!(bookmarks, expected);
        assert_eq!(client.requested_offsets(), vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_duplicates() {
        let page = test_utils::bookmarks(0..3);
        let client = MockClient::new(vec![[page.clone(), page].concat()]);

        let bookmarks = client.fetch_all(&BookmarkQuery::default()).await.unwrap();

        assert_eq!(ids(&bookmarks), vec![0, 1, 2, 0, 1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_short_last_page() {
        let client = MockClient::from_bookmarks(test_utils::bookmarks(0..250));

        let bookmarks = client.fetch_all(&BookmarkQuery::default()).await.unwrap();

        assert_eq!(bookmarks.len(), 250);
        assert_eq!(client.requested_offsets(), vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn test_fetch_all_exact_multiple_of_page_size() {
        let client = MockClient::from_bookmarks(test_utils::bookmarks(0..200));

        let bookmarks = client.fetch_all(&BookmarkQuery::default()).await.unwrap();

        assert_eq!(bookmarks.len(), 200);
        assert_eq!(client.requested_offsets(), vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn test_fetch_all_empty() {
        let client = MockClient::new(vec![]);

        let bookmarks = client.fetch_all(&BookmarkQuery::default()).await.unwrap();

        assert!(bookmarks.is_empty());
        assert_eq!(client.requested_offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_on_error() {
        let client = MockClient::from_bookmarks(test_utils::bookmarks(0..250)).fail_at(100, 500);

        let res = client.fetch_all(&BookmarkQuery::default()).await;

        assert_matches!(
            res,
            Err(LinkdownError::Api {
                offset: 100,
                status: 500,
                ..
            })
        );
        assert_eq!(client.requested_offsets(), vec![0, 100]);
    }

    #[tokio::test]
    async fn test_fetch_page_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .and(header("Authorization", "Token secret-token"))
            .and(header("Accept", "application/json"))
            .and(query_param("q", "#rust"))
            .and(query_param("added_since", "2025-01-01T00:00:00Z"))
            .and(query_param("limit", "100"))
            .and(query_param_is_missing("offset"))
            .and(query_param_is_missing("modified_since"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1..3)))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();
        let added_since = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let query = BookmarkQuery::new("#rust", Some(added_since), None);

        let page = client.fetch_page(&query, PAGE_SIZE, 0).await.unwrap();

        assert_eq!(ids(&page.results), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0..100)))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .and(query_param("offset", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(100..200)))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .and(query_param("offset", "200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(200..250)))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();

        let bookmarks = client.fetch_all(&BookmarkQuery::default()).await.unwrap();

        assert_eq!(ids(&bookmarks), (0..250).collect::<Vec<_>>());
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0..100)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .and(query_param("offset", "100"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();

        let res = client.fetch_all(&BookmarkQuery::default()).await;

        match res {
            Err(LinkdownError::Api {
                offset,
                status,
                body,
            }) => {
                assert_eq!(offset, 100);
                assert_eq!(status, 404);
                assert_eq!(body, "Not found");
            }
            res => panic!("Unexpected result: {res:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_unauthorized() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Invalid token."})),
            )
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();

        let res = client.fetch_page(&BookmarkQuery::default(), PAGE_SIZE, 0).await;

        assert_matches!(res, Err(LinkdownError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_invalid_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();

        let res = client.fetch_page(&BookmarkQuery::default(), PAGE_SIZE, 0).await;

        assert_matches!(res, Err(LinkdownError::Decode { offset: 0, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_unexpected_envelope() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bookmarks": []})))
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();

        let res = client.fetch_page(&BookmarkQuery::default(), PAGE_SIZE, 0).await;

        assert_matches!(res, Err(LinkdownError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_envelope_without_links() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})),
            )
            .mount(&mock_server)
            .await;
        let client = Client::new(&client_config(&mock_server.uri())).unwrap();

        let res = client.fetch_page(&BookmarkQuery::default(), PAGE_SIZE, 0).await;

        assert_matches!(res, Err(LinkdownError::Decode { offset: 0, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(0..1))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;
        let config = ClientConfig::new(
            &mock_server.uri(),
            "secret-token",
            Duration::from_millis(100),
        );
        let client = Client::new(&config).unwrap();

        let res = client.fetch_page(&BookmarkQuery::default(), PAGE_SIZE, 0).await;

        assert_matches!(res, Err(LinkdownError::Connection { offset: 0, .. }));
    }
}
