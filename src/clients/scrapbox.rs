use reqwest::{Client, StatusCode};
use std::time::Instant;
use thiserror::Error;

use crate::domain::{Page, PageList, SearchPageList};
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::make_http_client;

const API_BASE_URL: &str = "https://scrapbox.io/api";
// Page-creation links point at the site itself, not the API host.
const SITE_BASE_URL: &str = "https://scrapbox.io";

/// Failure taxonomy for upstream calls. The display text is the stable,
/// user-visible message; the wrapped source keeps the cause for logs.
#[derive(Debug, Error)]
pub enum ScrapboxError {
    /// The request never completed (DNS, connect, timeout, cancellation).
    #[error("failed to send request")]
    Transport(#[source] reqwest::Error),
    /// A response arrived with a status other than 200. Carries the literal
    /// code so callers can tell 404 from 500 without string parsing.
    #[error("unexpected status code")]
    Status(u16),
    /// A 200 response whose body did not match the expected shape.
    #[error("failed to decode response")]
    Decode(#[source] reqwest::Error),
}

impl ScrapboxError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ScrapboxError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Authenticated client for one project. Safe to clone and share across
/// concurrent tool calls; all fields are immutable after construction.
/// No Debug impl: the session credential must stay out of logs.
#[derive(Clone)]
pub struct ScrapboxClient {
    http: Client,
    base_url: String,
    project: String,
    sid: String,
}

impl ScrapboxClient {
    pub fn new(project: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            http: make_http_client(),
            base_url: API_BASE_URL.to_string(),
            project: project.into(),
            sid: sid.into(),
        }
    }

    /// Point the client at a different API host (self-hosted or stub).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    pub async fn get_page(&self, title: &str) -> Result<Page, ScrapboxError> {
        let url = format!(
            "{}/pages/{}/{}",
            self.base_url,
            self.project,
            path_escape(title)
        );
        self.get_json(&url).await
    }

    /// The upstream caps this listing at 1000 pages; that ceiling is the
    /// remote service's, not checked here.
    pub async fn list_pages(&self) -> Result<PageList, ScrapboxError> {
        let url = format!("{}/pages/{}", self.base_url, self.project);
        self.get_json(&url).await
    }

    /// Full-text search. Results decode into the flat-line search shape,
    /// never into [`PageList`]. Upstream caps results at 100 pages.
    pub async fn search_pages(&self, query: &str) -> Result<SearchPageList, ScrapboxError> {
        let url = format!(
            "{}/pages/{}/search/query?q={}",
            self.base_url,
            self.project,
            query_escape(query)
        );
        self.get_json(&url).await
    }

    /// Build a link that opens the page editor with an optional prefilled
    /// body. Pure string work, no request is sent.
    pub fn create_page_url(&self, title: &str, body_text: &str) -> String {
        let mut url = format!("{}/{}/{}", SITE_BASE_URL, self.project, path_escape(title));
        if !body_text.is_empty() {
            url.push_str("?body=");
            url.push_str(&query_escape(body_text));
        }
        url
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, ScrapboxError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(endpoint = %url, "scrapbox request");
        let start = Instant::now();
        let res = async {
            let resp = add_standard_headers(self.http.get(url), &self.sid)
                .send()
                .await
                .map_err(ScrapboxError::Transport)?;
            let status = resp.status();
            tracing::debug!(endpoint = %url, status = status.as_u16(), "scrapbox response");
            if status != StatusCode::OK {
                return Err(ScrapboxError::Status(status.as_u16()));
            }
            resp.json::<T>().await.map_err(ScrapboxError::Decode)
        }
        .await;
        if res.is_err() {
            crate::infra::logging::log_metric("scrapbox.api", "remote_error_total", 1.0);
        } else {
            let elapsed_ms = start.elapsed().as_millis() as f64;
            crate::infra::logging::log_metric("scrapbox.api", "remote_latency_ms", elapsed_ms);
        }
        res
    }
}

/// Percent-encode a path segment. Space becomes `%20`.
fn path_escape(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Form-encode a query component. Space becomes `+`, `&` becomes `%26`.
fn query_escape(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client(base: &str) -> ScrapboxClient {
        ScrapboxClient::new("testproject", "dummy-sid").with_base_url(base)
    }

    #[test]
    fn path_escape_uses_percent_twenty() {
        assert_eq!(path_escape("Test Page"), "Test%20Page");
        assert_eq!(path_escape("日本語"), "%E6%97%A5%E6%9C%AC%E8%AA%9E");
    }

    #[test]
    fn query_escape_uses_plus_and_encodes_ampersand() {
        assert_eq!(query_escape("test & text"), "test+%26+text");
        assert_eq!(query_escape("plain"), "plain");
    }

    #[tokio::test]
    async fn get_page_decodes_and_sends_session_cookie() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/pages/testproject/TestTitle")
                .header("cookie", "connect.sid=dummy-sid");
            then.status(200)
                .json_body(json!({"title":"TestTitle","lines":[{"text":"line1"}]}));
        });

        let page = test_client(&server.base_url())
            .get_page("TestTitle")
            .await
            .unwrap();
        m.assert();

        assert_eq!(page.title, "TestTitle");
        assert_eq!(page.lines.len(), 1);
        assert_eq!(page.lines[0].text, "line1");
    }

    #[tokio::test]
    async fn get_page_escapes_title_in_path() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/pages/testproject/Test%20Page");
            then.status(200)
                .json_body(json!({"title":"Test Page","lines":[]}));
        });

        let page = test_client(&server.base_url())
            .get_page("Test Page")
            .await
            .unwrap();
        m.assert();
        assert_eq!(page.title, "Test Page");
    }

    #[tokio::test]
    async fn get_page_maps_non_200_to_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pages/testproject/Missing");
            then.status(404).body("not found");
        });

        let err = test_client(&server.base_url())
            .get_page("Missing")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "unexpected status code");
    }

    #[tokio::test]
    async fn list_and_search_map_non_200_to_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404).body("not found");
        });

        let client = test_client(&server.base_url());
        let list_err = client.list_pages().await.unwrap_err();
        assert_eq!(list_err.status(), Some(404));
        assert_eq!(list_err.to_string(), "unexpected status code");

        let search_err = client.search_pages("x").await.unwrap_err();
        assert_eq!(search_err.status(), Some(404));
        assert_eq!(search_err.to_string(), "unexpected status code");
    }

    #[tokio::test]
    async fn list_pages_decodes_page_list() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/pages/testproject")
                .header("cookie", "connect.sid=dummy-sid");
            then.status(200).json_body(json!({
                "pages":[
                    {"title":"First","lines":[{"text":"a","created":1,"updated":2}]},
                    {"title":"Second","lines":[]}
                ]
            }));
        });

        let list = test_client(&server.base_url()).list_pages().await.unwrap();
        m.assert();
        assert_eq!(list.pages.len(), 2);
        assert_eq!(list.pages[0].title, "First");
        assert_eq!(list.pages[0].lines[0].created, 1);
    }

    #[tokio::test]
    async fn search_pages_decodes_flat_lines_and_escapes_query() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/pages/testproject/search/query")
                .query_param("q", "foo bar");
            then.status(200).json_body(json!({
                "pages":[{"title":"Hit","lines":["foo bar baz","second match"]}]
            }));
        });

        let result = test_client(&server.base_url())
            .search_pages("foo bar")
            .await
            .unwrap();
        m.assert();
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.pages[0].lines, vec!["foo bar baz", "second match"]);
    }

    #[tokio::test]
    async fn get_page_maps_bad_body_to_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pages/testproject/Broken");
            then.status(200).body("not json at all");
        });

        let err = test_client(&server.base_url())
            .get_page("Broken")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapboxError::Decode(_)));
        assert_eq!(err.to_string(), "failed to decode response");
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_transport_error() {
        // Nothing listens on port 1.
        let err = test_client("http://127.0.0.1:1")
            .get_page("X")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapboxError::Transport(_)));
        assert_eq!(err.to_string(), "failed to send request");
    }

    #[test]
    fn create_page_url_escapes_path_and_query_distinctly() {
        let client = ScrapboxClient::new("testproject", "dummy-sid");
        assert_eq!(
            client.create_page_url("Test Page", "test & text"),
            "https://scrapbox.io/testproject/Test%20Page?body=test+%26+text"
        );
    }

    #[test]
    fn create_page_url_omits_body_when_empty() {
        let client = ScrapboxClient::new("testproject", "dummy-sid");
        assert_eq!(
            client.create_page_url("NewPage", ""),
            "https://scrapbox.io/testproject/NewPage"
        );
    }

    #[tokio::test]
    async fn create_page_url_is_pure_and_deterministic() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });

        // Even a client pointed at a live stub must not touch the network.
        let client = test_client(&server.base_url());
        let first = client.create_page_url("Page", "body");
        let second = client.create_page_url("Page", "body");
        assert_eq!(first, second);
        assert_eq!(first, "https://scrapbox.io/testproject/Page?body=body");
        m.assert_hits(0);
    }
}
