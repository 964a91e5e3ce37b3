//! Integration tests for the HTTP fetcher and the full crawl cycle
//!
//! These tests use wiremock to stand up real HTTP servers. The mock server
//! listens on loopback, which the crawler refuses to visit, so the crawl
//! tests route a public-looking origin to it through a proxying fetcher.

use site_survey::config::UserAgentConfig;
use site_survey::crawler::{
    Coordinator, CrawlReport, FetchResult, HttpFetcher, PageFetcher, ACCEPT_HTML,
};
use site_survey::state::PageState;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBLIC_ORIGIN: &str = "https://acme.test";

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/bot".to_string(),
    }
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&test_user_agent(), Duration::from_secs(5)).expect("client")
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><main><h1>{}</h1><p>{}</p><p>{}</p></main></body></html>",
        title,
        title,
        body,
        "Acme designs industrial widgets and ships them to customers around the world. ".repeat(3)
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html; charset=utf-8")
}

/// Sends requests for [`PUBLIC_ORIGIN`] to the mock server and maps final
/// URLs back, so the crawler sees an ordinary public site
struct ProxyFetcher {
    inner: HttpFetcher,
    upstream: Url,
}

impl ProxyFetcher {
    fn new(server: &MockServer) -> Self {
        Self {
            inner: fetcher(),
            upstream: Url::parse(&server.uri()).expect("mock uri"),
        }
    }

    fn rewrite(url: &Url, to: &Url) -> Url {
        let mut rewritten = to.clone();
        rewritten.set_path(url.path());
        rewritten.set_query(url.query());
        rewritten
    }
}

impl PageFetcher for ProxyFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        let public = Url::parse(PUBLIC_ORIGIN).expect("public origin");
        match self.inner.fetch(&Self::rewrite(url, &self.upstream)).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => FetchResult::Success {
                final_url: Self::rewrite(&final_url, &public),
                status_code,
                body,
            },
            other => other,
        }
    }
}

async fn crawl_through_proxy(server: &MockServer, max_pages: usize) -> CrawlReport {
    let coordinator: Coordinator<_> =
        Coordinator::new(ProxyFetcher::new(server), None).with_pacing(Duration::ZERO);
    coordinator.run(PUBLIC_ORIGIN, max_pages, None).await
}

#[tokio::test]
async fn test_fetch_html_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response(html_page("About", "We make widgets.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/about", mock_server.uri())).unwrap();
    match fetcher().fetch(&url).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(final_url, url);
            assert!(body.contains("We make widgets."));
        }
        other => panic!("Expected Success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_sends_user_agent_and_accept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/bot)",
        ))
        .and(header_exists("accept"))
        .respond_with(html_response(html_page("Home", "Hello.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
    let result = fetcher().fetch(&url).await;
    assert!(
        matches!(result, FetchResult::Success { .. }),
        "got {:?}",
        result
    );
    assert!(ACCEPT_HTML.starts_with("text/html"));
}

#[tokio::test]
async fn test_fetch_non_html_is_not_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/brochure.pdf", mock_server.uri())).unwrap();
    match fetcher().fetch(&url).await {
        FetchResult::NotHtml { content_type } => assert_eq!(content_type, "application/pdf"),
        other => panic!("Expected NotHtml, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_server_error_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/broken", mock_server.uri())).unwrap();
    let result = fetcher().fetch(&url).await;

    assert!(matches!(result, FetchResult::HttpError { status_code: 500 }));
    assert_eq!(
        result.failure_message("https://acme.test/broken").as_deref(),
        Some("Failed to fetch https://acme.test/broken: HTTP 500")
    );
}

#[tokio::test]
async fn test_fetch_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response(html_page("Slow", "Eventually.")).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_user_agent(), Duration::from_millis(200)).unwrap();
    let url = Url::parse(&format!("{}/slow", mock_server.uri())).unwrap();

    match fetcher.fetch(&url).await {
        FetchResult::Timeout { timeout_ms } => assert_eq!(timeout_ms, 200),
        other => panic!("Expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_refuses_redirect_to_private_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/go"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "http://169.254.169.254/latest/meta-data/"),
        )
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/go", mock_server.uri())).unwrap();
    match fetcher().fetch(&url).await {
        FetchResult::NetworkError { error } => {
            assert!(error.contains("private or internal"), "error: {}", error);
            assert!(error.contains("169.254.169.254"), "error: {}", error);
        }
        other => panic!("Expected NetworkError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused_is_network_error() {
    // Nothing listens on the discard port
    let url = Url::parse("http://127.0.0.1:9/").unwrap();
    let result = fetcher().fetch(&url).await;

    assert!(
        matches!(result, FetchResult::NetworkError { .. }),
        "got {:?}",
        result
    );
}

#[tokio::test]
async fn test_crawl_refuses_loopback_seed_without_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response(html_page("Home", "Should never be served.")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let coordinator: Coordinator<_> = Coordinator::new(fetcher(), None);
    let report = coordinator.run(&mock_server.uri(), 5, None).await;

    assert!(report.result.pages.is_empty());
    assert_eq!(report.result.errors.len(), 1);
    assert!(report.result.errors[0].starts_with("Refusing to crawl private or internal address"));
    assert_eq!(report.count(PageState::FetchBlockedPrivate), 1);
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page(
            "Acme Widgets",
            r#"Welcome.
            <a href="/about">About</a>
            <a href="/blog/launch">Launch post</a>
            <a href="/wp-admin/">Admin</a>
            <a href="mailto:hello@acme.test">Mail</a>
            <a href="https://partner.example.com/">Partner</a>
            <a href="https://www.linkedin.com/company/acme-widgets">LinkedIn</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response(html_page("About Acme", "Founded in 1999.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/blog/launch"))
        .respond_with(html_response(html_page("We launched", "Big news today.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp-admin/"))
        .respond_with(html_response(html_page("Admin", "Never fetched.")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = crawl_through_proxy(&mock_server, 10).await;
    let result = &report.result;

    let urls: Vec<&str> = result.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://acme.test",
            "https://acme.test/about",
            "https://acme.test/blog/launch"
        ]
    );
    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert_eq!(
        result.linkedin_url.as_deref(),
        Some("https://www.linkedin.com/company/acme-widgets")
    );
    assert!(result.spa_warning.is_none());

    let home = &result.pages[0];
    assert_eq!(home.title, "Acme Widgets");
    assert!(home
        .outbound_links
        .iter()
        .all(|link| link.starts_with(PUBLIC_ORIGIN)));

    // Missing priority paths are plain 404s from the mock server
    assert!(report.count(PageState::ErrorPageDiscarded) > 0);
    assert_eq!(report.count(PageState::Accepted), 3);
}

#[tokio::test]
async fn test_full_crawl_respects_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page(
            "Acme Widgets",
            r#"<a href="/a">A</a> <a href="/b">B</a> <a href="/c">C</a>"#,
        )))
        .mount(&mock_server)
        .await;

    for page in ["/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html_response(html_page(page, "Another page.")))
            .mount(&mock_server)
            .await;
    }

    let report = crawl_through_proxy(&mock_server, 2).await;

    assert_eq!(report.result.pages.len(), 2);
    assert_eq!(report.result.pages[0].url, "https://acme.test");
}
