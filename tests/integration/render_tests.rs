//! Integration tests for the render service client
//!
//! A wiremock server plays the render service: it checks the API key header
//! and JSON body, and answers with canned render responses.

use serde_json::json;
use site_survey::config::RenderConfig;
use site_survey::crawler::{Coordinator, FetchResult, PageFetcher};
use site_survey::render::{RenderClient, RenderError, RenderService, API_KEY_HEADER};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-render-key";

fn client_for(server: &MockServer) -> RenderClient {
    let config = RenderConfig {
        endpoint: Some(server.uri()),
        api_key: Some(API_KEY.to_string()),
        wait_for_ms: 1500,
        timeout_ms: 10_000,
    };
    RenderClient::from_config(&config).expect("render client should be configured")
}

fn rendered_html() -> String {
    format!(
        "<html><head><title>Acme | Widgets</title></head><body><main><h1>Industrial widgets</h1><p>{}</p></main></body></html>",
        "Acme designs industrial widgets and ships them to customers around the world. ".repeat(4)
    )
}

fn spa_shell() -> &'static str {
    r#"<html><head><title>Acme App</title><script src="/static/js/main.abc123.js"></script></head><body><div id="root"></div></body></html>"#
}

#[tokio::test]
async fn test_render_success_with_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .and(header(API_KEY_HEADER, API_KEY))
        .and(body_json(json!({
            "url": "https://acme.test",
            "waitFor": 1500,
            "timeout": 10000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "html": rendered_html(),
            "metadata": {
                "title": "Acme | Widgets",
                "ogSiteName": "Acme Corp",
                "h1": "Industrial widgets"
            },
            "elapsed": 1234.0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client_for(&mock_server)
        .render("https://acme.test")
        .await
        .expect("render should succeed");

    assert!(page.html.contains("Industrial widgets"));
    assert_eq!(page.elapsed_ms, Some(1234));
    let metadata = page.metadata.expect("metadata");
    assert_eq!(metadata.og_site_name.as_deref(), Some("Acme Corp"));
    assert_eq!(metadata.h1.as_deref(), Some("Industrial widgets"));
    assert!(metadata.description.is_none());
}

#[tokio::test]
async fn test_render_without_api_key_is_rejected_by_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .and(header(API_KEY_HEADER, "some-other-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .render("https://acme.test")
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Status(401)), "got {:?}", err);
}

#[tokio::test]
async fn test_render_unsuccessful_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "navigation timeout"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .render("https://acme.test")
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Unsuccessful), "got {:?}", err);
}

#[tokio::test]
async fn test_render_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .render("https://acme.test")
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Status(503)), "got {:?}", err);
}

#[tokio::test]
async fn test_render_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .render("https://acme.test")
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Malformed(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_render_success_without_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "html": "   "
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .render("https://acme.test")
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingHtml), "got {:?}", err);
}

/// Serves the same client-rendered shell for every URL
struct ShellFetcher;

impl PageFetcher for ShellFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        FetchResult::Success {
            final_url: url.clone(),
            status_code: 200,
            body: spa_shell().to_string(),
        }
    }
}

#[tokio::test]
async fn test_crawl_uses_render_fallback_for_spa() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/render"))
        .and(header(API_KEY_HEADER, API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "html": rendered_html(),
            "metadata": { "ogSiteName": "Acme Corp" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(ShellFetcher, Some(client_for(&mock_server)))
        .with_pacing(Duration::ZERO);
    let report = coordinator.run("https://acme.test", 1, None).await;
    let result = &report.result;

    assert!(result.spa_warning.is_none(), "warning: {:?}", result.spa_warning);
    assert_eq!(result.company_name.as_deref(), Some("Acme Corp"));
    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages[0].title, "Acme | Widgets");
    assert!(result.pages[0].text_content.contains("industrial widgets"));
}

#[tokio::test]
async fn test_crawl_keeps_shell_when_render_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(ShellFetcher, Some(client_for(&mock_server)))
        .with_pacing(Duration::ZERO);
    let report = coordinator.run("https://acme.test", 1, None).await;
    let result = &report.result;

    let warning = result.spa_warning.as_ref().expect("SPA warning");
    assert!(warning.is_spa);
    assert!(warning.message.contains("could not be rendered"));
    assert!(result.errors.is_empty());
    assert_eq!(result.pages[0].title, "Acme App");
}
