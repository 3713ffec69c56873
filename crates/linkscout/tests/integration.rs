//! Integration tests for linkscout using wiremock

use linkscout::{
    BoundedFetcher, FetchError, FetchOptions, LinkPreview, SearchResult, ToolError, Toolkit,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const ARTICLE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Fallback Title</title>
    <meta property="og:title" content="Example">
    <meta property="og:site_name" content="Example Site">
    <meta property="og:type" content="article">
    <meta name="twitter:title" content="Twitter Example">
    <meta name="twitter:image" content="http://x/img.png">
    <meta name="twitter:card" content="summary">
    <meta name="description" content="Plain description">
    <script>window.tracker = "do-not-leak";</script>
</head>
<body>
    <nav>Home | About</nav>
    <article>
        <h1>Headline</h1>
        <p>First paragraph of the story.</p>
        <p>Second paragraph.</p>
        <script>console.log("inline-secret")</script>
    </article>
    <footer>Copyright 2024</footer>
</body>
</html>"#;

async fn mount_article(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE, "text/html"))
        .mount(server)
        .await;
}

async fn mount_favicon(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 0, 1, 0]))
        .mount(server)
        .await;
}

fn toolkit_for(server: &MockServer) -> Toolkit {
    Toolkit::builder()
        .search_endpoint(format!("{}/html/", server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_sends_identifying_headers() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let fetcher = BoundedFetcher::new(FetchOptions::default()).unwrap();
    let page = fetcher
        .fetch(&format!("{}/", server.uri()), Duration::from_secs(5))
        .await
        .unwrap();
    assert!(page.status_ok);
    assert_eq!(page.body, "OK");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    assert!(header("user-agent").starts_with("Mozilla/5.0"));
    assert!(header("accept").contains("text/html"));
    assert!(header("accept-language").starts_with("en"));
}

#[tokio::test]
async fn test_custom_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let fetcher = BoundedFetcher::new(FetchOptions {
        user_agent: Some("CustomBot/1.0".to_string()),
        ..Default::default()
    })
    .unwrap();
    fetcher
        .fetch(&format!("{}/", server.uri()), Duration::from_secs(5))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0]
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok()),
        Some("CustomBot/1.0")
    );
}

#[tokio::test]
async fn test_fetch_returns_error_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("Not Found")
                .insert_header("content-type", "text/plain")
                .insert_header("X-Request-Id", "abc123"),
        )
        .mount(&server)
        .await;

    let fetcher = BoundedFetcher::new(FetchOptions::default()).unwrap();
    let page = fetcher
        .fetch(&format!("{}/missing", server.uri()), Duration::from_secs(5))
        .await
        .unwrap();

    // Non-2xx is still a fetched page, not an error
    assert_eq!(page.status, 404);
    assert!(!page.status_ok);
    assert_eq!(page.body, "Not Found");
    assert_eq!(page.header("content-type"), Some("text/plain"));
    assert_eq!(page.headers.get("x-request-id").map(String::as_str), Some("abc123"));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let fetcher = BoundedFetcher::new(FetchOptions::default()).unwrap();
    let started = std::time::Instant::now();
    let result = fetcher
        .fetch(&format!("{}/slow", server.uri()), Duration::from_millis(200))
        .await;

    assert!(matches!(result, Err(FetchError::Timeout { timeout_ms: 200 })));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let fetcher = BoundedFetcher::new(FetchOptions::default()).unwrap();
    let result = fetcher
        .fetch("http://127.0.0.1:1/", Duration::from_secs(5))
        .await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn test_link_preview_with_favicon() {
    init_tracing();
    let server = MockServer::start().await;
    mount_article(&server).await;
    mount_favicon(&server).await;

    let toolkit = toolkit_for(&server);
    let url = format!("{}/article", server.uri());
    let preview = toolkit.link_preview(&url).await.unwrap();

    assert_eq!(
        preview,
        LinkPreview {
            url: url.clone(),
            content_type: Some("text/html".to_string()),
            language: Some("en".to_string()),
            title: Some("Example".to_string()),
            description: Some("Plain description".to_string()),
            image: Some("http://x/img.png".to_string()),
            site_name: Some("Example Site".to_string()),
            kind: Some("article".to_string()),
            url_canonical: None,
            twitter_card: Some("summary".to_string()),
            favicon: Some(format!("{}/favicon.ico", server.uri())),
        }
    );
}

#[tokio::test]
async fn test_link_preview_favicon_404() {
    let server = MockServer::start().await;
    mount_article(&server).await;
    // No favicon mounted: wiremock answers 404

    let toolkit = toolkit_for(&server);
    let response = toolkit
        .call(
            "fetch_link_preview",
            json!({ "url": format!("{}/article", server.uri()) }),
        )
        .await;

    assert!(!response.is_error);
    let preview: Value = serde_json::from_str(&response.text).unwrap();
    assert_eq!(preview["title"], "Example");
    assert_eq!(preview["image"], "http://x/img.png");
    assert!(preview.get("favicon").is_none());
    assert!(preview.get("urlCanonical").is_none());
}

#[tokio::test]
async fn test_link_preview_slow_favicon_is_skipped() {
    let server = MockServer::start().await;
    mount_article(&server).await;

    Mock::given(method("GET"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let toolkit = Toolkit::builder()
        .favicon_timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let preview = toolkit
        .link_preview(&format!("{}/article", server.uri()))
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Example"));
    assert_eq!(preview.favicon, None);
}

#[tokio::test]
async fn test_link_preview_of_error_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410).set_body_raw(
            "<html><head><title>Gone</title></head></html>",
            "text/html",
        ))
        .mount(&server)
        .await;

    let toolkit = toolkit_for(&server);
    let preview = toolkit
        .link_preview(&format!("{}/gone", server.uri()))
        .await
        .unwrap();
    assert_eq!(preview.title.as_deref(), Some("Gone"));
}

#[tokio::test]
async fn test_link_preview_timeout_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let toolkit = Toolkit::builder()
        .page_timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let response = toolkit
        .call(
            "fetch_link_preview",
            json!({ "url": format!("{}/slow", server.uri()) }),
        )
        .await;

    assert!(response.is_error);
    let payload: Value = serde_json::from_str(&response.text).unwrap();
    assert_eq!(payload, json!({ "error": "Request timed out after 200 ms" }));
}

#[tokio::test]
async fn test_missing_url_payload() {
    let toolkit = Toolkit::builder().build().unwrap();

    for arguments in [json!({ "url": "" }), json!({}), Value::Null] {
        let response = toolkit.call("fetch_link_preview", arguments).await;
        assert!(response.is_error);
        let payload: Value = serde_json::from_str(&response.text).unwrap();
        assert!(payload["error"].as_str().unwrap().contains("url"));
    }
}

#[tokio::test]
async fn test_invalid_scheme_fails_fast() {
    let toolkit = Toolkit::builder().build().unwrap();
    let err = toolkit
        .page_content("file:///etc/passwd", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Fetch(FetchError::InvalidUrl)));
}

#[tokio::test]
async fn test_page_content_strips_boilerplate() {
    let server = MockServer::start().await;
    mount_article(&server).await;

    let toolkit = toolkit_for(&server);
    let digest = toolkit
        .page_content(&format!("{}/article", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(
        digest.text,
        "Headline First paragraph of the story. Second paragraph."
    );
    assert_eq!(digest.max_length, 5000);
    assert!(!digest.text.contains("inline-secret"));
    assert!(!digest.text.contains("do-not-leak"));
    assert!(!digest.text.contains("Copyright"));
}

#[tokio::test]
async fn test_page_content_max_length() {
    let server = MockServer::start().await;
    mount_article(&server).await;

    let toolkit = toolkit_for(&server);
    let response = toolkit
        .call(
            "get_page_content",
            json!({ "url": format!("{}/article", server.uri()), "maxLength": 8 }),
        )
        .await;

    assert!(!response.is_error);
    assert_eq!(response.text, "Headline");
}

#[tokio::test]
async fn test_blocked_prefix_payload() {
    let server = MockServer::start().await;
    mount_article(&server).await;

    let toolkit = Toolkit::builder()
        .block_prefix("http://127.0.0.1")
        .build()
        .unwrap();
    let response = toolkit
        .call(
            "get_page_content",
            json!({ "url": format!("{}/article", server.uri()) }),
        )
        .await;

    assert!(response.is_error);
    assert!(response.text.contains("prefix not allowed"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

const RESULTS_PAGE: &str = r#"<html><body>
<div class="result results_links web-result">
    <h2 class="result__title"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F">Rust Programming Language</a></h2>
    <a class="result__snippet">A language empowering everyone.</a>
</div>
<div class="result results_links web-result">
    <h2 class="result__title"><a class="result__a">Missing link</a></h2>
    <a class="result__snippet">Skipped</a>
</div>
<div class="result results_links web-result">
    <h2 class="result__title"><a class="result__a" href="https://doc.rust-lang.org/book/">The Rust Book</a></h2>
</div>
<div class="result results_links web-result">
    <h2 class="result__title"><a class="result__a" href="https://crates.io/">crates.io</a></h2>
    <a class="result__snippet">The Rust community's crate registry</a>
</div>
</body></html>"#;

async fn mount_results(server: &MockServer, query: &str) {
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RESULTS_PAGE, "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_results() {
    let server = MockServer::start().await;
    mount_results(&server, "rust lang").await;

    let toolkit = toolkit_for(&server);
    let results = toolkit.search("rust lang", None).await.unwrap();

    assert_eq!(
        results,
        vec![
            SearchResult {
                title: "Rust Programming Language".to_string(),
                url: "https://www.rust-lang.org/".to_string(),
                snippet: "A language empowering everyone.".to_string(),
            },
            SearchResult {
                title: "The Rust Book".to_string(),
                url: "https://doc.rust-lang.org/book/".to_string(),
                snippet: String::new(),
            },
            SearchResult {
                title: "crates.io".to_string(),
                url: "https://crates.io/".to_string(),
                snippet: "The Rust community's crate registry".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_search_tool_num_results() {
    let server = MockServer::start().await;
    mount_results(&server, "rust").await;

    let toolkit = toolkit_for(&server);
    let response = toolkit
        .call("search_web", json!({ "query": "rust", "numResults": 2 }))
        .await;

    assert!(!response.is_error);
    let results: Vec<SearchResult> = serde_json::from_str(&response.text).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].title, "The Rust Book");
}

#[tokio::test]
async fn test_search_missing_query_payload() {
    let toolkit = Toolkit::builder().build().unwrap();
    let response = toolkit.call("search_web", json!({ "query": "" })).await;

    assert!(response.is_error);
    assert!(response.text.contains("Missing required parameter: query"));
}
