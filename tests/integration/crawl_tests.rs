//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the full
//! crawl cycle end-to-end through the static HTTP renderer.

use std::sync::atomic::Ordering;
use sumi_scribe::config::{parse_config, Config, CrawlerConfig, OutputConfig, RendererConfig};
use sumi_scribe::crawler::{run_crawl, Coordinator, HttpRenderer};
use sumi_scribe::output::write_outputs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the mock server
fn create_test_config(base_url: &str, max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: base_url.to_string(),
            start_paths: vec!["/".to_string()],
            max_depth,
            exclude_patterns: vec!["/private".to_string()],
            request_delay: 0.0,
        },
        renderer: RendererConfig {
            navigation_timeout: 5,
            ..RendererConfig::default()
        },
        output: OutputConfig::default(),
    }
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn long_paragraph(topic: &str) -> String {
    format!(
        "<p>{}</p>",
        format!("This paragraph documents {} in some detail. ", topic).repeat(4)
    )
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_never_requested(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &format!(
                r#"<nav><a href="/menu">Menu</a></nav>
                <main><h1>Welcome</h1>{}
                <a href="/about">About</a>
                <a href="/file.pdf">Download</a>
                <a href="/private/admin">Admin</a>
                <a href="https://external.com/x">External</a></main>"#,
                long_paragraph("the home page")
            ),
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/about",
        html_page(
            "About",
            &format!("<main><h2>Team</h2>{}</main>", long_paragraph("the team")),
        ),
    )
    .await;

    mount_never_requested(&mock_server, "/file.pdf").await;
    mount_never_requested(&mock_server, "/private/admin").await;
    mount_never_requested(&mock_server, "/menu").await;

    let config = create_test_config(&base_url, 1);
    let renderer = HttpRenderer::new(&config.renderer).unwrap();
    let outcome = run_crawl(&config, &renderer).await.unwrap();

    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.visited_count(), 2);

    let home = &outcome.documents[0];
    assert_eq!(home.url, base_url);
    assert_eq!(home.depth, 0);
    assert_eq!(home.title, "Home");
    assert_eq!(home.headings, vec!["Welcome"]);
    assert!(home.content.contains("# Welcome"));
    assert_eq!(home.links, vec![format!("{}/about", base_url)]);

    let about = &outcome.documents[1];
    assert_eq!(about.url, format!("{}/about", base_url));
    assert_eq!(about.depth, 1);
    assert_eq!(about.headings, vec!["Team"]);

    for document in &outcome.documents {
        assert!(document.url.starts_with(&base_url));
        assert!(document.content.chars().count() >= 100);
    }
}

#[tokio::test]
async fn test_failed_page_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &format!(
                r#"<main>{}<a href="/gone">Gone</a><a href="/data">Data</a><a href="/ok">Ok</a></main>"#,
                long_paragraph("links")
            ),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/ok",
        html_page("Ok", &format!("<main>{}</main>", long_paragraph("success"))),
    )
    .await;

    let config = create_test_config(&base_url, 1);
    let renderer = HttpRenderer::new(&config.renderer).unwrap();
    let outcome = run_crawl(&config, &renderer).await.unwrap();

    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.stats.pages_failed, 2);
    assert_eq!(outcome.visited_count(), 4);
}

#[tokio::test]
async fn test_thin_pages_are_dropped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &format!(r#"<main>{}<a href="/stub">Stub</a></main>"#, long_paragraph("home")),
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/stub",
        html_page("Stub", r#"<main><p>Coming soon.</p><a href="/hidden">Hidden</a></main>"#),
    )
    .await;

    mount_never_requested(&mock_server, "/hidden").await;

    let config = create_test_config(&base_url, 3);
    let renderer = HttpRenderer::new(&config.renderer).unwrap();
    let outcome = run_crawl(&config, &renderer).await.unwrap();

    assert_eq!(outcome.documents.len(), 1);
    assert_eq!(outcome.stats.pages_thin, 1);
    assert_eq!(outcome.visited_count(), 2);
}

#[tokio::test]
async fn test_cycle_is_visited_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Home",
            &format!(r#"<main>{}<a href="/loop/">Loop</a></main>"#, long_paragraph("home")),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(html_page(
            "Loop",
            &format!(
                r##"<main>{}<a href="/">Home</a><a href="/loop#top">Self</a><a href="?page=2">Same</a></main>"##,
                long_paragraph("cycles")
            ),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 5);
    let renderer = HttpRenderer::new(&config.renderer).unwrap();
    let outcome = run_crawl(&config, &renderer).await.unwrap();

    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.visited_count(), 2);
    assert_eq!(outcome.documents[1].links, vec![base_url.clone()]);
}

#[tokio::test]
async fn test_interrupted_crawl_keeps_nothing_unrendered() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_never_requested(&mock_server, "/").await;

    let config = create_test_config(&base_url, 1);
    let renderer = HttpRenderer::new(&config.renderer).unwrap();
    let coordinator = Coordinator::new(&config, &renderer).unwrap();
    coordinator.shutdown_handle().store(true, Ordering::SeqCst);

    let outcome = coordinator.run().await;

    assert!(outcome.documents.is_empty());
    assert!(outcome.stats.interrupted);
}

#[tokio::test]
async fn test_config_to_files() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let temp_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/docs",
        html_page(
            "Docs",
            &format!("<article><h1>Reference</h1>{}</article>", long_paragraph("the API")),
        ),
    )
    .await;

    let toml = format!(
        r#"
[crawler]
base-url = "{}"
start-paths = ["/docs"]
max-depth = 0
request-delay = 0.0

[renderer]
navigation-timeout = 5

[output]
directory = "{}"
jsonl-file = "corpus.jsonl"
"#,
        base_url,
        temp_dir.path().display()
    );

    let config = parse_config(&toml).unwrap();
    let renderer = HttpRenderer::new(&config.renderer).unwrap();
    let outcome = run_crawl(&config, &renderer).await.unwrap();
    let written = write_outputs(&outcome.documents, &config.output).unwrap();

    let corpus = std::fs::read_to_string(&written.jsonl_path).unwrap();
    assert_eq!(corpus.lines().count(), 1);
    let record: serde_json::Value = serde_json::from_str(corpus.trim_end()).unwrap();
    assert_eq!(record["url"], format!("{}/docs", base_url));
    assert_eq!(record["title"], "Docs");

    assert_eq!(written.markdown_files.len(), 1);
    let markdown = std::fs::read_to_string(&written.markdown_files[0]).unwrap();
    assert!(markdown.starts_with("# Docs\n\n**Source**: "));
    assert!(markdown.contains("**Depth**: 0"));
    assert!(markdown.contains("# Reference"));
}
