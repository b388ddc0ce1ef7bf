//! Static HTTP renderer
//!
//! Fetches pages with a plain HTTP GET and returns the server-sent HTML as-is.
//! No JavaScript runs, so this is only useful for server-rendered sites, for
//! `--static` dry runs, and for exercising the crawl pipeline against a mock
//! server. Error classification mirrors the browser renderer so the crawl
//! report reads the same either way.

use crate::config::RendererConfig;
use crate::crawler::renderer::{RenderError, RenderTimeouts, Renderer};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;

/// User agent sent when the configuration does not override it
pub const DEFAULT_USER_AGENT: &str = concat!("SumiScribe/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The renderer configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_scribe::config::RendererConfig;
/// use sumi_scribe::crawler::build_http_client;
///
/// let client = build_http_client(&RendererConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.navigation_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that performs a single GET per page
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Creates a renderer from the renderer configuration
    pub fn new(config: &RendererConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, url: &str, timeouts: &RenderTimeouts) -> Result<String, RenderError> {
        let response = self
            .client
            .get(url)
            .timeout(timeouts.navigation)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e, timeouts.navigation))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is treated as HTML
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.to_ascii_lowercase().contains("html") {
                return Err(RenderError::NotHtml {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response
            .text()
            .await
            .map_err(|e| classify_request_error(url, e, timeouts.navigation))
    }
}

fn classify_request_error(url: &str, error: reqwest::Error, limit: Duration) -> RenderError {
    if error.is_timeout() {
        RenderError::Timeout {
            url: url.to_string(),
            seconds: limit.as_secs(),
        }
    } else if error.is_connect() {
        RenderError::Navigation {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        RenderError::Navigation {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quick_timeouts() -> RenderTimeouts {
        RenderTimeouts {
            navigation: Duration::from_secs(5),
            ready: Duration::ZERO,
            settle: Duration::ZERO,
            scroll: None,
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&RendererConfig::default()).is_ok());
    }

    #[test]
    fn test_build_http_client_with_user_agent() {
        let config = RendererConfig {
            user_agent: Some("DocsBot/2.0".to_string()),
            ..RendererConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_render_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Hi</body></html>")
                    .insert_header("content-type", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&RendererConfig::default()).unwrap();
        let html = renderer
            .render(&format!("{}/page", server.uri()), &quick_timeouts())
            .await
            .unwrap();
        assert_eq!(html, "<html><body>Hi</body></html>");
    }

    #[tokio::test]
    async fn test_render_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&RendererConfig::default()).unwrap();
        let result = renderer
            .render(&format!("{}/missing", server.uri()), &quick_timeouts())
            .await;
        assert!(matches!(result, Err(RenderError::Http { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_render_rejects_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&RendererConfig::default()).unwrap();
        let result = renderer
            .render(&format!("{}/data", server.uri()), &quick_timeouts())
            .await;
        match result {
            Err(RenderError::NotHtml { content_type, .. }) => {
                assert_eq!(content_type, "application/json")
            }
            other => panic!("expected NotHtml, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_render_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .insert_header("content-type", "text/html")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&RendererConfig::default()).unwrap();
        let timeouts = RenderTimeouts {
            navigation: Duration::from_millis(200),
            ..quick_timeouts()
        };
        let result = renderer
            .render(&format!("{}/slow", server.uri()), &timeouts)
            .await;
        assert!(matches!(result, Err(RenderError::Timeout { .. })));
    }
}
