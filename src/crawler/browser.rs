//! Headless Chromium renderer
//!
//! One browser process and one tab are shared by the whole crawl; pages are
//! rendered strictly one at a time by navigating that tab. For each URL:
//!
//! 1. Navigate, bounded by the navigation timeout
//! 2. Poll `document.readyState` until it leaves `loading`, bounded by the
//!    ready timeout (on expiry we log and carry on with what is there)
//! 3. Sleep for the settle time so client-side rendering can finish
//! 4. Optionally scroll to the bottom and sleep again for lazy content
//! 5. Serialize the live DOM

use crate::config::RendererConfig;
use crate::crawler::renderer::{RenderError, RenderTimeouts, Renderer};
use crate::ScribeError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

const READY_STATE_SCRIPT: &str = "document.readyState";

const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body ? document.body.scrollHeight : 0)";

const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renderer backed by a single Chromium tab
pub struct ChromeRenderer {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromeRenderer {
    /// Launches Chromium and opens the tab used for every render
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::BrowserLaunch`] when the browser binary cannot
    /// be found or started, or when the initial tab cannot be opened.
    pub async fn launch(config: &RendererConfig) -> Result<Self, ScribeError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(config.navigation_timeout))
            .window_size(1920, 1080);

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(executable) = &config.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.arg(format!("--user-agent={}", user_agent));
        }

        builder = builder
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-notifications")
            .arg("--disable-popup-blocking")
            .arg("--mute-audio");

        let browser_config = builder.build().map_err(ScribeError::BrowserLaunch)?;

        info!("Launching Chromium (headless: {})", config.headless);
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScribeError::BrowserLaunch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    trace!("Browser handler event error: {}", e);
                }
            }
            debug!("Browser handler task completed");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(ScribeError::BrowserLaunch(format!(
                    "Failed to open tab: {}",
                    e
                )));
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Shuts the browser down
    ///
    /// Errors while closing are logged rather than returned; the process is
    /// going away either way.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Failed to wait for browser exit: {}", e);
        }
        self.handler_task.abort();
        info!("Browser closed");
    }

    async fn navigate(&self, url: &str, limit: Duration) -> Result<(), RenderError> {
        match tokio::time::timeout(limit, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(RenderError::Timeout {
                url: url.to_string(),
                seconds: limit.as_secs(),
            }),
        }
    }

    /// Polls until the document is no longer `loading`
    async fn wait_until_ready(&self, url: &str, limit: Duration) {
        let start = Instant::now();

        loop {
            match self.page.evaluate(READY_STATE_SCRIPT).await {
                Ok(result) => match result.into_value::<String>() {
                    Ok(state) if state != "loading" => {
                        trace!("{} ready ({}) after {:?}", url, state, start.elapsed());
                        return;
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Unexpected readyState value for {}: {}", url, e),
                },
                Err(e) => debug!("Failed to check readyState for {}: {}, retrying", url, e),
            }

            if start.elapsed() >= limit {
                warn!(
                    "Timeout waiting for {} to become ready after {}s, proceeding anyway",
                    url,
                    limit.as_secs()
                );
                return;
            }

            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, url: &str, timeouts: &RenderTimeouts) -> Result<String, RenderError> {
        self.navigate(url, timeouts.navigation).await?;
        self.wait_until_ready(url, timeouts.ready).await;

        tokio::time::sleep(timeouts.settle).await;

        if let Some(scroll_settle) = timeouts.scroll {
            if let Err(e) = self.page.evaluate(SCROLL_SCRIPT).await {
                debug!("Scroll failed on {}: {}", url, e);
            }
            tokio::time::sleep(scroll_settle).await;
        }

        self.page
            .content()
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))
    }
}
