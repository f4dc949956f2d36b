//! Explicit handle over the one shared browser session
//!
//! The orchestrator owns a [`ScrapeSession`] for the duration of a run and
//! lends it by reference to the loader, card extractor, and detail resolver.
//! Browsing contexts are a single mutable resource, so everything here is
//! strictly sequential.

use anyhow::{Context, Result};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::browser::{BrowserWrapper, launch_browser};

/// Poll interval while waiting for an element to render.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long `go_back` waits for the listing page to settle.
const BACK_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(10);

/// A scoped element lookup that found nothing.
///
/// Expected and frequent: listing markup varies and individual fields are
/// routinely absent. Collapsed to an empty string at record assembly.
#[derive(Debug, Error)]
#[error("element not found: {selector}")]
pub struct NotFound {
    pub selector: String,
}

impl NotFound {
    fn new(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
        }
    }
}

/// Extract trimmed inner text from the first element matching `selector`
/// inside `scope`.
pub(crate) async fn scoped_text(scope: &Element, selector: &str) -> Result<String, NotFound> {
    let element = scope
        .find_element(selector)
        .await
        .map_err(|_| NotFound::new(selector))?;
    let text = element
        .inner_text()
        .await
        .ok()
        .flatten()
        .ok_or_else(|| NotFound::new(selector))?;
    Ok(text.trim().to_string())
}

/// Extract an attribute from the first element matching `selector` inside
/// `scope`.
pub(crate) async fn scoped_attr(
    scope: &Element,
    selector: &str,
    name: &str,
) -> Result<String, NotFound> {
    let element = scope
        .find_element(selector)
        .await
        .map_err(|_| NotFound::new(selector))?;
    element
        .attribute(name)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| NotFound::new(selector))
}

/// Poll the page until `selector` matches or `timeout` elapses.
///
/// `page.wait_for_navigation()` only waits for the HTTP response; pages that
/// render content via JavaScript need this DOM-level wait before scraping.
pub(crate) async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element, NotFound> {
    let start = Instant::now();
    loop {
        match page.find_element(selector).await {
            Ok(element) => {
                debug!(
                    "Element '{}' appeared after {:.2}s",
                    selector,
                    start.elapsed().as_secs_f64()
                );
                return Ok(element);
            }
            Err(_) if start.elapsed() >= timeout => {
                debug!("Timed out waiting for '{}' after {:?}", selector, timeout);
                return Err(NotFound::new(selector));
            }
            Err(_) => tokio::time::sleep(POLL_INTERVAL).await,
        }
    }
}

/// Scoped secondary browsing context
///
/// Holds the extra tab opened for external-link resolution. The page is
/// closed on EVERY exit path: explicitly via [`TabGuard::close`], or from
/// `Drop` as a fallback, so a failed extraction can never leak a tab and
/// desynchronize subsequent navigation.
pub struct TabGuard {
    page: Option<Page>,
}

impl TabGuard {
    pub fn page(&self) -> &Page {
        self.page
            .as_ref()
            .expect("TabGuard page taken before close")
    }

    /// Close the secondary tab, returning focus to the primary context.
    pub async fn close(mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!("Failed to close secondary tab: {}", e);
            }
        }
    }
}

impl Drop for TabGuard {
    fn drop(&mut self) {
        if let Some(page) = self.page.take() {
            debug!("TabGuard dropped without explicit close - spawning async close");
            tokio::spawn(async move {
                let _ = page.close().await;
            });
        }
    }
}

/// The single browser session, exclusively owned for the run's duration.
pub struct ScrapeSession {
    browser: BrowserWrapper,
    page: Page,
}

impl ScrapeSession {
    /// Launch a browser and open the primary page.
    pub async fn start() -> Result<Self> {
        let (browser, handler, user_data_dir) = launch_browser().await?;
        let browser = BrowserWrapper::new(browser, handler, user_data_dir);
        let page = browser
            .browser()
            .new_page("about:blank")
            .await
            .context("Failed to create primary page")?;
        Ok(Self { browser, page })
    }

    /// The primary browsing context.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate the primary page and wait for the load to complete.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.page
            .wait_for_navigation()
            .await
            .context("Failed to wait for page load")?;
        Ok(())
    }

    /// Navigate back through session history, bounded so a stuck page cannot
    /// stall the run.
    pub async fn go_back(&self) -> Result<()> {
        // The evaluation can be interrupted by the navigation it triggers;
        // that is not a failure.
        if let Err(e) = self.page.evaluate("window.history.back()").await {
            debug!("history.back evaluation interrupted: {}", e);
        }
        if tokio::time::timeout(BACK_NAVIGATION_TIMEOUT, self.page.wait_for_navigation())
            .await
            .is_err()
        {
            warn!("Timed out waiting for back-navigation to settle");
        }
        Ok(())
    }

    /// Find every element matching `selector` on the primary page, in
    /// document order. Zero matches is an empty vec, not an error.
    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        self.page
            .find_elements(selector)
            .await
            .with_context(|| format!("Failed to query '{selector}'"))
    }

    /// Scroll the primary page to the bottom of the document.
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await
            .context("Failed to scroll page")?;
        Ok(())
    }

    /// Current scrollable document height.
    pub async fn page_height(&self) -> Result<i64> {
        let height = self
            .page
            .evaluate("document.body.scrollHeight")
            .await
            .context("Failed to measure page height")?
            .into_value::<i64>()
            .context("Page height was not a number")?;
        Ok(height)
    }

    /// Send an Escape key event to dismiss transient overlays and popups.
    ///
    /// Best-effort: failures are swallowed, the overlay may simply not exist.
    pub async fn press_escape(&self) {
        let script = "document.dispatchEvent(new KeyboardEvent('keydown', { key: 'Escape', bubbles: true }))";
        if let Err(e) = self.page.evaluate(script).await {
            debug!("Escape dispatch failed: {}", e);
        }
    }

    /// Wait for `selector` on the primary page, bounded by `timeout`.
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Element, NotFound> {
        wait_for_element(&self.page, selector, timeout).await
    }

    /// Open `url` in a secondary browsing context.
    ///
    /// The returned guard closes the tab on every exit path; the caller never
    /// manages the tab lifecycle by hand.
    pub async fn secondary_tab(&self, url: &str) -> Result<TabGuard> {
        debug!("Opening secondary tab: {}", url);
        let page = self
            .browser
            .browser()
            .new_page(url)
            .await
            .with_context(|| format!("Failed to open secondary tab for {url}"))?;
        Ok(TabGuard { page: Some(page) })
    }

    /// Close the browser process and clean up.
    pub async fn shutdown(mut self) -> Result<()> {
        self.browser.shutdown().await
    }
}
