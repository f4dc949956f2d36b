//! Detail resolver: description and external-application link for one card
//!
//! Navigates to a card's detail page, pulls the full description, and, when
//! the page exposes a company-profile/apply anchor, resolves the final
//! redirect target in a secondary browsing context. Markup variability across
//! listings is expected, so every sub-lookup degrades to an empty string and
//! the batch keeps moving; only driver-level failures propagate.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::types::{
    APPLY_ANCHOR_SELECTOR, DESCRIPTION_SELECTOR, DOM_WAIT_TIMEOUT_SECS, OUTBOUND_LINK_SELECTOR,
};
use crate::session::{ScrapeSession, wait_for_element};

/// Pull the `url` query parameter out of a redirect href, percent-decoded.
pub fn parse_redirect_target(href: &str) -> Option<String> {
    let parsed = Url::parse(href).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

/// Resolve the final redirect target of the apply anchor in a secondary tab.
///
/// The tab is closed and focus restored to the primary context on every exit
/// path, including failed extraction; a leaked tab would desynchronize all
/// subsequent navigation.
async fn resolve_external_link(session: &ScrapeSession, temp_link: &str) -> String {
    let tab = match session.secondary_tab(temp_link).await {
        Ok(tab) => tab,
        Err(e) => {
            warn!("Failed to open secondary tab for {}: {}", temp_link, e);
            return String::new();
        }
    };

    let timeout = Duration::from_secs(DOM_WAIT_TIMEOUT_SECS);
    let external = match wait_for_element(tab.page(), OUTBOUND_LINK_SELECTOR, timeout).await {
        Ok(anchor) => anchor
            .attribute("href")
            .await
            .ok()
            .flatten()
            .and_then(|href| parse_redirect_target(&href))
            .unwrap_or_default(),
        Err(not_found) => {
            debug!("No outbound link in secondary tab: {}", not_found);
            String::new()
        }
    };

    tab.close().await;
    external
}

/// Visit the detail page for `link` and return `(description, external_link)`.
///
/// After the optional secondary-tab excursion the session navigates back to
/// the listing page and pauses `wait_secs` so the listing re-stabilizes
/// before the next card is read.
pub async fn resolve(
    session: &ScrapeSession,
    link: &str,
    wait_secs: f64,
) -> Result<(String, String)> {
    let wait = Duration::from_secs_f64(wait_secs);
    session.navigate(link).await?;

    let timeout = Duration::from_secs(DOM_WAIT_TIMEOUT_SECS);
    let description = match session.wait_for(DESCRIPTION_SELECTOR, timeout).await {
        Ok(region) => region
            .inner_text()
            .await
            .ok()
            .flatten()
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        Err(not_found) => {
            debug!("Detail page has no description: {}", not_found);
            String::new()
        }
    };

    let temp_link = match session.page().find_element(APPLY_ANCHOR_SELECTOR).await {
        Ok(anchor) => anchor.attribute("href").await.ok().flatten().unwrap_or_default(),
        Err(_) => String::new(),
    };

    let external_link = if temp_link.is_empty() {
        String::new()
    } else {
        tokio::time::sleep(wait).await;
        let resolved = resolve_external_link(session, &temp_link).await;
        info!("External link -> {}", resolved);
        resolved
    };

    tokio::time::sleep(wait).await;
    session.go_back().await?;
    tokio::time::sleep(wait).await;

    Ok((description, external_link))
}

#[cfg(test)]
mod tests {
    use super::parse_redirect_target;

    #[test]
    fn decodes_url_parameter() {
        let href = "https://ext.example/redirect?url=https%3A%2F%2Fjobs.example%2F123";
        assert_eq!(
            parse_redirect_target(href).as_deref(),
            Some("https://jobs.example/123")
        );
    }

    #[test]
    fn missing_url_parameter_is_none() {
        assert_eq!(parse_redirect_target("https://ext.example/redirect?q=1"), None);
        assert_eq!(parse_redirect_target("https://ext.example/redirect"), None);
    }

    #[test]
    fn unparseable_href_is_none() {
        assert_eq!(parse_redirect_target("not a url"), None);
        assert_eq!(parse_redirect_target(""), None);
    }

    #[test]
    fn first_url_parameter_wins() {
        let href = "https://ext.example/r?url=https%3A%2F%2Fa.example&url=https%3A%2F%2Fb.example";
        assert_eq!(parse_redirect_target(href).as_deref(), Some("https://a.example"));
    }
}
