//! Scrape orchestrator: drives the end-to-end listing pass
//!
//! Owns the run's state machine: load the listing, walk cards in on-page
//! order, resolve each card's detail page, assemble records, and pace every
//! step through the delay policy. Detail resolution for card i+1 never starts
//! before card i's full cycle completes; the browsing context is a single
//! shared resource.

use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

use super::types::{CARD_SELECTOR, JobRecord};
use super::{card, detail, loader};
use crate::config::ScrapeConfig;
use crate::delay::DelayPolicy;
use crate::session::ScrapeSession;

/// Pause before re-querying when a card index is ahead of the rendered count.
const CARD_RENDER_PAUSE: Duration = Duration::from_secs(2);

/// Bounded retries for a card that never renders. The listing host sometimes
/// recycles DOM nodes during re-render; without a cap a vanished card would
/// stall the run indefinitely.
const MAX_CARD_RENDER_RETRIES: u32 = 10;

/// Run one scrape pass over the listing the session is currently on.
///
/// Output order matches on-page listing order at enumeration time. The host
/// page may re-render and reorder cards between re-queries; that is a
/// documented limitation of scraping a live listing, not corrected here.
pub async fn run(session: &ScrapeSession, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
    let delay = DelayPolicy::new(config.delay_range().0, config.delay_range().1);

    // Dismiss the sign-in overlay the listing shows to anonymous sessions.
    session.press_escape().await;

    loader::load_all(session, config.scroll_pause_secs(), config.max_scrolls()).await?;

    let rendered = session.find_all(CARD_SELECTOR).await?.len();
    let target = match config.job_limit() {
        Some(limit) => rendered.min(limit),
        None => rendered,
    };
    info!("Scraping {} of {} rendered cards", target, rendered);

    let mut records = Vec::with_capacity(target);
    let mut index = 0;
    let mut render_retries = 0;

    while index < target {
        // Re-query every iteration: detail navigation invalidates the
        // previous element handles and the page may have mutated.
        let cards = session.find_all(CARD_SELECTOR).await?;

        if index >= cards.len() {
            render_retries += 1;
            if render_retries > MAX_CARD_RENDER_RETRIES {
                warn!(
                    "Card {} never rendered after {} retries; stopping with {} records",
                    index + 1,
                    MAX_CARD_RENDER_RETRIES,
                    records.len()
                );
                break;
            }
            info!("Waiting for card {} to render...", index + 1);
            tokio::time::sleep(CARD_RENDER_PAUSE).await;
            continue;
        }
        render_retries = 0;

        let listing = card::extract(&cards[index]).await;
        info!("Scraping {}: {} - {}", index + 1, listing.title, listing.company);

        let (description, external_link) = if listing.link.is_empty() {
            (String::new(), String::new())
        } else {
            detail::resolve(session, &listing.link, delay.jitter().as_secs_f64()).await?
        };

        // Detail navigation can leave a transient overlay behind.
        session.press_escape().await;

        records.push(JobRecord::assemble(listing, description, external_link));

        delay.pause().await;
        index += 1;
    }

    Ok(records)
}
