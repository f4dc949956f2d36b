//! Listing loader: incremental scroll until the page stops growing
//!
//! Infinite-scroll listings render lazily; scrolling to the bottom triggers
//! the next batch. Height stabilization is the signal that nothing more will
//! load, with `max_scrolls` as a hard ceiling so an endlessly-growing page
//! cannot stall the run.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

use crate::session::ScrapeSession;

/// Scroll the listing page until its height stabilizes or `max_scrolls` is
/// reached. Callers re-query cards afterwards; nothing is returned.
pub async fn load_all(session: &ScrapeSession, pause_secs: f64, max_scrolls: usize) -> Result<()> {
    let pause = Duration::from_secs_f64(pause_secs);
    let mut last_height = session.page_height().await?;
    info!(
        "Loading listing via scroll (initial height {}, max {} scrolls)",
        last_height, max_scrolls
    );

    for step in 0..max_scrolls {
        session.scroll_to_bottom().await?;
        tokio::time::sleep(pause).await;

        let new_height = session.page_height().await?;
        if new_height == last_height {
            debug!("Page height stabilized at {} after {} scrolls", new_height, step + 1);
            return Ok(());
        }
        last_height = new_height;
    }

    debug!("Reached scroll ceiling with page still growing (height {})", last_height);
    Ok(())
}
