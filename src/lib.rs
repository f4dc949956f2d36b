pub mod browser;
pub mod config;
pub mod delay;
pub mod scrape;
pub mod session;
pub mod store;

pub use browser::{BrowserWrapper, find_browser_executable, launch_browser};
pub use config::{ScrapeConfig, SearchParams, Settings};
pub use delay::DelayPolicy;
pub use scrape::{JobRecord, ListingCard};
pub use session::{NotFound, ScrapeSession, TabGuard};

use anyhow::Result;

/// Run one complete scrape pass: launch a browser session, navigate to the
/// configured listing, walk the cards, and shut the browser down.
///
/// Records are returned to the caller; persisting them is the caller's
/// concern (see [`store::save`]).
pub async fn scrape_jobs(config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
    let session = ScrapeSession::start().await?;
    session.navigate(config.target_url()).await?;

    match scrape::run(&session, config).await {
        Ok(records) => {
            session.shutdown().await?;
            Ok(records)
        }
        Err(e) => {
            // Best-effort teardown; the scrape error is the one to surface.
            let _ = session.shutdown().await;
            Err(e)
        }
    }
}
