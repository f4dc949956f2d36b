//! Core configuration type for scrape runs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::builder::ScrapeConfigBuilder;

/// Immutable configuration for one scrape run.
///
/// Constructed once via the builder and passed by reference through the
/// pipeline; there is no process-wide mutable settings state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Search results URL the run starts from.
    pub(crate) target_url: String,
    /// Cap on the number of records scraped; `None` means every rendered card.
    pub(crate) job_limit: Option<usize>,
    /// Randomized inter-item delay range in seconds.
    ///
    /// **INVARIANT:** `0 <= min <= max` (validated in the builder).
    pub(crate) delay_range: (f64, f64),
    /// Pause between scroll steps while loading the listing.
    pub(crate) scroll_pause_secs: f64,
    /// Hard ceiling on scroll iterations so a listing that never stabilizes
    /// cannot loop forever.
    pub(crate) max_scrolls: usize,
    /// Output table path.
    pub(crate) output_path: PathBuf,
}

impl ScrapeConfig {
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn job_limit(&self) -> Option<usize> {
        self.job_limit
    }

    pub fn delay_range(&self) -> (f64, f64) {
        self.delay_range
    }

    pub fn scroll_pause_secs(&self) -> f64 {
        self.scroll_pause_secs
    }

    pub fn max_scrolls(&self) -> usize {
        self.max_scrolls
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
