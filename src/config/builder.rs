//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The target URL is the one required field; the compiler rejects a `build()`
//! call before it has been provided. Numeric invariants are validated at
//! build time.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ScrapeConfig;

/// Default inter-item delay range in seconds.
pub const DEFAULT_DELAY_RANGE: (f64, f64) = (2.0, 5.0);

/// Default pause between scroll steps in seconds.
pub const DEFAULT_SCROLL_PAUSE_SECS: f64 = 2.0;

/// Default ceiling on scroll iterations.
pub const DEFAULT_MAX_SCROLLS: usize = 20;

/// Default output table path.
pub const DEFAULT_OUTPUT_PATH: &str = "data/jobs.csv";

// Type states for the builder
pub struct WithTargetUrl;
pub struct Complete;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) target_url: Option<String>,
    pub(crate) job_limit: Option<usize>,
    pub(crate) delay_range: (f64, f64),
    pub(crate) scroll_pause_secs: f64,
    pub(crate) max_scrolls: usize,
    pub(crate) output_path: PathBuf,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            target_url: None,
            job_limit: None,
            delay_range: DEFAULT_DELAY_RANGE,
            scroll_pause_secs: DEFAULT_SCROLL_PAUSE_SECS,
            max_scrolls: DEFAULT_MAX_SCROLLS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfigBuilder<()> {
    #[must_use]
    pub fn target_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithTargetUrl> {
        ScrapeConfigBuilder {
            target_url: Some(url.into()),
            job_limit: self.job_limit,
            delay_range: self.delay_range,
            scroll_pause_secs: self.scroll_pause_secs,
            max_scrolls: self.max_scrolls,
            output_path: self.output_path,
            _phantom: PhantomData,
        }
    }
}

impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn job_limit(mut self, limit: Option<usize>) -> Self {
        self.job_limit = limit;
        self
    }

    #[must_use]
    pub fn delay_range(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.delay_range = (min_secs, max_secs);
        self
    }

    #[must_use]
    pub fn scroll_pause_secs(mut self, secs: f64) -> Self {
        self.scroll_pause_secs = secs;
        self
    }

    #[must_use]
    pub fn max_scrolls(mut self, count: usize) -> Self {
        self.max_scrolls = count;
        self
    }

    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

impl ScrapeConfigBuilder<WithTargetUrl> {
    /// Validate invariants and produce the immutable config.
    pub fn build(self) -> Result<ScrapeConfig> {
        let target_url = self
            .target_url
            .ok_or_else(|| anyhow!("target_url is required"))?;

        let (min, max) = self.delay_range;
        if min < 0.0 || max < 0.0 {
            return Err(anyhow!("delay_range values must be non-negative, got ({min}, {max})"));
        }
        if min > max {
            return Err(anyhow!("delay_range min {min} exceeds max {max}"));
        }
        if self.scroll_pause_secs < 0.0 {
            return Err(anyhow!(
                "scroll_pause_secs must be non-negative, got {}",
                self.scroll_pause_secs
            ));
        }

        Ok(ScrapeConfig {
            target_url,
            job_limit: self.job_limit,
            delay_range: self.delay_range,
            scroll_pause_secs: self.scroll_pause_secs,
            max_scrolls: self.max_scrolls,
            output_path: self.output_path,
        })
    }
}
