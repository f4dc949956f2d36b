//! On-disk settings file produced by the settings UI
//!
//! The settings collaborator writes a JSON object with raw UI labels; this
//! module reads it once per run and converts it into an immutable
//! [`ScrapeConfig`]. An explicit `search_url` wins over a generated one.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::search::{DatePosted, SalaryBand, SearchParams, WorkType};
use super::types::ScrapeConfig;

/// Fixed path the process entry reads its settings from.
pub const SETTINGS_PATH: &str = "config/settings.json";

fn default_scroll_pause() -> f64 {
    super::builder::DEFAULT_SCROLL_PAUSE_SECS
}

fn default_max_scrolls() -> usize {
    super::builder::DEFAULT_MAX_SCROLLS
}

fn default_delay_range() -> (f64, f64) {
    super::builder::DEFAULT_DELAY_RANGE
}

fn default_output_file() -> String {
    super::builder::DEFAULT_OUTPUT_PATH.to_string()
}

/// Raw settings file contents, labels as the UI writes them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub work_type: Vec<String>,
    #[serde(default)]
    pub date_posted: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub job_limit: Option<usize>,
    #[serde(default = "default_scroll_pause")]
    pub scroll_pause_time: f64,
    #[serde(default = "default_max_scrolls")]
    pub max_scrolls: usize,
    #[serde(default = "default_delay_range")]
    pub delay_range: (f64, f64),
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Pre-built search URL; generated from the other fields when absent.
    #[serde(default, alias = "linkedin_url")]
    pub search_url: Option<String>,
}

impl Settings {
    /// Read and parse the settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Search parameters parsed from the raw UI labels.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            keyword: self.keyword.clone(),
            location: self.location.clone(),
            work_types: self
                .work_type
                .iter()
                .filter_map(|label| WorkType::from_label(label))
                .collect(),
            date_posted: DatePosted::from_label(&self.date_posted),
            salary: SalaryBand::from_label(&self.salary),
        }
    }

    /// Convert into the validated run configuration.
    pub fn into_config(self) -> Result<ScrapeConfig> {
        let target_url = match &self.search_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.search_params().to_search_url()?,
        };

        ScrapeConfig::builder()
            .target_url(target_url)
            .job_limit(self.job_limit)
            .delay_range(self.delay_range.0, self.delay_range.1)
            .scroll_pause_secs(self.scroll_pause_time)
            .max_scrolls(self.max_scrolls)
            .output_path(self.output_file)
            .build()
    }
}
