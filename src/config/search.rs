//! Search parameter to URL mapping
//!
//! User-entered search parameters map deterministically onto the listing
//! site's query string: date-posted and salary become fixed filter codes,
//! work types become a comma-joined mode list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Base URL of the job search listing.
pub const SEARCH_BASE_URL: &str = "https://www.linkedin.com/jobs/search/";

/// Fixed region id appended to every search.
const GEO_ID: &str = "103644278";

/// Workplace mode filter (`f_WT` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    OnSite,
    Remote,
    Hybrid,
}

impl WorkType {
    pub fn code(self) -> &'static str {
        match self {
            WorkType::OnSite => "1",
            WorkType::Remote => "2",
            WorkType::Hybrid => "3",
        }
    }

    /// Parse the label used by the settings UI.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "on-site" | "onsite" => Some(WorkType::OnSite),
            "remote" => Some(WorkType::Remote),
            "hybrid" => Some(WorkType::Hybrid),
            _ => None,
        }
    }
}

/// Posting age filter (`f_TPR` query parameter, relative-time codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatePosted {
    #[default]
    AnyTime,
    Past24Hours,
    PastWeek,
    PastMonth,
}

impl DatePosted {
    /// Seconds-based relative-time code, `None` for the unfiltered case.
    pub fn code(self) -> Option<&'static str> {
        match self {
            DatePosted::AnyTime => None,
            DatePosted::Past24Hours => Some("r86400"),
            DatePosted::PastWeek => Some("r604800"),
            DatePosted::PastMonth => Some("r2592000"),
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "last 24 hours" => DatePosted::Past24Hours,
            "a week" => DatePosted::PastWeek,
            "a month" => DatePosted::PastMonth,
            _ => DatePosted::AnyTime,
        }
    }
}

/// Minimum salary band filter (`f_SB2` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SalaryBand {
    #[default]
    All,
    Min40k,
    Min60k,
    Min80k,
    Min100k,
    Min120k,
}

impl SalaryBand {
    pub fn code(self) -> Option<&'static str> {
        match self {
            SalaryBand::All => None,
            SalaryBand::Min40k => Some("1"),
            SalaryBand::Min60k => Some("2"),
            SalaryBand::Min80k => Some("3"),
            SalaryBand::Min100k => Some("4"),
            SalaryBand::Min120k => Some("5"),
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "$40,000+" => SalaryBand::Min40k,
            "$60,000+" => SalaryBand::Min60k,
            "$80,000+" => SalaryBand::Min80k,
            "$100,000+" => SalaryBand::Min100k,
            "$120,000+" => SalaryBand::Min120k,
            _ => SalaryBand::All,
        }
    }
}

/// User-entered search parameters from the settings collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
    pub location: String,
    pub work_types: Vec<WorkType>,
    pub date_posted: DatePosted,
    pub salary: SalaryBand,
}

impl SearchParams {
    /// Combine the parameters into a search URL via the fixed
    /// query-parameter mapping.
    pub fn to_search_url(&self) -> Result<String> {
        let mut url = Url::parse(SEARCH_BASE_URL).context("Failed to parse search base URL")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("keywords", &self.keyword)
                .append_pair("location", &self.location)
                .append_pair("geoId", GEO_ID);

            if let Some(code) = self.salary.code() {
                pairs.append_pair("f_SB2", code);
            }
            if let Some(code) = self.date_posted.code() {
                pairs.append_pair("f_TPR", code);
            }
            if !self.work_types.is_empty() {
                let modes: Vec<&str> = self.work_types.iter().map(|w| w.code()).collect();
                pairs.append_pair("f_WT", &modes.join(","));
            }
        }
        Ok(url.into())
    }
}
