//! Data structures and selectors for the scrape pipeline

use serde::{Deserialize, Serialize};

// =============================================================================
// Selectors
// =============================================================================

/// CSS selector for one listing card on the search results page
pub const CARD_SELECTOR: &str = "li div.base-search-card";

/// CSS selector for the job title within a card
pub const TITLE_SELECTOR: &str = "h3.base-search-card__title";

/// CSS selector for the company name within a card
pub const COMPANY_SELECTOR: &str = "h4.base-search-card__subtitle";

/// CSS selector for the location within a card
pub const LOCATION_SELECTOR: &str = "span.job-search-card__location";

/// CSS selector for the detail-page link within a card
pub const LINK_SELECTOR: &str = "a.base-card__full-link";

/// CSS selector for the relative posted-date within a card
pub const POSTED_DATE_SELECTOR: &str = "time";

/// CSS selector for the full description region on a detail page
pub const DESCRIPTION_SELECTOR: &str = "section.description";

/// CSS selector for the company-profile/apply anchor on a detail page
pub const APPLY_ANCHOR_SELECTOR: &str =
    "h4.top-card-layout__second-subline a.topcard__org-name-link";

/// CSS selector for the outbound redirect anchor inside the secondary tab
pub const OUTBOUND_LINK_SELECTOR: &str = "dd.font-sans a.link-no-visited-state";

/// Maximum time to wait for a detail-page element to render (seconds)
pub const DOM_WAIT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Data Structures
// =============================================================================

/// Summary fields read from one rendered listing card.
///
/// Ephemeral, owned by one scroll snapshot. Any field may be an empty string
/// when absent from the markup; fields are never optional so downstream code
/// stays total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted: String,
    pub link: String,
}

/// One assembled output record, immutable once built.
///
/// Serialized field names are the fixed output header; `link` is the natural
/// deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "E_Link")]
    pub external_link: String,
}

impl JobRecord {
    /// Combine a listing card with detail-resolver output.
    pub fn assemble(card: ListingCard, description: String, external_link: String) -> Self {
        Self {
            title: card.title,
            company: card.company,
            location: card.location,
            date: card.posted,
            description,
            link: card.link,
            external_link,
        }
    }
}
