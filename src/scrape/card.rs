//! Card extractor: one rendered card to one partial record
//!
//! Each of the five fields is a typed scoped lookup collapsed to an empty
//! string here, at assembly. Partial data is preferable to record loss: a
//! single missing field never aborts extraction of the others.

use chromiumoxide::element::Element;
use tracing::debug;

use super::types::{
    COMPANY_SELECTOR, LINK_SELECTOR, LOCATION_SELECTOR, ListingCard, POSTED_DATE_SELECTOR,
    TITLE_SELECTOR,
};
use crate::session::{scoped_attr, scoped_text};

/// Extract the summary fields from one rendered listing card.
pub async fn extract(card: &Element) -> ListingCard {
    let title = scoped_text(card, TITLE_SELECTOR).await.unwrap_or_default();
    let company = scoped_text(card, COMPANY_SELECTOR).await.unwrap_or_default();
    let location = scoped_text(card, LOCATION_SELECTOR).await.unwrap_or_default();
    let posted = scoped_text(card, POSTED_DATE_SELECTOR).await.unwrap_or_default();
    let link = scoped_attr(card, LINK_SELECTOR, "href")
        .await
        .unwrap_or_default();

    if link.is_empty() {
        debug!("Card has no detail link; detail resolution will be skipped");
    }

    ListingCard {
        title,
        company,
        location,
        posted,
        link,
    }
}
