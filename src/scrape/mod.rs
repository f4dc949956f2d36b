//! Listing navigation and extraction pipeline
//!
//! Loader scrolls the listing to completion, the card extractor maps rendered
//! cards to partial records, the detail resolver fills in descriptions and
//! external application links, and the orchestrator sequences the whole pass.

pub mod card;
pub mod detail;
pub mod loader;
pub mod orchestrator;
pub mod types;

pub use orchestrator::run;
pub use types::{JobRecord, ListingCard};
