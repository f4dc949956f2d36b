//! Configuration for scrape runs
//!
//! Provides the immutable [`ScrapeConfig`] value constructed once per run and
//! passed by reference through the pipeline, its type-safe builder, the
//! search-parameter to URL mapping, and the on-disk settings file produced by
//! the settings UI.

pub mod builder;
pub mod search;
pub mod settings;
pub mod types;

pub use builder::{Complete, ScrapeConfigBuilder, WithTargetUrl};
pub use search::{DatePosted, SalaryBand, SearchParams, WorkType};
pub use settings::Settings;
pub use types::ScrapeConfig;
