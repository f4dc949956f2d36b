//! Tests for the scrape configuration builder, search URL mapping, and
//! settings-file parsing.

use std::path::Path;

use jobscrape::config::{DatePosted, SalaryBand, ScrapeConfig, SearchParams, Settings, WorkType};

#[test]
fn builder_defaults() {
    let config = ScrapeConfig::builder()
        .target_url("https://example.com/jobs")
        .build()
        .unwrap();

    assert_eq!(config.target_url(), "https://example.com/jobs");
    assert_eq!(config.job_limit(), None);
    assert_eq!(config.delay_range(), (2.0, 5.0));
    assert_eq!(config.scroll_pause_secs(), 2.0);
    assert_eq!(config.max_scrolls(), 20);
    assert_eq!(config.output_path(), Path::new("data/jobs.csv"));
}

#[test]
fn builder_rejects_inverted_delay_range() {
    let err = ScrapeConfig::builder()
        .target_url("https://example.com/jobs")
        .delay_range(5.0, 2.0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("exceeds max"));
}

#[test]
fn builder_rejects_negative_delays() {
    assert!(
        ScrapeConfig::builder()
            .target_url("https://example.com/jobs")
            .delay_range(-1.0, 2.0)
            .build()
            .is_err()
    );
    assert!(
        ScrapeConfig::builder()
            .target_url("https://example.com/jobs")
            .scroll_pause_secs(-0.5)
            .build()
            .is_err()
    );
}

#[test]
fn builder_accepts_zero_delay_range() {
    let config = ScrapeConfig::builder()
        .target_url("https://example.com/jobs")
        .delay_range(0.0, 0.0)
        .build()
        .unwrap();
    assert_eq!(config.delay_range(), (0.0, 0.0));
}

#[test]
fn search_url_maps_all_filters() {
    let params = SearchParams {
        keyword: "Senior Backend Engineer".to_string(),
        location: "United States".to_string(),
        work_types: vec![WorkType::Remote, WorkType::Hybrid],
        date_posted: DatePosted::Past24Hours,
        salary: SalaryBand::Min60k,
    };
    let url = params.to_search_url().unwrap();

    assert!(url.starts_with("https://www.linkedin.com/jobs/search/?"));
    assert!(url.contains("keywords=Senior+Backend+Engineer"));
    assert!(url.contains("location=United+States"));
    assert!(url.contains("geoId=103644278"));
    assert!(url.contains("f_TPR=r86400"));
    assert!(url.contains("f_SB2=2"));
    assert!(url.contains("f_WT=2%2C3"));
}

#[test]
fn search_url_omits_unset_filters() {
    let params = SearchParams {
        keyword: "rust".to_string(),
        location: "Berlin".to_string(),
        work_types: vec![],
        date_posted: DatePosted::AnyTime,
        salary: SalaryBand::All,
    };
    let url = params.to_search_url().unwrap();

    assert!(!url.contains("f_TPR"));
    assert!(!url.contains("f_SB2"));
    assert!(!url.contains("f_WT"));
}

#[test]
fn date_posted_codes() {
    assert_eq!(DatePosted::AnyTime.code(), None);
    assert_eq!(DatePosted::Past24Hours.code(), Some("r86400"));
    assert_eq!(DatePosted::PastWeek.code(), Some("r604800"));
    assert_eq!(DatePosted::PastMonth.code(), Some("r2592000"));
}

#[test]
fn salary_band_codes() {
    assert_eq!(SalaryBand::All.code(), None);
    assert_eq!(SalaryBand::Min40k.code(), Some("1"));
    assert_eq!(SalaryBand::Min60k.code(), Some("2"));
    assert_eq!(SalaryBand::Min80k.code(), Some("3"));
    assert_eq!(SalaryBand::Min100k.code(), Some("4"));
    assert_eq!(SalaryBand::Min120k.code(), Some("5"));
}

#[test]
fn work_type_labels_round_trip() {
    assert_eq!(WorkType::from_label("Remote"), Some(WorkType::Remote));
    assert_eq!(WorkType::from_label("Hybrid"), Some(WorkType::Hybrid));
    assert_eq!(WorkType::from_label("On-site"), Some(WorkType::OnSite));
    assert_eq!(WorkType::from_label("freelance"), None);
}

#[test]
fn settings_file_parses_ui_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "keyword": "Senior Backend Engineer",
            "location": "United States",
            "work_type": ["Remote"],
            "date_posted": "a week",
            "salary": "$80,000+",
            "job_limit": 20,
            "scroll_pause_time": 1.5,
            "max_scrolls": 10,
            "delay_range": [2, 5],
            "output_file": "data/linkedin_jobs.csv"
        }"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    let params = settings.search_params();
    assert_eq!(params.work_types, vec![WorkType::Remote]);
    assert_eq!(params.date_posted, DatePosted::PastWeek);
    assert_eq!(params.salary, SalaryBand::Min80k);

    let config = settings.into_config().unwrap();
    assert_eq!(config.job_limit(), Some(20));
    assert_eq!(config.delay_range(), (2.0, 5.0));
    assert_eq!(config.max_scrolls(), 10);
    assert_eq!(config.output_path(), Path::new("data/linkedin_jobs.csv"));
    assert!(config.target_url().contains("f_TPR=r604800"));
}

#[test]
fn explicit_search_url_wins_over_generated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "keyword": "ignored",
            "location": "ignored",
            "search_url": "https://www.linkedin.com/jobs/search/?keywords=fixed"
        }"#,
    )
    .unwrap();

    let config = Settings::load(&path).unwrap().into_config().unwrap();
    assert_eq!(
        config.target_url(),
        "https://www.linkedin.com/jobs/search/?keywords=fixed"
    );
}

#[test]
fn settings_accept_legacy_url_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "linkedin_url": "https://www.linkedin.com/jobs/search/?keywords=legacy" }"#,
    )
    .unwrap();

    let config = Settings::load(&path).unwrap().into_config().unwrap();
    assert!(config.target_url().ends_with("keywords=legacy"));
}
