//! Tests for the dedup/export store: clear-then-rewrite saves and the
//! seen-links query.

use std::collections::HashSet;

use jobscrape::scrape::JobRecord;
use jobscrape::store;

fn record(link: &str) -> JobRecord {
    JobRecord {
        title: format!("Engineer {link}"),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        date: "2 days ago".to_string(),
        description: "Build things.".to_string(),
        link: link.to_string(),
        external_link: String::new(),
    }
}

#[test]
fn save_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");

    store::save(&[record("a"), record("b")], &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Title,Company,Location,Date,Description,Link,E_Link"
    );
    assert_eq!(lines.clone().count(), 2);
}

#[test]
fn save_with_no_records_still_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");

    store::save(&[], &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents.trim_end(),
        "Title,Company,Location,Date,Description,Link,E_Link"
    );
}

#[test]
fn second_save_replaces_body_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");

    store::save(&[record("r1-a"), record("r1-b"), record("r1-c")], &path).unwrap();
    store::save(&[record("r2-a")], &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("r1-a"), "stale rows survived the rewrite");
    assert!(contents.contains("r2-a"));
    assert_eq!(contents.lines().count(), 2); // header + one row
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/output/jobs.csv");

    store::save(&[record("a")], &path).unwrap();
    assert!(path.exists());
}

#[test]
fn seen_links_on_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-written.csv");

    assert!(store::load_seen_links(&path).unwrap().is_empty());
}

#[test]
fn seen_links_on_header_only_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    store::save(&[], &path).unwrap();

    assert!(store::load_seen_links(&path).unwrap().is_empty());
}

#[test]
fn seen_links_returns_link_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    store::save(&[record("a"), record("b")], &path).unwrap();

    let seen = store::load_seen_links(&path).unwrap();
    let expected: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn seen_links_skips_blank_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    store::save(&[record("a"), record("")], &path).unwrap();

    let seen = store::load_seen_links(&path).unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen.contains("a"));
}

#[test]
fn fields_with_commas_and_newlines_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");

    let mut tricky = record("https://jobs.example/1?a=1&b=2");
    tricky.description = "Line one,\nline \"two\"".to_string();
    store::save(&[tricky], &path).unwrap();

    let seen = store::load_seen_links(&path).unwrap();
    assert!(seen.contains("https://jobs.example/1?a=1&b=2"));
}
