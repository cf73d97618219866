//! Tests for the search query builder and session configuration

use std::time::Duration;
use tempfile::TempDir;
use udn_newsscrape::{ScrapeError, SearchQuery, SessionConfig};

#[test]
fn test_builder_requires_keyword_and_dates() {
    // Does not compile: dates missing
    // let query = SearchQuery::builder().keyword("颱風").build();

    let query = SearchQuery::builder()
        .keyword("颱風")
        .date_range("2024-01-01", "2024-01-31")
        .build()
        .unwrap();

    assert_eq!(query.keyword(), "颱風");
    assert_eq!(query.start_date(), "2024-01-01");
    assert_eq!(query.end_date(), "2024-01-31");
    assert_eq!(query.max_pages(), None);
    assert_eq!(query.max_articles(), 50);
}

#[test]
fn test_limits_can_be_set_in_any_state() {
    let query = SearchQuery::builder()
        .max_articles(5)
        .keyword("地震")
        .max_pages(2)
        .date_range("2023-09-01", "2023-09-30")
        .build()
        .unwrap();

    assert_eq!(query.max_pages(), Some(2));
    assert_eq!(query.max_articles(), 5);
}

#[test]
fn test_zero_page_cap_means_no_cap() {
    let query = SearchQuery::builder()
        .keyword("選舉")
        .date_range("2024-01-01", "2024-01-13")
        .max_pages(0)
        .build()
        .unwrap();
    assert_eq!(query.max_pages(), None);
}

#[test]
fn test_blank_keyword_is_rejected() {
    for keyword in ["", "   ", "\t\n"] {
        let err = SearchQuery::builder()
            .keyword(keyword)
            .date_range("2024-01-01", "2024-01-31")
            .build()
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)), "accepted {keyword:?}");
    }
}

#[test]
fn test_dates_are_passed_verbatim() {
    let query = SearchQuery::builder()
        .keyword("x")
        .date_range("not-a-date", "2024/13/45")
        .build()
        .unwrap();
    assert_eq!(query.start_date(), "not-a-date");
    assert_eq!(query.end_date(), "2024/13/45");
}

#[test]
fn test_session_defaults() {
    let config = SessionConfig::default();
    assert_eq!(config.portal_url(), "https://udndata.com/ndapp/Index?cp=udn");
    assert_eq!(config.wait_timeout(), Duration::from_secs(10));
    assert_eq!(config.poll_interval(), Duration::from_millis(500));
    assert_eq!(config.article_settle(), Duration::from_secs(2));
    assert_eq!(config.login_settle(), Duration::from_secs(3));
    assert_eq!(config.page_settle(), Duration::from_secs(3));
    assert_eq!(config.results_settle(), Duration::from_secs(5));
    assert!(!config.headless());
    assert!(config.user_data_dir().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_without_settle_delays() {
    let config = SessionConfig::default().without_settle_delays();
    assert!(config.article_settle().is_zero());
    assert!(config.login_settle().is_zero());
    assert!(config.page_settle().is_zero());
    assert!(config.results_settle().is_zero());
}

#[test]
fn test_poll_interval_longer_than_timeout_is_invalid() {
    let config = SessionConfig::default()
        .with_wait_timeout(Duration::from_secs(1))
        .with_poll_interval(Duration::from_secs(2));
    assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));

    let config = SessionConfig::default().with_poll_interval(Duration::ZERO);
    assert!(config.validate().is_err());
}

#[test]
fn test_json_file_fills_missing_fields_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{ "headless": true, "user_data_dir": "/tmp/udn-profile", "wait_timeout_secs": 20 }"#,
    )
    .unwrap();

    let config = SessionConfig::from_json_file(&path).unwrap();
    assert!(config.headless());
    assert_eq!(
        config.user_data_dir().map(|p| p.to_string_lossy().into_owned()),
        Some("/tmp/udn-profile".to_string())
    );
    assert_eq!(config.wait_timeout(), Duration::from_secs(20));
    assert_eq!(config.poll_interval(), Duration::from_millis(500));
}

#[test]
fn test_json_file_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = SessionConfig::from_json_file(temp_dir.path().join("absent.json"));
    assert!(matches!(missing, Err(ScrapeError::Io(_))));

    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ headless: yes").unwrap();
    assert!(matches!(
        SessionConfig::from_json_file(&path),
        Err(ScrapeError::Config(_))
    ));
}
