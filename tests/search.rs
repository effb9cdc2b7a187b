//! End-to-end search over board snapshots in each upstream shape.

use std::sync::Arc;

use async_trait::async_trait;
use certificate_tracker::error::Result;
use certificate_tracker::models::{BoardSnapshot, Certificate, ExpirySource, Status};
use certificate_tracker::services::{
    BoardSource, CertificateService, Normalizer, search_snapshot,
};
use chrono::NaiveDate;

fn fixture(name: &str) -> BoardSnapshot {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    let content = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn search(name: &str, term: &str) -> Vec<Certificate> {
    search_snapshot(&fixture(name), term, &Normalizer::default(), today())
}

#[test]
fn test_grouped_board() {
    let results = search("grouped", "rez");
    assert_eq!(results.len(), 3);

    let sms = &results[0];
    assert_eq!(sms.name, "REZA SAPUTRA");
    assert_eq!(sms.subject_title, "SMS");
    assert_eq!(sms.expired_date, "29 Desember 2027");
    assert_eq!(sms.derived_from, ExpirySource::Table);
    assert_eq!(sms.status, Status::Valid);
    assert_eq!(sms.certificate_link, "https://drive.google.com/file/d/sms/view");

    let crm = &results[1];
    assert_eq!(crm.expired_date, "15 Desember 2020");
    assert_eq!(crm.status, Status::Expired);

    let avsec = &results[2];
    assert_eq!(avsec.expired_date, "-");
    assert_eq!(avsec.status, Status::Pending);
    assert_eq!(avsec.derived_from, ExpirySource::None);
}

#[test]
fn test_grouped_board_other_owner() {
    let results = search("grouped", "PRATAMA");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].subject_title, "TAWS");
    assert_eq!(results[0].expired_date, "3 Agustus 2025");
}

#[test]
fn test_nested_board() {
    let results = search("nested", "reza");
    let subjects: Vec<_> = results.iter().map(|c| c.subject_title.as_str()).collect();
    assert_eq!(subjects, vec!["CET", "DG"]);

    // "Valid Until" has no expiry keyword; the future date is a guess.
    assert_eq!(results[0].expired_date, "1 Juli 2030");
    assert_eq!(results[0].derived_from, ExpirySource::Heuristic);

    assert_eq!(results[1].expired_date, "15 Mei 2026");
    assert_eq!(results[1].derived_from, ExpirySource::Column);
    assert!(results.iter().all(|c| c.name == "REZA SAPUTRA"));
}

#[test]
fn test_nested_board_item_without_subitems() {
    let results = search("nested", "andi");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "600");
    assert_eq!(results[0].subject_title, "ANDI PRATAMA");
}

#[test]
fn test_flat_board() {
    let results = search("flat", "reza");
    assert_eq!(results.len(), 1);
    let cert = &results[0];
    assert_eq!(cert.subject_title, "WINDSHEAR");
    assert_eq!(cert.status.to_string(), "PENDING REVIEW");
    assert_eq!(cert.expired_date, "15 Desember 2025");

    let results = search("flat", "andi");
    assert_eq!(results[0].date, "10 Januari 2026");
    assert_eq!(results[0].expired_date, "10 Januari 2026");
    assert_eq!(results[0].derived_from, ExpirySource::Heuristic);
}

#[test]
fn test_no_match_in_any_shape() {
    for name in ["grouped", "nested", "flat"] {
        assert!(search(name, "budi").is_empty(), "fixture: {name}");
    }
}

struct FixtureSource(&'static str);

#[async_trait]
impl BoardSource for FixtureSource {
    async fn fetch_board(&self) -> Result<BoardSnapshot> {
        Ok(fixture(self.0))
    }
}

#[tokio::test]
async fn test_service_over_fixture() {
    let service = CertificateService::new(Arc::new(FixtureSource("flat")), Normalizer::default());
    let results = service.search("Reza").await.unwrap();
    assert_eq!(results.len(), 1);

    let snapshot = service.snapshot().await.unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(
        value["boards"][0]["items_page"]["items"][0]["group"]["title"],
        "REZA SAPUTRA"
    );
}
