// src/services/search.rs

//! Certificate search service.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{BoardSnapshot, Certificate};
use crate::services::monday::BoardSource;
use crate::services::normalizer::Normalizer;

/// Searches a board for certificates by owner name.
pub struct CertificateService {
    source: Arc<dyn BoardSource>,
    normalizer: Normalizer,
}

impl CertificateService {
    /// Create a new service over a board source.
    pub fn new(source: Arc<dyn BoardSource>, normalizer: Normalizer) -> Self {
        Self { source, normalizer }
    }

    /// Fetch the raw board snapshot.
    pub async fn snapshot(&self) -> Result<BoardSnapshot> {
        self.source.fetch_board().await
    }

    /// Fetch the board and return certificates whose owner matches `term`.
    ///
    /// Callers are expected to reject blank terms.
    pub async fn search(&self, term: &str) -> Result<Vec<Certificate>> {
        let snapshot = self.source.fetch_board().await?;
        let results = search_snapshot(
            &snapshot,
            term,
            &self.normalizer,
            Local::now().date_naive(),
        );
        info!("Search {:?} matched {} certificate(s)", term, results.len());
        Ok(results)
    }
}

/// Certificates in `snapshot` whose group identity contains `term`,
/// case-insensitively, in board order.
///
/// A matched item with subitems yields one certificate per subitem;
/// otherwise the item itself is the certificate.
pub fn search_snapshot(
    snapshot: &BoardSnapshot,
    term: &str,
    normalizer: &Normalizer,
    today: NaiveDate,
) -> Vec<Certificate> {
    let needle = term.to_lowercase();
    let mut results = Vec::new();

    for entry in snapshot.entries() {
        if !entry.identity.to_lowercase().contains(&needle) {
            continue;
        }
        debug!("{:?} matches {:?}", entry.identity, term);

        if entry.item.subitems.is_empty() {
            results.push(normalizer.normalize_on(entry.item, entry.identity, today));
        } else {
            results.extend(
                entry
                    .item
                    .subitems
                    .iter()
                    .map(|sub| normalizer.normalize_on(sub, entry.identity, today)),
            );
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::AppError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn grouped() -> BoardSnapshot {
        serde_json::from_value(json!({ "boards": [{
            "name": "Crew Certificates",
            "columns": [],
            "groups": [
                { "id": "g1", "title": "REZA SAPUTRA", "items": [
                    { "id": "1", "name": "SMS", "column_values": [] },
                    { "id": "2", "name": "CRM", "column_values": [] }
                ]},
                { "id": "g2", "title": "ANDI PRATAMA", "items": [
                    { "id": "3", "name": "TAWS", "column_values": [] }
                ]}
            ]
        }]}))
        .unwrap()
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let results = search_snapshot(&grouped(), "rez", &Normalizer::default(), today());
        let subjects: Vec<_> = results.iter().map(|c| c.subject_title.as_str()).collect();
        assert_eq!(subjects, vec!["SMS", "CRM"]);
        assert!(results.iter().all(|c| c.name == "REZA SAPUTRA"));
    }

    #[test]
    fn test_no_match() {
        assert!(search_snapshot(&grouped(), "budi", &Normalizer::default(), today()).is_empty());
    }

    #[test]
    fn test_term_matching_all_groups_keeps_board_order() {
        let results = search_snapshot(&grouped(), "a", &Normalizer::default(), today());
        let ids: Vec<_> = results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_subitems_become_certificates() {
        let snapshot: BoardSnapshot = serde_json::from_value(json!({ "boards": [{
            "items_page": { "items": [
                { "id": "1", "name": "REZA", "column_values": [], "subitems": [
                    { "id": "11", "name": "SMS", "column_values": [] },
                    { "id": "12", "name": "CET", "column_values": [] }
                ]}
            ]}
        }]}))
        .unwrap();

        let results = search_snapshot(&snapshot, "REZA", &Normalizer::default(), today());
        let ids: Vec<_> = results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["11", "12"]);
        assert_eq!(results[0].name, "REZA");
        assert_eq!(results[1].subject_title, "CET");
    }

    struct FailingSource;

    #[async_trait]
    impl BoardSource for FailingSource {
        async fn fetch_board(&self) -> Result<BoardSnapshot> {
            Err(AppError::upstream("boom"))
        }
    }

    struct FixedSource(BoardSnapshot);

    #[async_trait]
    impl BoardSource for FixedSource {
        async fn fetch_board(&self) -> Result<BoardSnapshot> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_service_search() {
        let service = CertificateService::new(
            Arc::new(FixedSource(grouped())),
            Normalizer::default(),
        );
        let results = service.search("andi").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].subject_title, "TAWS");
    }

    #[tokio::test]
    async fn test_service_propagates_fetch_errors() {
        let service = CertificateService::new(Arc::new(FailingSource), Normalizer::default());
        assert!(matches!(
            service.search("reza").await,
            Err(AppError::Upstream(_))
        ));
        assert!(service.snapshot().await.is_err());
    }
}
