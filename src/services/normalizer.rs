// src/services/normalizer.rs

//! Certificate normalization.
//!
//! Turns one board item (plus the owner it was found under) into a
//! [`Certificate`], reconciling the column shapes the board has used over
//! time and applying the expiry/status fallbacks.

use chrono::{Local, NaiveDate};
use tracing::{debug, trace, trace_span};

use crate::models::{Certificate, ExpirySource, FallbackExpiry, PLACEHOLDER, RawItem, Status};
use crate::services::classifier::{ColumnRole, classify};
use crate::services::extract::{extract_date, extract_link, extract_raw_date, extract_status};
use crate::utils::{format_date, parse_date};

/// Builds certificates from board items.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    fallback: FallbackExpiry,
}

impl Normalizer {
    /// Create a normalizer with the given subject fallback table.
    pub fn new(fallback: FallbackExpiry) -> Self {
        Self { fallback }
    }

    /// Normalize an item against the local wall-clock date.
    pub fn normalize(&self, item: &RawItem, owner: &str) -> Certificate {
        self.normalize_on(item, owner, Local::now().date_naive())
    }

    /// Normalize an item, treating `today` as the current date.
    pub fn normalize_on(&self, item: &RawItem, owner: &str, today: NaiveDate) -> Certificate {
        let span = trace_span!("normalize", item = %item.id, subject = %item.name);
        let _enter = span.enter();

        let mut cert = Certificate::new(&item.id, owner, &item.name);
        // Raw (pre-format) expiry string, used for date comparisons.
        let mut expiry_raw: Option<String> = None;

        for column in &item.columns {
            let role = classify(column.title());
            let _column = trace_span!(
                "column",
                id = %column.id,
                title = %column.title(),
                role = ?role
            )
            .entered();

            match role {
                ColumnRole::ExpiryDate => {
                    if let Some(raw) = extract_raw_date(column) {
                        cert.expired_date = format_date(&raw);
                        cert.derived_from = ExpirySource::Column;
                        expiry_raw = Some(raw);
                    }
                }
                ColumnRole::Status => cert.status = extract_status(column),
                ColumnRole::CertificateLink => cert.certificate_link = extract_link(column),
                ColumnRole::OwnerName => {
                    if let Some(text) = column.display_text() {
                        cert.name = text.trim().to_string();
                    }
                }
                ColumnRole::GenericDate => {
                    if cert.date == PLACEHOLDER {
                        let date = extract_date(column);
                        if date != PLACEHOLDER {
                            cert.date = date;
                        }
                    }
                }
                ColumnRole::Unclassified => {}
            }
            trace!("expired_date={} status={}", cert.expired_date, cert.status);
        }

        if expiry_raw.is_none() {
            let future = item.columns.iter().find_map(|column| {
                let raw = extract_raw_date(column)?;
                let date = parse_date(&raw)?;
                (date > today).then(|| (column.title().to_string(), raw))
            });
            if let Some((title, raw)) = future {
                debug!(
                    "No expiry column on {:?}; guessing future date {} from column {:?}",
                    cert.subject_title, raw, title
                );
                cert.expired_date = format_date(&raw);
                cert.derived_from = ExpirySource::Heuristic;
                expiry_raw = Some(raw);
            }
        }

        if expiry_raw.is_none() {
            if let Some(raw) = self.fallback.lookup(&cert.subject_title) {
                trace!("Using fallback expiry {} for {}", raw, cert.subject_title);
                cert.expired_date = format_date(raw);
                cert.derived_from = ExpirySource::Table;
                expiry_raw = Some(raw.to_string());
            }
        }

        if cert.status == Status::Valid {
            if let Some(raw) = &expiry_raw {
                cert.status = status_on(raw, today);
            }
        }

        debug!(
            "Normalized {:?} for {:?}: expires {} ({:?}), status {}",
            cert.subject_title, cert.name, cert.expired_date, cert.derived_from, cert.status
        );
        cert
    }
}

/// Status implied by an expiry date relative to `today`.
///
/// A certificate stays valid through its expiry day.
fn status_on(raw_expiry: &str, today: NaiveDate) -> Status {
    match parse_date(raw_expiry) {
        Some(expiry) if expiry < today => Status::Expired,
        Some(_) => Status::Valid,
        None => Status::Unknown,
    }
}
