//! Service layer for the certificate tracker.
//!
//! This module contains the business logic for:
//! - Column role classification (`classify`)
//! - Column value extraction (`extract`)
//! - Certificate normalization (`Normalizer`)
//! - Board fetching (`MondayClient`)
//! - Owner search (`CertificateService`)

pub mod classifier;
pub mod extract;
pub mod monday;
pub mod normalizer;
pub mod search;

pub use classifier::{ColumnRole, classify};
pub use monday::{BoardSource, MondayClient, PAGE_SIZE};
pub use normalizer::Normalizer;
pub use search::{CertificateService, search_snapshot};
