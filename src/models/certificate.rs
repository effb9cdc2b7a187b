//! Canonical certificate record produced from a board item.

use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder for fields with no value.
pub const PLACEHOLDER: &str = "-";

/// Link value for certificates without a usable document URL.
pub const NO_LINK: &str = "#";

/// One crew member's qualification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,

    /// Owner (crew member) name
    pub name: String,

    /// Certificate subject, e.g. SMS or TAWS
    pub subject_title: String,

    /// Generic/start date, formatted for display
    pub date: String,

    /// Expiry date, formatted for display
    pub expired_date: String,

    pub status: Status,

    pub certificate_link: String,

    /// Where `expired_date` was taken from
    pub derived_from: ExpirySource,
}

impl Certificate {
    /// A certificate with every field at its default.
    pub fn new(id: impl Into<String>, owner: impl Into<String>, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        Self {
            id: id.into(),
            name: owner.into(),
            subject_title: if subject.trim().is_empty() {
                PLACEHOLDER.to_string()
            } else {
                subject
            },
            date: PLACEHOLDER.to_string(),
            expired_date: PLACEHOLDER.to_string(),
            status: Status::Valid,
            certificate_link: NO_LINK.to_string(),
            derived_from: ExpirySource::None,
        }
    }
}

/// Certificate status; serialized as the upper-case label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Valid,
    Expired,
    Pending,
    Invalid,
    Unknown,
    /// Any other upstream label, upper-cased
    Other(String),
}

impl Status {
    /// Build a status from an upstream label, upper-casing it.
    pub fn from_label(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        match upper.as_str() {
            "" => Status::Unknown,
            "VALID" => Status::Valid,
            "EXPIRED" => Status::Expired,
            "PENDING" => Status::Pending,
            "INVALID" => Status::Invalid,
            "UNKNOWN" => Status::Unknown,
            _ => Status::Other(upper),
        }
    }

    /// Map a status column's color index.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => Status::Valid,
            1 => Status::Expired,
            2 => Status::Pending,
            3 => Status::Invalid,
            _ => Status::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Valid => "VALID",
            Status::Expired => "EXPIRED",
            Status::Pending => "PENDING",
            Status::Invalid => "INVALID",
            Status::Unknown => "UNKNOWN",
            Status::Other(label) => label,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Origin of a certificate's expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirySource {
    /// A column whose title names an expiry
    Column,
    /// The first future date found on any column; a guess
    Heuristic,
    /// The configured subject fallback table
    Table,
    None,
}
