// src/utils/url.rs

//! Certificate link cleaning.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{NO_LINK, PLACEHOLDER};

/// Hosted-document links, possibly wrapped inside another URL.
static HOSTED_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(?:(?:drive|docs)\.google\.com|(?:www\.)?dropbox\.com|1drv\.ms|onedrive\.live\.com|[\w-]+\.sharepoint\.com)/\S+",
    )
    .unwrap()
});

/// Reduce a raw link value to a usable document URL, or `#`.
///
/// A hosted-document URL embedded in a longer string (such as a
/// `localhost`-prefixed redirect) is returned on its own. Any other value
/// must already start with an HTTP(S) scheme. Idempotent.
pub fn clean_url(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() || url == PLACEHOLDER || url == NO_LINK {
        return NO_LINK.to_string();
    }

    if let Some(found) = HOSTED_DOCUMENT.find(url) {
        return found.as_str().to_string();
    }

    if has_http_scheme(url) {
        return url.to_string();
    }

    NO_LINK.to_string()
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
