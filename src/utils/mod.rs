//! Utility functions and helpers.

pub mod date;
pub mod http;
pub mod url;

pub use date::{format_date, parse_date};
pub use url::clean_url;
