// src/lib.rs

//! Certificate Tracker Library
//!
//! Fetches crew certificate records from a monday.com board, normalizes
//! their columns into [`models::Certificate`] records, and serves a
//! search-by-name API.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;
