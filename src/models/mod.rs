// src/models/mod.rs

//! Domain models for the certificate tracker.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod board;
mod certificate;
mod config;

// Re-export all public types
pub use board::{
    BoardEntry, BoardShape, BoardSnapshot, ColumnKind, ColumnMeta, GroupRef, ItemsPage, RawBoard,
    RawColumn, RawGroup, RawItem,
};
pub use certificate::{Certificate, ExpirySource, NO_LINK, PLACEHOLDER, Status};
pub use config::{
    Config, FallbackExpiry, LoggingConfig, MondayConfig, QueryVariant, ServerConfig,
};
