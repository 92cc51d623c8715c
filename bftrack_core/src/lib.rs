#![forbid(unsafe_code)]

//! Core domain model and business logic for the bftrack body-composition tracker.
//!
//! This crate provides:
//! - Domain types (measurement snapshots, daily records, history)
//! - Body-fat estimation (U.S. Navy circumference method)
//! - Key-value persistence (in-memory and file-backed)
//! - Daily record book with upsert-per-date semantics
//! - Preference persistence for form pre-population

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod estimator;
pub mod store;
pub mod prefs;
pub mod records;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use estimator::estimate;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use records::RecordBook;
pub use session::Tracker;
