//! Skipstore - An ordered in-memory key-value store
//!
//! Skip-list index with per-key TTL, lazy expiration, LRU-bounded volatile
//! keys and a line-oriented snapshot file.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{InsertOutcome, SkipStore, StoreOptions, TtlStatus};
