//! Store Module
//!
//! Skip-list backed ordered key-value store with per-key TTL and a bounded
//! LRU over the volatile key subset.

mod engine;
mod lru;
mod skiplist;
mod ttl;


// Re-export public types
pub use engine::{SkipStore, StoreOptions, StoreStats, TtlStatus};
pub use lru::{PutOutcome, VolatileLru};
pub use skiplist::{InsertOutcome, SkipList};
pub use ttl::{ExpiryState, TtlEntry, TtlRegistry};

// == Public Constants ==
/// Default cap on skip-list tower height
pub const DEFAULT_MAX_LEVEL: usize = 8;

/// Default bound on the number of volatile (TTL-carrying) keys
pub const VOLATILE_LRU_THRESHOLD: usize = 8;

/// Default snapshot file path
pub const STORE_FILE: &str = "store/dumpFile";

/// Snapshot record delimiter between key and value
pub const DELIMITER: char = ':';
