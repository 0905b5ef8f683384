//! Response DTOs for the store server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::{InsertOutcome, StoreStats, TtlStatus};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Whether the key was newly inserted or overwritten
    pub outcome: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, outcome: InsertOutcome) -> Self {
        let key = key.into();
        let outcome = match outcome {
            InsertOutcome::Inserted => "inserted",
            InsertOutcome::Updated => "updated",
        };
        Self {
            message: format!("Key '{}' {} successfully", key, outcome),
            key,
            outcome: outcome.to_string(),
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the EXPIRE operation (PUT /expire)
#[derive(Debug, Clone, Serialize)]
pub struct ExpireResponse {
    /// Success message
    pub message: String,
    /// The key the TTL was attached to
    pub key: String,
    /// Granted lifetime in seconds
    pub seconds: u64,
}

impl ExpireResponse {
    /// Creates a new ExpireResponse
    pub fn new(key: impl Into<String>, seconds: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' expires in {} seconds", key, seconds),
            key,
            seconds,
        }
    }
}

/// Response body for the TTL operation (GET /ttl/:key)
///
/// `status` is one of `persistent`, `expired` (key was just reaped) or
/// `live`; `remaining` carries the seconds left only when live.
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    /// The requested key
    pub key: String,
    /// Liveness classification
    pub status: String,
    /// Seconds left before expiry, when live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
}

impl TtlResponse {
    /// Creates a new TtlResponse from a ttl outcome
    pub fn new(key: impl Into<String>, status: TtlStatus) -> Self {
        let (status, remaining) = match status {
            TtlStatus::Persistent => ("persistent", None),
            TtlStatus::Expired => ("expired", None),
            TtlStatus::Remaining(secs) => ("live", Some(secs)),
        };
        Self {
            key: key.into(),
            status: status.to_string(),
            remaining,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of keys in the skip list
    pub elements: usize,
    /// Highest occupied skip-list level
    pub level: usize,
    /// Number of volatile (TTL-carrying) keys
    pub volatile_entries: usize,
    /// Bound on the volatile key count
    pub volatile_capacity: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from store statistics
    pub fn new(stats: StoreStats) -> Self {
        Self {
            elements: stats.elements,
            level: stats.level,
            volatile_entries: stats.volatile_entries,
            volatile_capacity: stats.volatile_capacity,
        }
    }
}

/// Response body for the snapshot endpoints (POST /dump, POST /load)
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    /// Success message
    pub message: String,
    /// Number of records written or loaded
    pub records: usize,
}

impl SnapshotResponse {
    pub fn dumped(records: usize) -> Self {
        Self {
            message: format!("Snapshot written ({} records)", records),
            records,
        }
    }

    pub fn loaded(records: usize) -> Self {
        Self {
            message: format!("Snapshot loaded ({} records)", records),
            records,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
