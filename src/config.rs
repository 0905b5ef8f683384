//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::store::{DEFAULT_MAX_LEVEL, STORE_FILE, VOLATILE_LRU_THRESHOLD};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cap on skip-list tower height
    pub max_level: usize,
    /// Bound on the number of volatile (TTL-carrying) keys
    pub volatile_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Snapshot file path
    pub store_file: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_LEVEL` - Skip-list tower cap (default: 8)
    /// - `VOLATILE_CAPACITY` - Volatile LRU bound (default: 8)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORE_FILE` - Snapshot path (default: store/dumpFile)
    pub fn from_env() -> Self {
        Self {
            max_level: env::var("MAX_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_LEVEL),
            volatile_capacity: env::var("VOLATILE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(VOLATILE_LRU_THRESHOLD),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            store_file: env::var("STORE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(STORE_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            volatile_capacity: VOLATILE_LRU_THRESHOLD,
            server_port: 3000,
            store_file: PathBuf::from(STORE_FILE),
        }
    }
}
