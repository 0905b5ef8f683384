//! Request DTOs for the store server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: The value to store
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The store key
    pub key: String,
    /// The value to store
    pub value: String,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.contains(':') {
            return Some("Key cannot contain the ':' delimiter".to_string());
        }
        if self.key.contains('\n') || self.value.contains('\n') {
            return Some("Keys and values cannot contain newlines".to_string());
        }
        None
    }
}

/// Request body for the EXPIRE operation (PUT /expire)
///
/// # Fields
/// - `key`: The key to attach a TTL to
/// - `seconds`: Lifetime in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct ExpireRequest {
    /// The store key
    pub key: String,
    /// Lifetime in seconds
    pub seconds: u64,
}

impl ExpireRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}
