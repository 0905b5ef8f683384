//! Request and Response models for the store server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ExpireRequest, SetRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, ExpireResponse, GetResponse, HealthResponse, SetResponse,
    SnapshotResponse, StatsResponse, TtlResponse,
};
