//! API Module
//!
//! HTTP handlers and routing for the store server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `PUT /expire` - Attach a TTL to a key
//! - `GET /ttl/:key` - Query a key's remaining lifetime
//! - `GET /stats` - Get store statistics
//! - `POST /dump` - Write the snapshot file
//! - `POST /load` - Merge the snapshot file into memory
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
