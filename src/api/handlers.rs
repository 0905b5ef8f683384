//! API Handlers
//!
//! HTTP request handlers for each store server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{
    DeleteResponse, ExpireRequest, ExpireResponse, GetResponse, HealthResponse, SetRequest,
    SetResponse, SnapshotResponse, StatsResponse, TtlResponse,
};
use crate::store::{SkipStore, StoreOptions};

/// Application state shared across all handlers.
///
/// The store carries its own per-instance lock, so handlers share it through
/// a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe skip-list store
    pub store: Arc<SkipStore<String, String>>,
}

impl AppState {
    /// Creates a new AppState wrapping the given store.
    pub fn new(store: SkipStore<String, String>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store = SkipStore::with_options(StoreOptions {
            max_level: config.max_level,
            volatile_capacity: config.volatile_capacity,
            store_file: config.store_file.clone(),
            rng_seed: None,
        });
        Self::new(store)
    }
}

/// Handler for PUT /set
///
/// Binds a key to a value; an existing key is overwritten in place.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let outcome = state.store.insert(req.key.clone(), req.value);
    Ok(Json(SetResponse::new(req.key, outcome)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value by key, consulting the volatile LRU before the skip list.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.store.search(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(StoreError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deletes a key, cascading through the TTL registry and volatile LRU.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.store.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(StoreError::NotFound(key))
    }
}

/// Handler for PUT /expire
///
/// Attaches a TTL to an existing key, making it volatile. May evict the
/// least-recently-used volatile key as a side effect.
pub async fn expire_handler(
    State(state): State<AppState>,
    Json(req): Json<ExpireRequest>,
) -> Result<Json<ExpireResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    state.store.expire(req.key.clone(), req.seconds)?;
    Ok(Json(ExpireResponse::new(req.key, req.seconds)))
}

/// Handler for GET /ttl/:key
///
/// Reports the key's liveness; an expired key is reaped by this call.
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<TtlResponse> {
    let status = state.store.ttl(&key);
    Json(TtlResponse::new(key, status))
}

/// Handler for GET /stats
///
/// Returns current store statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.store.stats()))
}

/// Handler for POST /dump
///
/// Writes the level-0 snapshot to the store file.
pub async fn dump_handler(State(state): State<AppState>) -> Result<Json<SnapshotResponse>> {
    let records = state.store.dump()?;
    Ok(Json(SnapshotResponse::dumped(records)))
}

/// Handler for POST /load
///
/// Merges the store-file snapshot into the in-memory state.
pub async fn load_handler(State(state): State<AppState>) -> Result<Json<SnapshotResponse>> {
    let records = state.store.load()?;
    Ok(Json(SnapshotResponse::loaded(records)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
