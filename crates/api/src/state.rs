use std::sync::Arc;

use novelverse_db::Storage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Handlers talk to
/// persistence exclusively through the `Storage` trait object, which is what
/// lets integration tests run the full router over in-memory storage.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL in production, in-memory in tests).
    pub storage: Arc<dyn Storage>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
