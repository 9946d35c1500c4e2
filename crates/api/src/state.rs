use std::sync::Arc;

use candy_db::store::CandyStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store selected at start-up.
    pub store: Arc<dyn CandyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CandyStore>) -> Self {
        Self { store }
    }
}
