pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                 GET
/// /items                  GET, POST
/// /items/{id}             GET, PUT, DELETE
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/items", items::router())
}
