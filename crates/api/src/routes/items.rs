use axum::routing::get;
use axum::Router;

use crate::handlers::candy_item;
use crate::state::AppState;

/// Candy item routes, mounted at `/items`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(candy_item::list).post(candy_item::create))
        .route(
            "/{id}",
            get(candy_item::get_by_id)
                .put(candy_item::update)
                .delete(candy_item::delete),
        )
}
