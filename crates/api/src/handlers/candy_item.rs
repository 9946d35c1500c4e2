//! Handlers for the `/items` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use candy_core::candy::{CandyItemPatch, CandyItemPayload, NewCandyItem};
use candy_core::types::DbId;
use candy_db::models::candy_item::CandyItem;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /items
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CandyItem>>> {
    let items = state.store.list().await?;
    Ok(Json(items))
}

/// GET /items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CandyItem>> {
    let item = state.store.get(id).await?;
    Ok(Json(item))
}

/// POST /items
///
/// Requires non-empty `name`, `color`, `flavorType` and a positive
/// `weightGrams`. Enum-like fields default when omitted.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CandyItemPayload>,
) -> AppResult<(StatusCode, Json<CandyItem>)> {
    let input = NewCandyItem::from_payload(payload)?;
    let item = state.store.create(&input).await?;

    tracing::info!(
        item_id = item.id,
        backend = %state.store.backend(),
        "Candy item created",
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{id}
///
/// Partial update: fields missing from the body are left unchanged.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(payload): JsonBody<CandyItemPayload>,
) -> AppResult<Json<CandyItem>> {
    let patch = CandyItemPatch::from_payload(payload)?;
    let item = state.store.update(id, &patch).await?;

    tracing::info!(item_id = id, empty_patch = patch.is_empty(), "Candy item updated");

    Ok(Json(item))
}

/// DELETE /items/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.store.delete(id).await?;

    tracing::info!(item_id = id, "Candy item deleted");

    Ok(Json(MessageResponse::new(format!(
        "Candy item {id} deleted"
    ))))
}
