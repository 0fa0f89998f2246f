//! Handlers for tag endpoints (read-only).

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::tags::TagResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all tags, unpaginated.
///
/// # Endpoint
///
/// `GET /api/tags/`
pub async fn tag_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = state.catalog_service.tags().await?;

    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// Returns one tag.
///
/// # Endpoint
///
/// `GET /api/tags/{id}/`
pub async fn tag_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TagResponse>, AppError> {
    let tag = state.catalog_service.tag(id).await?;

    Ok(Json(tag.into()))
}
