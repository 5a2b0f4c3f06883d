//! Category API endpoints.

use api_types::Deleted;
use api_types::category::{CategoryCreate, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn kind_to_api(kind: engine::CategoryKind) -> api_types::CategoryKind {
    match kind {
        engine::CategoryKind::Income => api_types::CategoryKind::Income,
        engine::CategoryKind::Expense => api_types::CategoryKind::Expense,
    }
}

pub(crate) fn kind_from_api(kind: api_types::CategoryKind) -> engine::CategoryKind {
    match kind {
        api_types::CategoryKind::Income => engine::CategoryKind::Income,
        api_types::CategoryKind::Expense => engine::CategoryKind::Expense,
    }
}

pub(crate) fn view_for(category: &engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name.clone(),
        kind: kind_to_api(category.kind),
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state.engine.list_categories(user.id).await?;
    Ok(Json(categories.iter().map(view_for).collect()))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(user.id, &payload.name, kind_from_api(payload.kind))
        .await?;

    Ok((StatusCode::CREATED, Json(view_for(&category))))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_category(user.id, category_id).await?;
    Ok(Json(Deleted {
        deleted: true,
        id: category_id,
    }))
}
