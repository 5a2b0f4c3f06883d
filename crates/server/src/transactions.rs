//! Transaction API endpoints.

use api_types::Deleted;
use api_types::transaction::{
    TransactionCreate, TransactionListParams, TransactionListResponse, TransactionUpdate,
    TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, categories, server::ServerState};
use engine::{TransactionListFilter, TransactionPatch};

fn view_for(
    transaction: &engine::Transaction,
    category: Option<&engine::Category>,
) -> TransactionView {
    TransactionView {
        id: transaction.id,
        amount: transaction.amount,
        date: transaction.date,
        note: transaction.note.clone(),
        category: category.map(categories::view_for),
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let filter = TransactionListFilter {
        from: params.from_date,
        to: params.to_date,
    };

    let (rows, next_cursor) = state
        .engine
        .list_transactions(user.id, &filter, params.limit, params.cursor.as_deref())
        .await?;

    Ok(Json(TransactionListResponse {
        transactions: rows
            .iter()
            .map(|(transaction, category)| view_for(transaction, category.as_ref()))
            .collect(),
        next_cursor,
    }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let (transaction, category) = state
        .engine
        .create_transaction(
            user.id,
            payload.amount,
            payload.date,
            payload.note.as_deref(),
            payload.category_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(view_for(&transaction, Some(&category))),
    ))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let patch = TransactionPatch {
        amount: payload.amount,
        date: payload.date,
        note: payload.note,
        category_id: payload.category_id,
    };

    let (transaction, category) = state
        .engine
        .update_transaction(user.id, transaction_id, patch)
        .await?;

    Ok(Json(view_for(&transaction, category.as_ref())))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_transaction(user.id, transaction_id).await?;
    Ok(Json(Deleted {
        deleted: true,
        id: transaction_id,
    }))
}
