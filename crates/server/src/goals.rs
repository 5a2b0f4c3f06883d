//! Savings goal API endpoints.

use api_types::Deleted;
use api_types::goal::{GoalCreate, GoalUpdate, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::GoalPatch;

pub(crate) fn view_for(goal: &engine::Goal) -> GoalView {
    GoalView {
        id: goal.id,
        title: goal.title.clone(),
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        target_date: goal.target_date,
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.list_goals(user.id).await?;
    Ok(Json(goals.iter().map(view_for).collect()))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalCreate>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let goal = state
        .engine
        .create_goal(
            user.id,
            &payload.title,
            payload.target_amount,
            payload.current_amount,
            payload.target_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view_for(&goal))))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Json<GoalView>, ServerError> {
    let patch = GoalPatch {
        title: payload.title,
        target_amount: payload.target_amount,
        current_amount: payload.current_amount,
        target_date: payload.target_date,
    };

    let goal = state.engine.update_goal(user.id, goal_id, patch).await?;
    Ok(Json(view_for(&goal)))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_goal(user.id, goal_id).await?;
    Ok(Json(Deleted {
        deleted: true,
        id: goal_id,
    }))
}
