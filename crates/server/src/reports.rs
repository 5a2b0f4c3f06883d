//! Dashboard and goal projection endpoints.

use api_types::dashboard::{CategoryTotal, DashboardParams, DashboardResponse};
use api_types::goal::GoalPlanResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, categories, server::ServerState};

pub async fn dashboard(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let summary = state
        .engine
        .dashboard(user.id, params.from_date, params.to_date)
        .await?;

    Ok(Json(DashboardResponse {
        income_total: summary.income_total,
        expense_total: summary.expense_total,
        net: summary.net,
        tx_count: summary.tx_count,
        by_category: summary
            .by_category
            .iter()
            .map(|entry| CategoryTotal {
                category_id: entry.category_id,
                name: entry.name.clone(),
                kind: categories::kind_to_api(entry.kind),
                total: entry.total,
                count: entry.count,
            })
            .collect(),
    }))
}

pub async fn goal_plan(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
) -> Result<Json<GoalPlanResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let (goal, plan) = state.engine.goal_plan(user.id, goal_id, today).await?;

    Ok(Json(GoalPlanResponse {
        goal_id: goal.id,
        months_remaining: plan.months_remaining,
        monthly_required: plan.monthly_required,
        current_amount: goal.current_amount,
        target_amount: goal.target_amount,
        target_date: goal.target_date,
    }))
}
