use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Goal, ResultEngine, goals};

use super::{Engine, normalize_required_text, with_tx};

/// Partial update for a goal; `None` fields stay unchanged.
#[derive(Clone, Debug, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
}

impl GoalPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.target_amount.is_none()
            && self.current_amount.is_none()
            && self.target_date.is_none()
    }
}

impl Engine {
    /// Creates a savings goal for `user_id`.
    pub async fn create_goal(
        &self,
        user_id: Uuid,
        title: &str,
        target_amount: f64,
        current_amount: f64,
        target_date: NaiveDate,
    ) -> ResultEngine<Goal> {
        let title = normalize_required_text(title, "goal title")?;
        let goal = Goal::new(user_id, title, target_amount, current_amount, target_date)?;
        goals::ActiveModel::from(&goal).insert(&self.database).await?;
        Ok(goal)
    }

    /// Lists the user's goals in stable id order.
    pub async fn list_goals(&self, user_id: Uuid) -> ResultEngine<Vec<Goal>> {
        let models = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(goals::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Goal::try_from).collect()
    }

    /// Returns one of the user's goals.
    pub async fn goal(&self, user_id: Uuid, goal_id: Uuid) -> ResultEngine<Goal> {
        with_tx!(self, |db_tx| {
            let model = self.require_goal(&db_tx, user_id, goal_id).await?;
            Goal::try_from(model)
        })
    }

    /// Applies a partial update, re-validating the amount invariants on the
    /// resulting snapshot. An all-empty patch is a no-op returning the
    /// current row.
    pub async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        patch: GoalPatch,
    ) -> ResultEngine<Goal> {
        with_tx!(self, |db_tx| {
            let model = self.require_goal(&db_tx, user_id, goal_id).await?;
            let mut goal = Goal::try_from(model)?;

            if !patch.is_empty() {
                if let Some(title) = &patch.title {
                    goal.title = normalize_required_text(title, "goal title")?;
                }
                if let Some(target_amount) = patch.target_amount {
                    goal.target_amount = target_amount;
                }
                if let Some(current_amount) = patch.current_amount {
                    goal.current_amount = current_amount;
                }
                if let Some(target_date) = patch.target_date {
                    goal.target_date = target_date;
                }
                crate::goals::validate_amounts(goal.target_amount, goal.current_amount)?;

                let active = goals::ActiveModel {
                    id: ActiveValue::Set(goal.id.to_string()),
                    title: ActiveValue::Set(goal.title.clone()),
                    target_amount: ActiveValue::Set(goal.target_amount),
                    current_amount: ActiveValue::Set(goal.current_amount),
                    target_date: ActiveValue::Set(goal.target_date),
                    ..Default::default()
                };
                active.update(&db_tx).await?;
            }
            Ok(goal)
        })
    }

    /// Deletes one of the user's goals.
    pub async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_goal(&db_tx, user_id, goal_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
