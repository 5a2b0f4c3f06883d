use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Category, Goal, ResultEngine, Transaction, categories, dashboard,
    dashboard::Dashboard,
    planner::{self, GoalPlan},
    transactions,
};

use super::{Engine, transactions::TransactionListFilter, transactions::validate_list_filter};

impl Engine {
    /// Builds the user's dashboard: fetches the full pre-joined
    /// `(transaction, category)` snapshot and hands it to the pure
    /// aggregator, which also applies the date window.
    pub async fn dashboard(
        &self,
        user_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ResultEngine<Dashboard> {
        validate_list_filter(&TransactionListFilter { from, to })?;

        let rows: Vec<(transactions::Model, Option<categories::Model>)> =
            transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id.to_string()))
                .find_also_related(categories::Entity)
                .order_by_asc(transactions::Column::Id)
                .all(&self.database)
                .await?;

        let mut snapshot: Vec<(Transaction, Option<Category>)> = Vec::with_capacity(rows.len());
        for (tx_model, category_model) in rows {
            let tx = Transaction::try_from(tx_model)?;
            let category = category_model.map(Category::try_from).transpose()?;
            snapshot.push((tx, category));
        }

        Ok(dashboard::aggregate(&snapshot, from, to))
    }

    /// Computes the contribution plan for one of the user's goals as of
    /// `today`.
    pub async fn goal_plan(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        today: NaiveDate,
    ) -> ResultEngine<(Goal, GoalPlan)> {
        let goal = self.goal(user_id, goal_id).await?;
        let plan = planner::plan(goal.target_amount, goal.current_amount, goal.target_date, today);
        Ok((goal, plan))
    }
}
