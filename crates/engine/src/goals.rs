//! Savings goals.
//!
//! A goal tracks progress towards a target amount by a target date. The
//! current amount may exceed the target; the planner reports zero remaining
//! in that case.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
}

impl Goal {
    pub fn new(
        user_id: Uuid,
        title: String,
        target_amount: f64,
        current_amount: f64,
        target_date: NaiveDate,
    ) -> ResultEngine<Self> {
        validate_amounts(target_amount, current_amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            target_amount,
            current_amount,
            target_date,
        })
    }
}

/// Both goal amounts must be finite and non-negative.
pub(crate) fn validate_amounts(target_amount: f64, current_amount: f64) -> ResultEngine<()> {
    if !target_amount.is_finite() || target_amount < 0.0 {
        return Err(EngineError::InvalidInput(
            "target_amount must be >= 0".to_string(),
        ));
    }
    if !current_amount.is_finite() || current_amount < 0.0 {
        return Err(EngineError::InvalidInput(
            "current_amount must be >= 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Goal> for ActiveModel {
    fn from(goal: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            user_id: ActiveValue::Set(goal.user_id.to_string()),
            title: ActiveValue::Set(goal.title.clone()),
            target_amount: ActiveValue::Set(goal.target_amount),
            current_amount: ActiveValue::Set(goal.current_amount),
            target_date: ActiveValue::Set(goal.target_date),
        }
    }
}

impl TryFrom<Model> for Goal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "goal")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            title: model.title,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            target_date: model.target_date,
        })
    }
}
