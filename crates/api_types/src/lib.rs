use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Income-producing vs expense-producing tag on a category.
///
/// Serialized as `"income"` / `"expense"`; the JSON field carrying it is
/// named `type` for wire compatibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub email: String,
    }

    /// Login form body (`application/x-www-form-urlencoded`); the username
    /// field carries the email, OAuth2 password-flow style.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenRequest {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub access_token: String,
        pub token_type: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        pub amount: f64,
        /// `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub note: Option<String>,
        pub category_id: Uuid,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub amount: Option<f64>,
        pub date: Option<NaiveDate>,
        pub note: Option<String>,
        pub category_id: Option<Uuid>,
    }

    /// Query string for `GET /transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListParams {
        pub from_date: Option<NaiveDate>,
        pub to_date: Option<NaiveDate>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Newest → older pagination.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub amount: f64,
        pub date: NaiveDate,
        pub note: Option<String>,
        /// `None` when the category was deleted after the fact.
        pub category: Option<super::category::CategoryView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
        pub next_cursor: Option<String>,
    }
}

pub mod goal {
    use super::*;

    fn default_current_amount() -> f64 {
        0.0
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalCreate {
        pub title: String,
        pub target_amount: f64,
        #[serde(default = "default_current_amount")]
        pub current_amount: f64,
        /// `YYYY-MM-DD`.
        pub target_date: NaiveDate,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GoalUpdate {
        pub title: Option<String>,
        pub target_amount: Option<f64>,
        pub current_amount: Option<f64>,
        pub target_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: Uuid,
        pub title: String,
        pub target_amount: f64,
        pub current_amount: f64,
        pub target_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalPlanResponse {
        pub goal_id: Uuid,
        pub months_remaining: i32,
        pub monthly_required: f64,
        pub current_amount: f64,
        pub target_amount: f64,
        pub target_date: NaiveDate,
    }
}

pub mod dashboard {
    use super::*;

    /// Query string for `GET /dashboard`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DashboardParams {
        pub from_date: Option<NaiveDate>,
        pub to_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category_id: Uuid,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
        pub total: f64,
        pub count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub income_total: f64,
        pub expense_total: f64,
        pub net: f64,
        pub tx_count: u64,
        pub by_category: Vec<CategoryTotal>,
    }
}

/// Response body for the `DELETE` endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
    pub id: Uuid,
}
