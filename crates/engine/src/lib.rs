//! Persistence and computation core of the finance tracker.
//!
//! The [`Engine`] owns the database connection and exposes owner-scoped CRUD
//! operations; the [`dashboard`] and [`planner`] modules hold the pure
//! computations those operations feed.

pub use categories::{Category, CategoryKind};
pub use error::EngineError;
pub use goals::Goal;
pub use ops::{Engine, EngineBuilder, TransactionListFilter, TransactionPatch, GoalPatch};
pub use transactions::Transaction;
pub use users::User;

mod categories;
pub mod dashboard;
mod error;
mod goals;
mod ops;
pub mod planner;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
