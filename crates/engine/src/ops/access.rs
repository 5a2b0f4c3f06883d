use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, categories, goals, transactions};

use super::Engine;

/// Generates an owner-scoped `require_*` lookup for a target entity.
///
/// A row owned by another user is indistinguishable from a missing row:
/// both yield `KeyNotFound`.
macro_rules! impl_require_owned {
    ($require_fn:ident, $entity:path, $owner_col:expr, $model:ty, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: Uuid,
            target_id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(target_id.to_string())
                .filter($owner_col.eq(user_id.to_string()))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_require_owned!(
        require_category,
        categories::Entity,
        categories::Column::UserId,
        categories::Model,
        "category not exists"
    );

    impl_require_owned!(
        require_transaction,
        transactions::Entity,
        transactions::Column::UserId,
        transactions::Model,
        "transaction not exists"
    );

    impl_require_owned!(
        require_goal,
        goals::Entity,
        goals::Column::UserId,
        goals::Model,
        "goal not exists"
    );
}
