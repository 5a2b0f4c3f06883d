use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Category, CategoryKind, ResultEngine, categories};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Creates a category for `user_id`.
    pub async fn create_category(
        &self,
        user_id: Uuid,
        name: &str,
        kind: CategoryKind,
    ) -> ResultEngine<Category> {
        let name = normalize_required_text(name, "category name")?;
        let category = Category::new(user_id, name, kind);
        categories::ActiveModel::from(&category)
            .insert(&self.database)
            .await?;
        Ok(category)
    }

    /// Lists the user's categories in stable id order.
    pub async fn list_categories(&self, user_id: Uuid) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Category::try_from).collect()
    }

    /// Deletes a category. Its transactions stay behind as orphans, which
    /// the dashboard counts but never totals.
    pub async fn delete_category(&self, user_id: Uuid, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_category(&db_tx, user_id, category_id).await?;
            model.delete(&db_tx).await?;
            tracing::debug!("deleted category {category_id}, its transactions are now orphaned");
            Ok(())
        })
    }
}
