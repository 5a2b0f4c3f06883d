use base64::Engine as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, Condition, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, ResultEngine, Transaction, categories, transactions};

use super::{Engine, normalize_optional_text, with_tx};

/// Date filters for listing transactions.
///
/// Both bounds are inclusive (`[from, to]`), calendar dates.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Partial update for a transaction; `None` fields stay unchanged.
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub category_id: Option<Uuid>,
}

impl TransactionPatch {
    fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.note.is_none()
            && self.category_id.is_none()
    }
}

pub(super) fn validate_list_filter(filter: &TransactionListFilter) -> ResultEngine<()> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(EngineError::InvalidInput(
            "invalid range: from_date must be <= to_date".to_string(),
        ));
    }
    Ok(())
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionListFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionListFilter) -> Self {
        if let Some(from) = filter.from {
            self = self.filter(transactions::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            self = self.filter(transactions::Column::Date.lte(to));
        }
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TransactionsCursor {
    date: NaiveDate,
    transaction_id: String,
}

impl TransactionsCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))
    }
}

impl Engine {
    /// Records a transaction. The category must exist and belong to the
    /// same user; the joined category snapshot is returned for the caller's
    /// response view.
    pub async fn create_transaction(
        &self,
        user_id: Uuid,
        amount: f64,
        date: NaiveDate,
        note: Option<&str>,
        category_id: Uuid,
    ) -> ResultEngine<(Transaction, Category)> {
        if !amount.is_finite() {
            return Err(EngineError::InvalidInput(
                "amount must be a finite number".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let category_model = self.require_category(&db_tx, user_id, category_id).await?;
            let category = Category::try_from(category_model)?;

            let tx = Transaction::new(
                user_id,
                amount,
                date,
                normalize_optional_text(note),
                category_id,
            );
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok((tx, category))
        })
    }

    /// Lists the user's transactions newest-first as pre-joined
    /// `(transaction, category)` snapshots; the category side is `None` for
    /// orphans.
    ///
    /// Without `limit` the full filtered set is returned. With `limit`,
    /// keyset pagination by `(date DESC, id DESC)` applies and a `next`
    /// cursor is handed back while more rows remain.
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionListFilter,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<(Transaction, Option<Category>)>, Option<String>)> {
        validate_list_filter(filter)?;
        // A zero-row page could never carry a next cursor.
        if limit == Some(0) {
            return Err(EngineError::InvalidInput(
                "limit must be >= 1".to_string(),
            ));
        }

        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .find_also_related(categories::Entity)
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .apply_tx_filters(filter);

        if let Some(cursor) = cursor {
            let cursor = TransactionsCursor::decode(cursor)?;
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::Date.lt(cursor.date))
                    .add(
                        Condition::all()
                            .add(transactions::Column::Date.eq(cursor.date))
                            .add(transactions::Column::Id.lt(cursor.transaction_id)),
                    ),
            );
        }
        if let Some(limit) = limit {
            query = query.limit(limit.saturating_add(1));
        }

        let rows: Vec<(transactions::Model, Option<categories::Model>)> =
            query.all(&self.database).await?;
        let has_more = limit.is_some_and(|limit| rows.len() > limit as usize);
        let take = limit.map_or(rows.len(), |limit| limit as usize);

        let mut out: Vec<(Transaction, Option<Category>)> = Vec::with_capacity(rows.len().min(take));
        for (tx_model, category_model) in rows.into_iter().take(take) {
            let tx = Transaction::try_from(tx_model)?;
            let category = category_model.map(Category::try_from).transpose()?;
            out.push((tx, category));
        }

        let next_cursor = if has_more {
            out.last()
                .map(|(tx, _)| TransactionsCursor {
                    date: tx.date,
                    transaction_id: tx.id.to_string(),
                })
                .map(|c| c.encode())
                .transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }

    /// Applies a partial update. A new `category_id` is checked for
    /// ownership like on create. An all-empty patch is a no-op returning
    /// the current row.
    pub async fn update_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
        patch: TransactionPatch,
    ) -> ResultEngine<(Transaction, Option<Category>)> {
        if patch.amount.is_some_and(|amount| !amount.is_finite()) {
            return Err(EngineError::InvalidInput(
                "amount must be a finite number".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self
                .require_transaction(&db_tx, user_id, transaction_id)
                .await?;
            let mut tx = Transaction::try_from(model)?;

            if !patch.is_empty() {
                if let Some(category_id) = patch.category_id {
                    self.require_category(&db_tx, user_id, category_id).await?;
                    tx.category_id = category_id;
                }
                if let Some(amount) = patch.amount {
                    tx.amount = amount;
                }
                if let Some(date) = patch.date {
                    tx.date = date;
                }
                if let Some(note) = &patch.note {
                    tx.note = normalize_optional_text(Some(note));
                }

                let active = transactions::ActiveModel {
                    id: ActiveValue::Set(tx.id.to_string()),
                    amount: ActiveValue::Set(tx.amount),
                    date: ActiveValue::Set(tx.date),
                    note: ActiveValue::Set(tx.note.clone()),
                    category_id: ActiveValue::Set(tx.category_id.to_string()),
                    ..Default::default()
                };
                active.update(&db_tx).await?;
            }

            let category = categories::Entity::find_by_id(tx.category_id.to_string())
                .one(&db_tx)
                .await?
                .map(Category::try_from)
                .transpose()?;
            Ok((tx, category))
        })
    }

    /// Deletes one of the user's transactions.
    pub async fn delete_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_transaction(&db_tx, user_id, transaction_id)
                .await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
