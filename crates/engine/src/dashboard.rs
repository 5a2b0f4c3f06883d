//! Dashboard aggregation over an owner-scoped transaction snapshot.
//!
//! The input is a pre-joined, read-only sequence of `(transaction, category)`
//! pairs for a single user; the category side is `None` when the category
//! was deleted after the transaction was recorded. Pure and idempotent.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Category, CategoryKind, Transaction};

/// Per-category slice of the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category_id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    pub total: f64,
    pub count: u64,
}

/// Result of [`aggregate`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Dashboard {
    pub income_total: f64,
    pub expense_total: f64,
    pub net: f64,
    /// Count of every date-matching transaction, categorized or not. This is
    /// wider than the sum of `by_category` counts when orphans exist.
    pub tx_count: u64,
    /// Sorted by category id descending.
    pub by_category: Vec<CategoryTotal>,
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if from.is_some_and(|from| date < from) {
        return false;
    }
    if to.is_some_and(|to| date > to) {
        return false;
    }
    true
}

/// Groups a user's transactions by category and derives income/expense/net
/// totals, optionally restricted to an inclusive `[from, to]` date window.
///
/// Inner-join semantics: a transaction whose category is gone contributes to
/// `tx_count` only, never to `by_category` or the totals.
pub fn aggregate(
    rows: &[(Transaction, Option<Category>)],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Dashboard {
    let mut groups: HashMap<Uuid, CategoryTotal> = HashMap::new();
    let mut tx_count = 0u64;

    for (tx, category) in rows {
        if !in_range(tx.date, from, to) {
            continue;
        }
        tx_count += 1;

        let Some(category) = category else {
            continue;
        };
        let entry = groups.entry(category.id).or_insert_with(|| CategoryTotal {
            category_id: category.id,
            name: category.name.clone(),
            kind: category.kind,
            total: 0.0,
            count: 0,
        });
        entry.total += tx.amount;
        entry.count += 1;
    }

    let (income_total, expense_total) =
        groups
            .values()
            .fold((0.0f64, 0.0f64), |(income, expense), group| {
                match group.kind {
                    CategoryKind::Income => (income + group.total, expense),
                    CategoryKind::Expense => (income, expense + group.total),
                }
            });

    let mut by_category: Vec<CategoryTotal> = groups.into_values().collect();
    by_category.sort_by(|a, b| b.category_id.cmp(&a.category_id));

    Dashboard {
        income_total,
        expense_total,
        net: income_total - expense_total,
        tx_count,
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(name: &str, kind: CategoryKind) -> Category {
        Category::new(Uuid::new_v4(), name.to_string(), kind)
    }

    fn tx(amount: f64, on: NaiveDate, category: &Category) -> Transaction {
        Transaction::new(category.user_id, amount, on, None, category.id)
    }

    fn sample_rows() -> Vec<(Transaction, Option<Category>)> {
        let salary = category("Salary", CategoryKind::Income);
        let groceries = category("Groceries", CategoryKind::Expense);
        vec![
            (tx(1000.0, date(2024, 1, 5), &salary), Some(salary.clone())),
            (
                tx(400.0, date(2024, 1, 10), &groceries),
                Some(groceries.clone()),
            ),
        ]
    }

    #[test]
    fn income_expense_and_net() {
        let dashboard = aggregate(&sample_rows(), None, None);
        assert_eq!(dashboard.income_total, 1000.0);
        assert_eq!(dashboard.expense_total, 400.0);
        assert_eq!(dashboard.net, 600.0);
        assert_eq!(dashboard.tx_count, 2);
        assert_eq!(dashboard.by_category.len(), 2);
        assert!(dashboard.by_category.iter().all(|g| g.count == 1));
    }

    #[test]
    fn by_category_is_sorted_by_id_descending() {
        let dashboard = aggregate(&sample_rows(), None, None);
        let ids: Vec<Uuid> = dashboard.by_category.iter().map(|g| g.category_id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }

    #[test]
    fn date_window_excludes_out_of_range_rows() {
        let dashboard = aggregate(
            &sample_rows(),
            Some(date(2024, 1, 6)),
            Some(date(2024, 1, 31)),
        );
        assert_eq!(dashboard.income_total, 0.0);
        assert_eq!(dashboard.expense_total, 400.0);
        assert_eq!(dashboard.net, -400.0);
        assert_eq!(dashboard.tx_count, 1);
        assert_eq!(dashboard.by_category.len(), 1);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let dashboard = aggregate(
            &sample_rows(),
            Some(date(2024, 1, 5)),
            Some(date(2024, 1, 10)),
        );
        assert_eq!(dashboard.tx_count, 2);
        assert_eq!(dashboard.net, 600.0);
    }

    #[test]
    fn orphaned_transaction_counts_but_never_totals() {
        let mut rows = sample_rows();
        let deleted = category("Old hobby", CategoryKind::Expense);
        rows.push((tx(55.0, date(2024, 1, 12), &deleted), None));

        let dashboard = aggregate(&rows, None, None);
        assert_eq!(dashboard.tx_count, 3);
        assert_eq!(dashboard.expense_total, 400.0);
        assert_eq!(dashboard.by_category.len(), 2);
    }

    #[test]
    fn empty_snapshot_is_all_zeroes() {
        let dashboard = aggregate(&[], None, None);
        assert_eq!(dashboard, Dashboard::default());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let rows = sample_rows();
        assert_eq!(aggregate(&rows, None, None), aggregate(&rows, None, None));
    }
}
