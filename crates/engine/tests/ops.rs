use chrono::NaiveDate;
use sea_orm::Database;

use engine::{CategoryKind, Engine, EngineError, GoalPatch, TransactionListFilter, TransactionPatch};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn create_user_rejects_duplicate_email() {
    let engine = engine_with_db().await;

    let alice = engine.create_user("Alice@Example.com", "hash-a").await.unwrap();
    assert_eq!(alice.email, "alice@example.com");

    let err = engine
        .create_user("alice@example.com", "hash-b")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn user_lookup_by_email_and_id() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();

    let by_email = engine.user_by_email("ALICE@example.com").await.unwrap();
    assert_eq!(by_email, Some(alice.clone()));

    let by_id = engine.user_by_id(alice.id).await.unwrap();
    assert_eq!(by_id, alice);

    assert_eq!(engine.user_by_email("nobody@example.com").await.unwrap(), None);
}

#[tokio::test]
async fn categories_are_scoped_per_user() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let bob = engine.create_user("bob@example.com", "hash").await.unwrap();

    let salary = engine
        .create_category(alice.id, "Salary", CategoryKind::Income)
        .await
        .unwrap();
    engine
        .create_category(bob.id, "Rent", CategoryKind::Expense)
        .await
        .unwrap();

    let listed = engine.list_categories(alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Salary");
    assert_eq!(listed[0].kind, CategoryKind::Income);

    // Bob cannot delete Alice's category.
    let err = engine.delete_category(bob.id, salary.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    engine.delete_category(alice.id, salary.id).await.unwrap();
    assert!(engine.list_categories(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_transaction_requires_owned_category() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let bob = engine.create_user("bob@example.com", "hash").await.unwrap();

    let salary = engine
        .create_category(alice.id, "Salary", CategoryKind::Income)
        .await
        .unwrap();

    let err = engine
        .create_transaction(bob.id, 100.0, date(2024, 1, 5), None, salary.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let (tx, category) = engine
        .create_transaction(alice.id, 1000.0, date(2024, 1, 5), Some("January"), salary.id)
        .await
        .unwrap();
    assert_eq!(tx.amount, 1000.0);
    assert_eq!(tx.note.as_deref(), Some("January"));
    assert_eq!(category.id, salary.id);
}

#[tokio::test]
async fn list_transactions_filters_and_paginates() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let groceries = engine
        .create_category(alice.id, "Groceries", CategoryKind::Expense)
        .await
        .unwrap();

    for day in 1..=5 {
        engine
            .create_transaction(alice.id, 10.0 * f64::from(day), date(2024, 2, day as u32), None, groceries.id)
            .await
            .unwrap();
    }

    // Newest first, date filter inclusive on both ends.
    let filter = TransactionListFilter {
        from: Some(date(2024, 2, 2)),
        to: Some(date(2024, 2, 4)),
    };
    let (rows, next) = engine
        .list_transactions(alice.id, &filter, None, None)
        .await
        .unwrap();
    assert!(next.is_none());
    let dates: Vec<NaiveDate> = rows.iter().map(|(tx, _)| tx.date).collect();
    assert_eq!(dates, vec![date(2024, 2, 4), date(2024, 2, 3), date(2024, 2, 2)]);

    // Cursor walk over the whole set, two per page.
    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let (rows, next) = engine
            .list_transactions(
                alice.id,
                &TransactionListFilter::default(),
                Some(2),
                cursor.as_deref(),
            )
            .await
            .unwrap();
        seen.extend(rows.into_iter().map(|(tx, _)| tx.date));
        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    assert_eq!(seen.len(), 5);
    assert!(seen.windows(2).all(|w| w[0] >= w[1]));

    let err = engine
        .list_transactions(
            alice.id,
            &TransactionListFilter {
                from: Some(date(2024, 3, 1)),
                to: Some(date(2024, 2, 1)),
            },
            None,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = engine
        .list_transactions(alice.id, &TransactionListFilter::default(), Some(2), Some("???"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCursor(_)));

    // A zero limit would dead-end pagination, so it is refused outright.
    let err = engine
        .list_transactions(alice.id, &TransactionListFilter::default(), Some(0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn update_transaction_is_partial_and_owner_checked() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let bob = engine.create_user("bob@example.com", "hash").await.unwrap();
    let groceries = engine
        .create_category(alice.id, "Groceries", CategoryKind::Expense)
        .await
        .unwrap();
    let dining = engine
        .create_category(alice.id, "Dining", CategoryKind::Expense)
        .await
        .unwrap();

    let (tx, _) = engine
        .create_transaction(alice.id, 40.0, date(2024, 3, 1), Some("weekly shop"), groceries.id)
        .await
        .unwrap();

    let err = engine
        .update_transaction(bob.id, tx.id, TransactionPatch {
            amount: Some(1.0),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // An empty patch is a no-op, not an error.
    let (unchanged, _) = engine
        .update_transaction(alice.id, tx.id, TransactionPatch::default())
        .await
        .unwrap();
    assert_eq!(unchanged.amount, 40.0);
    assert_eq!(unchanged.note.as_deref(), Some("weekly shop"));

    let (updated, category) = engine
        .update_transaction(alice.id, tx.id, TransactionPatch {
            amount: Some(55.5),
            category_id: Some(dining.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.amount, 55.5);
    assert_eq!(updated.date, date(2024, 3, 1));
    assert_eq!(updated.note.as_deref(), Some("weekly shop"));
    assert_eq!(category.map(|c| c.id), Some(dining.id));

    engine.delete_transaction(alice.id, tx.id).await.unwrap();
    let (rows, _) = engine
        .list_transactions(alice.id, &TransactionListFilter::default(), None, None)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn goal_crud_validates_amounts_and_ownership() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let bob = engine.create_user("bob@example.com", "hash").await.unwrap();

    let err = engine
        .create_goal(alice.id, "Bike", -10.0, 0.0, date(2025, 6, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let goal = engine
        .create_goal(alice.id, "Bike", 1200.0, 100.0, date(2025, 6, 1))
        .await
        .unwrap();

    let err = engine.goal(bob.id, goal.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let updated = engine
        .update_goal(alice.id, goal.id, GoalPatch {
            current_amount: Some(250.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.current_amount, 250.0);
    assert_eq!(updated.target_amount, 1200.0);

    let err = engine
        .update_goal(alice.id, goal.id, GoalPatch {
            current_amount: Some(-1.0),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let unchanged = engine
        .update_goal(alice.id, goal.id, GoalPatch::default())
        .await
        .unwrap();
    assert_eq!(unchanged.current_amount, 250.0);

    engine.delete_goal(alice.id, goal.id).await.unwrap();
    assert!(engine.list_goals(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_over_live_data() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let salary = engine
        .create_category(alice.id, "Salary", CategoryKind::Income)
        .await
        .unwrap();
    let groceries = engine
        .create_category(alice.id, "Groceries", CategoryKind::Expense)
        .await
        .unwrap();

    engine
        .create_transaction(alice.id, 1000.0, date(2024, 1, 5), None, salary.id)
        .await
        .unwrap();
    engine
        .create_transaction(alice.id, 400.0, date(2024, 1, 10), None, groceries.id)
        .await
        .unwrap();

    let dashboard = engine.dashboard(alice.id, None, None).await.unwrap();
    assert_eq!(dashboard.income_total, 1000.0);
    assert_eq!(dashboard.expense_total, 400.0);
    assert_eq!(dashboard.net, 600.0);
    assert_eq!(dashboard.tx_count, 2);
    assert_eq!(dashboard.by_category.len(), 2);

    let filtered = engine
        .dashboard(alice.id, Some(date(2024, 1, 6)), Some(date(2024, 1, 31)))
        .await
        .unwrap();
    assert_eq!(filtered.income_total, 0.0);
    assert_eq!(filtered.expense_total, 400.0);
    assert_eq!(filtered.net, -400.0);
    assert_eq!(filtered.tx_count, 1);

    // Deleting a category orphans its transaction: still counted, not totaled.
    engine.delete_category(alice.id, groceries.id).await.unwrap();
    let after = engine.dashboard(alice.id, None, None).await.unwrap();
    assert_eq!(after.tx_count, 2);
    assert_eq!(after.expense_total, 0.0);
    assert_eq!(after.net, 1000.0);
    assert_eq!(after.by_category.len(), 1);
}

#[tokio::test]
async fn dashboard_only_sees_the_callers_rows() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let bob = engine.create_user("bob@example.com", "hash").await.unwrap();

    let bob_salary = engine
        .create_category(bob.id, "Salary", CategoryKind::Income)
        .await
        .unwrap();
    engine
        .create_transaction(bob.id, 5000.0, date(2024, 1, 2), None, bob_salary.id)
        .await
        .unwrap();

    let dashboard = engine.dashboard(alice.id, None, None).await.unwrap();
    assert_eq!(dashboard.tx_count, 0);
    assert_eq!(dashboard.net, 0.0);
    assert!(dashboard.by_category.is_empty());
}

#[tokio::test]
async fn goal_plan_over_live_data() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice@example.com", "hash").await.unwrap();
    let bob = engine.create_user("bob@example.com", "hash").await.unwrap();

    let goal = engine
        .create_goal(alice.id, "Vacation", 1200.0, 0.0, date(2024, 7, 15))
        .await
        .unwrap();

    let (snapshot, plan) = engine
        .goal_plan(alice.id, goal.id, date(2024, 1, 10))
        .await
        .unwrap();
    assert_eq!(snapshot.id, goal.id);
    assert_eq!(plan.months_remaining, 7);
    assert!((plan.monthly_required - 1200.0 / 7.0).abs() < 1e-9);

    let err = engine
        .goal_plan(bob.id, goal.id, date(2024, 1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}
