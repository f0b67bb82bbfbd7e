//! Integration tests against a real on-disk SQLite database.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use spendwise_core::budgets::{
    Allocation, BudgetRepositoryTrait, CategoryType, CategoryUpdate, NewBudget, NewCategory,
};
use spendwise_core::settings::{SettingsRepositoryTrait, SettingsUpdate};
use spendwise_core::transactions::{
    NewTransaction, TransactionRepositoryTrait, TransactionType, TransactionUpdate,
};
use spendwise_storage_sqlite::budgets::BudgetRepository;
use spendwise_storage_sqlite::settings::SettingsRepository;
use spendwise_storage_sqlite::transactions::TransactionRepository;
use spendwise_storage_sqlite::db;

struct TestStore {
    _dir: TempDir,
    budgets: BudgetRepository,
    transactions: TransactionRepository,
    settings: SettingsRepository,
}

fn open_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendwise.db");
    let path = path.to_str().unwrap();
    db::init(path).unwrap();
    let pool = db::create_pool(path).unwrap();
    let writer = db::spawn_writer(pool.as_ref().clone());
    TestStore {
        _dir: dir,
        budgets: BudgetRepository::new(pool.clone(), writer.clone()),
        transactions: TransactionRepository::new(pool.clone(), writer.clone()),
        settings: SettingsRepository::new(pool, writer),
    }
}

fn new_budget(month: &str) -> NewBudget {
    NewBudget {
        id: None,
        name: format!("Budget {}", month),
        month: month.to_string(),
        total_income: dec!(150000),
    }
}

fn variable_category(name: &str) -> NewCategory {
    NewCategory {
        id: None,
        name: name.to_string(),
        planned_amount: dec!(0),
        category_type: CategoryType::Expense,
        allocation: Allocation::Variable {
            proportion: dec!(0.5),
        },
        color: Some("#3B82F6".to_string()),
        is_permanent: false,
    }
}

fn expense_on(category_id: &str, day: &str) -> NewTransaction {
    NewTransaction {
        id: None,
        category_id: category_id.to_string(),
        amount: dec!(250.50),
        description: "groceries run".to_string(),
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        transaction_type: TransactionType::Expense,
    }
}

#[tokio::test]
async fn create_budget_replaces_the_month() {
    let store = open_store();
    let first = store.budgets.create_budget(new_budget("2024-06")).await.unwrap();
    store
        .budgets
        .add_category("2024-06", variable_category("groceries"))
        .await
        .unwrap();

    let second = store.budgets.create_budget(new_budget("2024-06")).await.unwrap();
    assert_ne!(first.id, second.id);

    let budgets = store.budgets.get_all_budgets().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].id, second.id);
    // The replaced budget's categories went with it.
    assert!(budgets[0].categories.is_empty());
}

#[tokio::test]
async fn category_allocation_roundtrips() {
    let store = open_store();
    store.budgets.create_budget(new_budget("2024-06")).await.unwrap();
    let category = store
        .budgets
        .add_category("2024-06", variable_category("groceries"))
        .await
        .unwrap();
    assert_eq!(
        category.allocation,
        Allocation::Variable {
            proportion: dec!(0.5)
        }
    );

    // Switching to fixed drops the proportion column entirely.
    store
        .budgets
        .update_category(
            "2024-06",
            &category.id,
            CategoryUpdate {
                allocation: Some(Allocation::Fixed),
                planned_amount: Some(dec!(1200.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reloaded = store
        .budgets
        .get_category("2024-06", &category.id)
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.allocation, Allocation::Fixed);
    assert_eq!(reloaded.planned_amount, dec!(1200.00));

    let (month, found) = store.budgets.find_category(&category.id).unwrap().unwrap();
    assert_eq!(month, "2024-06");
    assert_eq!(found.name, "groceries");
}

#[tokio::test]
async fn set_planned_amounts_updates_only_named_categories() {
    let store = open_store();
    store.budgets.create_budget(new_budget("2024-06")).await.unwrap();
    let a = store
        .budgets
        .add_category("2024-06", variable_category("a"))
        .await
        .unwrap();
    let b = store
        .budgets
        .add_category("2024-06", variable_category("b"))
        .await
        .unwrap();

    store
        .budgets
        .set_planned_amounts("2024-06", vec![(a.id.clone(), dec!(52500.00))])
        .await
        .unwrap();

    let budget = store.budgets.get_budget("2024-06").unwrap().unwrap();
    assert_eq!(budget.category(&a.id).unwrap().planned_amount, dec!(52500.00));
    assert_eq!(budget.category(&b.id).unwrap().planned_amount, dec!(0));
}

#[tokio::test]
async fn remove_category_deletes_only_that_months_transactions() {
    let store = open_store();
    store.budgets.create_budget(new_budget("2024-06")).await.unwrap();
    let category = store
        .budgets
        .add_category("2024-06", variable_category("groceries"))
        .await
        .unwrap();

    store
        .transactions
        .add_transaction(expense_on(&category.id, "2024-06-10"))
        .await
        .unwrap();
    store
        .transactions
        .add_transaction(expense_on(&category.id, "2024-07-02"))
        .await
        .unwrap();

    let removed = store
        .budgets
        .remove_category("2024-06", &category.id)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let remaining = store.transactions.get_transactions().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].month, "2024-07");
}

#[tokio::test]
async fn transaction_month_follows_the_date() {
    let store = open_store();
    store.budgets.create_budget(new_budget("2024-06")).await.unwrap();
    let category = store
        .budgets
        .add_category("2024-06", variable_category("groceries"))
        .await
        .unwrap();

    let transaction = store
        .transactions
        .add_transaction(expense_on(&category.id, "2024-06-10"))
        .await
        .unwrap();
    assert_eq!(transaction.month, "2024-06");

    let updated = store
        .transactions
        .update_transaction(
            &transaction.id,
            TransactionUpdate {
                date: Some(NaiveDate::parse_from_str("2024-08-01", "%Y-%m-%d").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.month, "2024-08");
    assert_eq!(updated.amount, dec!(250.50));

    assert_eq!(
        store.transactions.get_months_with_transactions().unwrap(),
        vec!["2024-08"]
    );
}

#[tokio::test]
async fn settings_default_then_persist() {
    let store = open_store();
    let defaults = store.settings.get_settings().unwrap();
    assert_eq!(defaults.savings_goal, dec!(100000));

    store
        .settings
        .update_settings(&SettingsUpdate {
            savings_goal: Some(dec!(250000)),
            savings_goal_description: Some("Emergency fund".to_string()),
            current_month: Some("2024-06".to_string()),
        })
        .await
        .unwrap();

    let settings = store.settings.get_settings().unwrap();
    assert_eq!(settings.savings_goal, dec!(250000));
    assert_eq!(settings.savings_goal_description, "Emergency fund");
    assert_eq!(settings.current_month, "2024-06");
}
