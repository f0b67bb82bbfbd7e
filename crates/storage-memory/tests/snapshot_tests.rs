//! Snapshot persistence tests: state must survive a store reopen.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use spendwise_core::budgets::{
    Allocation, BudgetRepositoryTrait, CategoryType, NewBudget, NewCategory,
};
use spendwise_core::settings::{SettingsRepositoryTrait, SettingsUpdate};
use spendwise_core::transactions::{
    NewTransaction, TransactionRepositoryTrait, TransactionType,
};
use spendwise_storage_memory::{
    BudgetRepository, SettingsRepository, SnapshotStore, TransactionRepository,
};

fn new_budget(month: &str) -> NewBudget {
    NewBudget {
        id: None,
        name: format!("Budget {}", month),
        month: month.to_string(),
        total_income: dec!(150000),
    }
}

fn savings_category() -> NewCategory {
    NewCategory {
        id: None,
        name: "Savings".to_string(),
        planned_amount: dec!(0),
        category_type: CategoryType::Savings,
        allocation: Allocation::Fixed,
        color: Some("#10B981".to_string()),
        is_permanent: true,
    }
}

#[tokio::test]
async fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let category_id = {
        let store = SnapshotStore::open(dir.path()).unwrap();
        let budgets = BudgetRepository::new(store.clone());
        let transactions = TransactionRepository::new(store.clone());
        let settings = SettingsRepository::new(store);

        budgets.create_budget(new_budget("2024-06")).await.unwrap();
        let category = budgets
            .add_category("2024-06", savings_category())
            .await
            .unwrap();
        transactions
            .add_transaction(NewTransaction {
                id: None,
                category_id: category.id.clone(),
                amount: dec!(500),
                description: "transfer".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
                transaction_type: TransactionType::Expense,
            })
            .await
            .unwrap();
        settings
            .update_settings(&SettingsUpdate {
                current_month: Some("2024-06".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        category.id
    };

    // Fresh handles over the same directory pick the snapshot back up.
    let store = SnapshotStore::open(dir.path()).unwrap();
    let budgets = BudgetRepository::new(store.clone());
    let transactions = TransactionRepository::new(store.clone());
    let settings = SettingsRepository::new(store);

    let budget = budgets.get_budget("2024-06").unwrap().unwrap();
    assert_eq!(budget.total_income, dec!(150000));
    assert_eq!(budget.categories.len(), 1);
    assert_eq!(budget.categories[0].allocation, Allocation::Fixed);

    let listed = transactions
        .get_transactions_by_category(&category_id, "2024-06")
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].month, "2024-06");

    assert_eq!(settings.get_settings().unwrap().current_month, "2024-06");
}

#[tokio::test]
async fn replacing_a_budget_drops_its_months_transactions() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::open(dir.path()).unwrap();
    let budgets = BudgetRepository::new(store.clone());
    let transactions = TransactionRepository::new(store);

    budgets.create_budget(new_budget("2024-06")).await.unwrap();
    let category = budgets
        .add_category("2024-06", savings_category())
        .await
        .unwrap();
    for (day, month) in [(15, 6), (2, 7)] {
        transactions
            .add_transaction(NewTransaction {
                id: None,
                category_id: category.id.clone(),
                amount: dec!(10),
                description: "t".to_string(),
                date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
                transaction_type: TransactionType::Expense,
            })
            .await
            .unwrap();
    }

    budgets.create_budget(new_budget("2024-06")).await.unwrap();

    // The June transaction died with the replaced budget; July's survived.
    let remaining = transactions.get_transactions().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].month, "2024-07");
}

#[tokio::test]
async fn months_with_transactions_are_sorted_and_deduped() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::open(dir.path()).unwrap();
    let budgets = BudgetRepository::new(store.clone());
    let transactions = TransactionRepository::new(store);

    budgets.create_budget(new_budget("2024-07")).await.unwrap();
    let category = budgets
        .add_category("2024-07", savings_category())
        .await
        .unwrap();

    for (y, m, d) in [(2024, 7, 3), (2024, 5, 1), (2024, 7, 20)] {
        transactions
            .add_transaction(NewTransaction {
                id: None,
                category_id: category.id.clone(),
                amount: dec!(1),
                description: "t".to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                transaction_type: TransactionType::Expense,
            })
            .await
            .unwrap();
    }

    assert_eq!(
        transactions.get_months_with_transactions().unwrap(),
        vec!["2024-05", "2024-07"]
    );
}
