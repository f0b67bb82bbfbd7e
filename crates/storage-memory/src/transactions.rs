//! Transaction repository over the snapshot store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use spendwise_core::errors::{BudgetError, Result};
use spendwise_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};

use crate::store::SnapshotStore;

pub struct TransactionRepository {
    store: Arc<SnapshotStore>,
}

impl TransactionRepository {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        TransactionRepository { store }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self.store.read(|state| {
            state
                .transactions
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned()
        }))
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.store.read(|state| state.transactions.clone()))
    }

    fn get_transactions_by_month(&self, month: &str) -> Result<Vec<Transaction>> {
        Ok(self.store.read(|state| {
            state
                .transactions
                .iter()
                .filter(|t| t.month == month)
                .cloned()
                .collect()
        }))
    }

    fn get_transactions_by_category(
        &self,
        category_id: &str,
        month: &str,
    ) -> Result<Vec<Transaction>> {
        let mut matching: Vec<Transaction> = self.store.read(|state| {
            state
                .transactions
                .iter()
                .filter(|t| t.category_id == category_id && t.month == month)
                .cloned()
                .collect()
        });
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matching)
    }

    fn get_months_with_transactions(&self) -> Result<Vec<String>> {
        let mut months: Vec<String> = self
            .store
            .read(|state| state.transactions.iter().map(|t| t.month.clone()).collect());
        months.sort();
        months.dedup();
        Ok(months)
    }

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.store.mutate(|state| {
            let transaction = Transaction {
                id: new_transaction
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                category_id: new_transaction.category_id.clone(),
                amount: new_transaction.amount,
                description: new_transaction.description.clone(),
                date: new_transaction.date,
                month: Transaction::derived_month(new_transaction.date),
                transaction_type: new_transaction.transaction_type,
                created_at: Utc::now().naive_utc(),
            };
            state.transactions.push(transaction.clone());
            Ok(transaction)
        })
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        self.store.mutate(|state| {
            let transaction = state
                .transactions
                .iter_mut()
                .find(|t| t.id == transaction_id)
                .ok_or_else(|| BudgetError::TransactionNotFound(transaction_id.to_string()))?;
            if let Some(ref category_id) = update.category_id {
                transaction.category_id = category_id.clone();
            }
            if let Some(amount) = update.amount {
                transaction.amount = amount;
            }
            if let Some(ref description) = update.description {
                transaction.description = description.clone();
            }
            if let Some(date) = update.date {
                transaction.date = date;
                transaction.month = Transaction::derived_month(date);
            }
            if let Some(transaction_type) = update.transaction_type {
                transaction.transaction_type = transaction_type;
            }
            Ok(transaction.clone())
        })
    }

    async fn remove_transaction(&self, transaction_id: &str) -> Result<usize> {
        self.store.mutate(|state| {
            let before = state.transactions.len();
            state.transactions.retain(|t| t.id != transaction_id);
            Ok(before - state.transactions.len())
        })
    }

    async fn delete_all_transactions(&self) -> Result<usize> {
        self.store.mutate(|state| {
            let count = state.transactions.len();
            state.transactions.clear();
            Ok(count)
        })
    }
}
