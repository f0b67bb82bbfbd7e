use async_trait::async_trait;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionSummary, TransactionUpdate,
};

/// Trait for transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>>;
    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    fn get_transactions_by_month(&self, month: &str) -> Result<Vec<Transaction>>;
    /// Transactions for one category within one month, newest date first.
    fn get_transactions_by_category(
        &self,
        category_id: &str,
        month: &str,
    ) -> Result<Vec<Transaction>>;
    /// Distinct month keys that have at least one transaction.
    fn get_months_with_transactions(&self) -> Result<Vec<String>>;

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn remove_transaction(&self, transaction_id: &str) -> Result<usize>;
    async fn delete_all_transactions(&self) -> Result<usize>;
}

/// Trait for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>>;
    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    /// Defaults to the current month when `month` is absent.
    fn get_transactions_by_category(
        &self,
        category_id: &str,
        month: Option<&str>,
    ) -> Result<Vec<Transaction>>;
    fn get_transaction_summaries(&self, month: Option<&str>) -> Result<Vec<TransactionSummary>>;

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<()>;
    async fn remove_transaction(&self, transaction_id: &str) -> Result<()>;
}
