use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use spendwise_core::errors::{BudgetError, Result};
use spendwise_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};

use super::model::{transaction_type_to_str, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

fn into_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
    rows.into_iter().map(Transaction::try_from).collect()
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Transaction::try_from).transpose()
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        into_domain(
            transactions::table
                .order(transactions::date.desc())
                .load::<TransactionDB>(&mut conn)
                .map_err(StorageError::from)?,
        )
    }

    fn get_transactions_by_month(&self, month: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        into_domain(
            transactions::table
                .filter(transactions::month.eq(month))
                .order(transactions::date.desc())
                .load::<TransactionDB>(&mut conn)
                .map_err(StorageError::from)?,
        )
    }

    fn get_transactions_by_category(
        &self,
        category_id: &str,
        month: &str,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        into_domain(
            transactions::table
                .filter(transactions::category_id.eq(category_id))
                .filter(transactions::month.eq(month))
                .order(transactions::date.desc())
                .load::<TransactionDB>(&mut conn)
                .map_err(StorageError::from)?,
        )
    }

    fn get_months_with_transactions(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transactions::table
            .select(transactions::month)
            .distinct()
            .order(transactions::month.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = TransactionDB {
                    id: new_transaction
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    category_id: new_transaction.category_id,
                    amount: new_transaction.amount.to_string(),
                    description: new_transaction.description,
                    date: new_transaction.date,
                    // The month key is always derived from the date.
                    month: Transaction::derived_month(new_transaction.date),
                    transaction_type: transaction_type_to_str(new_transaction.transaction_type)
                        .to_string(),
                    created_at: Utc::now().naive_utc(),
                };
                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(row)
            })
            .await
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let transaction_id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut row = transactions::table
                    .find(&transaction_id_owned)
                    .first::<TransactionDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        BudgetError::TransactionNotFound(transaction_id_owned.clone())
                    })?;

                if let Some(category_id) = update.category_id {
                    row.category_id = category_id;
                }
                if let Some(amount) = update.amount {
                    row.amount = amount.to_string();
                }
                if let Some(description) = update.description {
                    row.description = description;
                }
                if let Some(date) = update.date {
                    row.date = date;
                    row.month = Transaction::derived_month(date);
                }
                if let Some(transaction_type) = update.transaction_type {
                    row.transaction_type = transaction_type_to_str(transaction_type).to_string();
                }

                diesel::update(transactions::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(row)
            })
            .await
    }

    async fn remove_transaction(&self, transaction_id: &str) -> Result<usize> {
        let transaction_id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table.find(transaction_id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_all_transactions(&self) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
