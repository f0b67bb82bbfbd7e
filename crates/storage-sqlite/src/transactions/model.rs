//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use spendwise_core::errors::{Error, ValidationError};
use spendwise_core::transactions::{Transaction, TransactionType};

use crate::utils::parse_amount;

/// Database model for a recorded transaction.
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub category_id: String,
    pub amount: String,
    pub description: String,
    pub date: NaiveDate,
    pub month: String,
    pub transaction_type: String,
    pub created_at: NaiveDateTime,
}

pub(crate) fn transaction_type_to_str(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "income",
        TransactionType::Expense => "expense",
    }
}

pub(crate) fn transaction_type_from_str(value: &str) -> Result<TransactionType, Error> {
    match value {
        "income" => Ok(TransactionType::Income),
        "expense" => Ok(TransactionType::Expense),
        other => Err(ValidationError::InvalidInput(format!(
            "unknown transaction type '{}'",
            other
        ))
        .into()),
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Error> {
        Ok(Transaction {
            transaction_type: transaction_type_from_str(&db.transaction_type)?,
            amount: parse_amount(&db.amount),
            id: db.id,
            category_id: db.category_id,
            description: db.description,
            date: db.date,
            month: db.month,
            created_at: db.created_at,
        })
    }
}
