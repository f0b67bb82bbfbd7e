//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::months;

/// Semantic type of a recorded event. Expense amounts are positive
/// magnitudes added to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// A recorded actual income/expense event against a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    /// Always the `YYYY-MM` truncation of `date`; re-derived on every
    /// date-changing update.
    pub month: String,
    pub transaction_type: TransactionType,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// The month key this transaction's date falls in.
    pub fn derived_month(date: NaiveDate) -> String {
        months::month_key_of(date)
    }
}

/// Input model for recording a transaction. The month key is derived from
/// the date, never supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub category_id: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
}

/// Partial update for a transaction. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub category_id: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub transaction_type: Option<TransactionType>,
}

/// Per-category rollup of one month's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub category_id: String,
    pub category_name: String,
    pub total_amount: Decimal,
    pub transaction_count: usize,
    pub last_transaction: Option<NaiveDate>,
}
