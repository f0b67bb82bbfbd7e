//! Database models for budgets and their categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use spendwise_core::budgets::{Allocation, Budget, BudgetCategory, CategoryType};
use spendwise_core::errors::{Error, ValidationError};

use crate::utils::parse_amount;

/// Database model for one monthly budget.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BudgetDB {
    pub id: String,
    pub name: String,
    pub month: String,
    pub total_income: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetDB {
    pub id: String,
    pub name: String,
    pub month: String,
    pub total_income: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for a budget category. Amounts are decimal strings
/// (12,2), proportions (5,4); NULL proportion is only valid on fixed rows.
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(BudgetDB, foreign_key = budget_id))]
#[diesel(table_name = crate::schema::budget_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDB {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub planned_amount: String,
    pub category_type: String,
    pub allocation_kind: String,
    pub proportion: Option<String>,
    pub color: Option<String>,
    pub is_permanent: bool,
    pub created_at: NaiveDateTime,
}

pub(crate) fn category_type_to_str(category_type: CategoryType) -> &'static str {
    match category_type {
        CategoryType::Income => "income",
        CategoryType::Expense => "expense",
        CategoryType::Savings => "savings",
    }
}

pub(crate) fn category_type_from_str(value: &str) -> Result<CategoryType, Error> {
    match value {
        "income" => Ok(CategoryType::Income),
        "expense" => Ok(CategoryType::Expense),
        "savings" => Ok(CategoryType::Savings),
        other => Err(ValidationError::InvalidInput(format!(
            "unknown category type '{}'",
            other
        ))
        .into()),
    }
}

/// Splits the tagged allocation into its column pair.
pub(crate) fn allocation_to_columns(allocation: Allocation) -> (&'static str, Option<String>) {
    match allocation {
        Allocation::Fixed => ("fixed", None),
        Allocation::Variable { proportion } => ("variable", Some(proportion.to_string())),
    }
}

pub(crate) fn allocation_from_columns(
    kind: &str,
    proportion: Option<&str>,
) -> Result<Allocation, Error> {
    match kind {
        "fixed" => Ok(Allocation::Fixed),
        "variable" => {
            let raw = proportion.ok_or_else(|| {
                ValidationError::MissingField("proportion".to_string())
            })?;
            Ok(Allocation::Variable {
                proportion: raw.parse().map_err(ValidationError::DecimalParse)?,
            })
        }
        other => Err(ValidationError::InvalidInput(format!(
            "unknown allocation kind '{}'",
            other
        ))
        .into()),
    }
}

impl TryFrom<CategoryDB> for BudgetCategory {
    type Error = Error;

    fn try_from(db: CategoryDB) -> Result<Self, Error> {
        Ok(BudgetCategory {
            allocation: allocation_from_columns(&db.allocation_kind, db.proportion.as_deref())?,
            category_type: category_type_from_str(&db.category_type)?,
            id: db.id,
            name: db.name,
            planned_amount: parse_amount(&db.planned_amount),
            color: db.color,
            is_permanent: db.is_permanent,
            created_at: db.created_at,
        })
    }
}

impl BudgetDB {
    pub fn into_domain(self, categories: Vec<CategoryDB>) -> Result<Budget, Error> {
        Ok(Budget {
            total_income: parse_amount(&self.total_income),
            categories: categories
                .into_iter()
                .map(BudgetCategory::try_from)
                .collect::<Result<Vec<_>, Error>>()?,
            id: self.id,
            name: self.name,
            month: self.month,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
