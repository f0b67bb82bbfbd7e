//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Semantic type of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryType {
    Income,
    Expense,
    Savings,
}

/// How a category's planned amount is determined.
///
/// A fixed category is authored directly; a variable category's planned
/// amount is recomputed from its proportion whenever income or the fixed
/// pool changes. The proportion only exists on the variable variant, so a
/// fixed category carrying a weight is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Allocation {
    Fixed,
    Variable { proportion: Decimal },
}

impl Allocation {
    pub fn is_variable(&self) -> bool {
        matches!(self, Allocation::Variable { .. })
    }

    pub fn proportion(&self) -> Option<Decimal> {
        match self {
            Allocation::Fixed => None,
            Allocation::Variable { proportion } => Some(*proportion),
        }
    }
}

/// A category inside one monthly budget.
///
/// Actual amounts are never stored here; they are derived from transactions
/// (or equal to the planned amount for fixed categories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub planned_amount: Decimal,
    pub category_type: CategoryType,
    #[serde(flatten)]
    pub allocation: Allocation,
    pub color: Option<String>,
    /// Recurring obligation, eligible for propagation into future months.
    pub is_permanent: bool,
    pub created_at: NaiveDateTime,
}

impl BudgetCategory {
    pub fn is_variable_expense(&self) -> bool {
        self.category_type == CategoryType::Expense && self.allocation.is_variable()
    }

    pub fn is_fixed_expense(&self) -> bool {
        self.category_type == CategoryType::Expense && !self.allocation.is_variable()
    }
}

/// One calendar month's plan. Exactly one budget exists per month key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    /// `YYYY-MM` month key, unique across the collection.
    pub month: String,
    pub total_income: Decimal,
    pub categories: Vec<BudgetCategory>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Budget {
    pub fn category(&self, category_id: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }
}

/// Input model for creating a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub name: String,
    pub month: String,
    pub total_income: Decimal,
}

/// Input model for adding a category to a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub planned_amount: Decimal,
    pub category_type: CategoryType,
    #[serde(flatten)]
    pub allocation: Allocation,
    pub color: Option<String>,
    #[serde(default)]
    pub is_permanent: bool,
}

impl NewCategory {
    pub fn is_variable_expense(&self) -> bool {
        self.category_type == CategoryType::Expense && self.allocation.is_variable()
    }
}

/// Partial update for a category. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub planned_amount: Option<Decimal>,
    pub category_type: Option<CategoryType>,
    pub allocation: Option<Allocation>,
    pub color: Option<String>,
    pub is_permanent: Option<bool>,
}

/// Plan-vs-actual totals for one month.
///
/// Savings are the derived remainder of income after expenses; no category's
/// planned amount is read as savings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_income: Decimal,
    pub total_fixed_expenses: Decimal,
    pub total_variable_expenses: Decimal,
    pub total_planned_expenses: Decimal,
    pub total_actual_expenses: Decimal,
    pub total_planned_savings: Decimal,
    pub total_actual_savings: Decimal,
    /// Income left after fixed expenses, before the variable split. May be
    /// negative when fixed obligations exceed income.
    pub available_for_variable: Decimal,
}

/// Remainder-based savings per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySavings {
    pub month: String,
    pub planned: Decimal,
    pub actual: Decimal,
}

/// Savings across all budgeted months, with the configured goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSummary {
    pub total_planned_savings: Decimal,
    pub total_actual_savings: Decimal,
    pub savings_by_month: Vec<MonthlySavings>,
    pub goal: Decimal,
    pub goal_description: String,
}
