use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::budgets::budgets_model::{
    Budget, BudgetCategory, BudgetSummary, CategoryUpdate, NewBudget, NewCategory, SavingsSummary,
};
use crate::errors::Result;

/// Trait for budget repository operations.
///
/// Mutations are `async` and serialized by the storage layer; reads are
/// synchronous. Not-found conditions surface as `BudgetError` values here —
/// the service layer decides where those become silent no-ops.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, month: &str) -> Result<Option<Budget>>;
    fn get_all_budgets(&self) -> Result<Vec<Budget>>;
    fn get_category(&self, month: &str, category_id: &str) -> Result<Option<BudgetCategory>>;
    /// Looks a category up across all budgets, returning its owning month.
    fn find_category(&self, category_id: &str) -> Result<Option<(String, BudgetCategory)>>;

    /// Creates a budget; an existing budget for the same month is replaced.
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget_income(&self, month: &str, total_income: Decimal) -> Result<Budget>;
    /// Deletes a budget, its categories, and that month's transactions
    /// against those categories. Returns the number of budgets removed.
    async fn delete_budget(&self, month: &str) -> Result<usize>;
    async fn delete_all_budgets(&self) -> Result<usize>;

    async fn add_category(&self, month: &str, new_category: NewCategory)
        -> Result<BudgetCategory>;
    async fn update_category(
        &self,
        month: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<BudgetCategory>;
    /// Removes a category and the transactions that reference it within the
    /// owning budget's month only. Returns the number of categories removed.
    async fn remove_category(&self, month: &str, category_id: &str) -> Result<usize>;
    /// Write-back of recomputed planned amounts after a redistribution.
    async fn set_planned_amounts(&self, month: &str, amounts: Vec<(String, Decimal)>)
        -> Result<()>;
}

/// Trait for budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget(&self, month: &str) -> Result<Option<Budget>>;
    fn get_all_budgets(&self) -> Result<Vec<Budget>>;
    fn get_current_budget(&self) -> Result<Option<Budget>>;
    /// Sorted month keys that have either a budget or at least one transaction.
    fn get_available_months(&self) -> Result<Vec<String>>;
    /// Plan-vs-actual totals; all-zero when the month has no budget.
    fn get_budget_summary(&self, month: Option<&str>) -> Result<BudgetSummary>;
    fn get_savings_summary(&self) -> Result<SavingsSummary>;
    fn get_category_actual_amount(&self, category_id: &str, month: Option<&str>)
        -> Result<Decimal>;

    async fn create_budget(
        &self,
        name: String,
        month: String,
        total_income: Decimal,
    ) -> Result<Budget>;
    async fn update_budget_income(&self, month: &str, total_income: Decimal) -> Result<()>;
    async fn delete_budget(&self, month: &str) -> Result<usize>;

    /// Returns `None` (without effect) when the month has no budget.
    async fn add_category(
        &self,
        month: &str,
        new_category: NewCategory,
    ) -> Result<Option<BudgetCategory>>;
    async fn update_category(
        &self,
        month: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<()>;
    async fn remove_category(&self, month: &str, category_id: &str) -> Result<()>;

    async fn redistribute_income(&self, month: &str) -> Result<()>;
    /// Clones a permanent category into every later budgeted month that does
    /// not already have a category with the same name. Returns the number of
    /// months the category was copied into.
    async fn copy_permanent_category_to_future_months(
        &self,
        category_id: &str,
        from_month: &str,
    ) -> Result<usize>;

    /// Seeds budgets for the previous and current month on first run.
    async fn initialize_seed_budgets(&self) -> Result<()>;
    async fn clear_all_data(&self) -> Result<()>;
}
