//! In-memory mock repositories shared by service tests.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgets::{
    Budget, BudgetCategory, BudgetRepositoryTrait, CategoryUpdate, NewBudget, NewCategory,
};
use crate::errors::{BudgetError, Result};
use crate::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};
use crate::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};

/// One mock implementing all three repository traits over plain vectors.
pub struct MockRepo {
    pub budgets: RwLock<Vec<Budget>>,
    pub transactions: RwLock<Vec<Transaction>>,
    pub settings: RwLock<Settings>,
}

impl MockRepo {
    pub fn new() -> Self {
        MockRepo {
            budgets: RwLock::new(Vec::new()),
            transactions: RwLock::new(Vec::new()),
            settings: RwLock::new(Settings::default()),
        }
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl BudgetRepositoryTrait for MockRepo {
    fn get_budget(&self, month: &str) -> Result<Option<Budget>> {
        Ok(self
            .budgets
            .read()
            .unwrap()
            .iter()
            .find(|b| b.month == month)
            .cloned())
    }

    fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.budgets.read().unwrap().clone())
    }

    fn get_category(&self, month: &str, category_id: &str) -> Result<Option<BudgetCategory>> {
        Ok(self
            .get_budget(month)?
            .and_then(|b| b.category(category_id).cloned()))
    }

    fn find_category(&self, category_id: &str) -> Result<Option<(String, BudgetCategory)>> {
        Ok(self.budgets.read().unwrap().iter().find_map(|b| {
            b.category(category_id)
                .map(|c| (b.month.clone(), c.clone()))
        }))
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        let budget = Budget {
            id: new_budget.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_budget.name,
            month: new_budget.month,
            total_income: new_budget.total_income,
            categories: Vec::new(),
            created_at: now(),
            updated_at: now(),
        };
        let mut budgets = self.budgets.write().unwrap();
        budgets.retain(|b| b.month != budget.month);
        budgets.push(budget.clone());
        Ok(budget)
    }

    async fn update_budget_income(&self, month: &str, total_income: Decimal) -> Result<Budget> {
        let mut budgets = self.budgets.write().unwrap();
        let budget = budgets
            .iter_mut()
            .find(|b| b.month == month)
            .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()))?;
        budget.total_income = total_income;
        budget.updated_at = now();
        Ok(budget.clone())
    }

    async fn delete_budget(&self, month: &str) -> Result<usize> {
        let removed_categories: Vec<String> = self
            .get_budget(month)?
            .map(|b| b.categories.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default();
        let mut budgets = self.budgets.write().unwrap();
        let before = budgets.len();
        budgets.retain(|b| b.month != month);
        self.transactions
            .write()
            .unwrap()
            .retain(|t| !(t.month == month && removed_categories.contains(&t.category_id)));
        Ok(before - budgets.len())
    }

    async fn delete_all_budgets(&self) -> Result<usize> {
        let mut budgets = self.budgets.write().unwrap();
        let count = budgets.len();
        budgets.clear();
        Ok(count)
    }

    async fn add_category(
        &self,
        month: &str,
        new_category: NewCategory,
    ) -> Result<BudgetCategory> {
        let category = BudgetCategory {
            id: new_category.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_category.name,
            planned_amount: new_category.planned_amount,
            category_type: new_category.category_type,
            allocation: new_category.allocation,
            color: new_category.color,
            is_permanent: new_category.is_permanent,
            created_at: now(),
        };
        let mut budgets = self.budgets.write().unwrap();
        let budget = budgets
            .iter_mut()
            .find(|b| b.month == month)
            .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()))?;
        budget.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        month: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<BudgetCategory> {
        let mut budgets = self.budgets.write().unwrap();
        let budget = budgets
            .iter_mut()
            .find(|b| b.month == month)
            .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()))?;
        let category = budget
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| BudgetError::CategoryNotFound(category_id.to_string()))?;
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(planned_amount) = update.planned_amount {
            category.planned_amount = planned_amount;
        }
        if let Some(category_type) = update.category_type {
            category.category_type = category_type;
        }
        if let Some(allocation) = update.allocation {
            category.allocation = allocation;
        }
        if let Some(color) = update.color {
            category.color = Some(color);
        }
        if let Some(is_permanent) = update.is_permanent {
            category.is_permanent = is_permanent;
        }
        Ok(category.clone())
    }

    async fn remove_category(&self, month: &str, category_id: &str) -> Result<usize> {
        let mut budgets = self.budgets.write().unwrap();
        let budget = budgets
            .iter_mut()
            .find(|b| b.month == month)
            .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()))?;
        let before = budget.categories.len();
        budget.categories.retain(|c| c.id != category_id);
        self.transactions
            .write()
            .unwrap()
            .retain(|t| !(t.category_id == category_id && t.month == month));
        Ok(before - budget.categories.len())
    }

    async fn set_planned_amounts(
        &self,
        month: &str,
        amounts: Vec<(String, Decimal)>,
    ) -> Result<()> {
        let mut budgets = self.budgets.write().unwrap();
        let budget = budgets
            .iter_mut()
            .find(|b| b.month == month)
            .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()))?;
        for (category_id, amount) in amounts {
            if let Some(category) = budget.categories.iter_mut().find(|c| c.id == category_id) {
                category.planned_amount = amount;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MockRepo {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned())
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().unwrap().clone())
    }

    fn get_transactions_by_month(&self, month: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.month == month)
            .cloned()
            .collect())
    }

    fn get_transactions_by_category(
        &self,
        category_id: &str,
        month: &str,
    ) -> Result<Vec<Transaction>> {
        let mut matching: Vec<Transaction> = self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.category_id == category_id && t.month == month)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matching)
    }

    fn get_months_with_transactions(&self) -> Result<Vec<String>> {
        let mut months: Vec<String> = self
            .transactions
            .read()
            .unwrap()
            .iter()
            .map(|t| t.month.clone())
            .collect();
        months.sort();
        months.dedup();
        Ok(months)
    }

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction {
            id: new_transaction
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            category_id: new_transaction.category_id,
            amount: new_transaction.amount,
            description: new_transaction.description,
            date: new_transaction.date,
            month: Transaction::derived_month(new_transaction.date),
            transaction_type: new_transaction.transaction_type,
            created_at: now(),
        };
        self.transactions.write().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut transactions = self.transactions.write().unwrap();
        let transaction = transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| BudgetError::TransactionNotFound(transaction_id.to_string()))?;
        if let Some(category_id) = update.category_id {
            transaction.category_id = category_id;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(description) = update.description {
            transaction.description = description;
        }
        if let Some(date) = update.date {
            transaction.date = date;
            transaction.month = Transaction::derived_month(date);
        }
        if let Some(transaction_type) = update.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        Ok(transaction.clone())
    }

    async fn remove_transaction(&self, transaction_id: &str) -> Result<usize> {
        let mut transactions = self.transactions.write().unwrap();
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        Ok(before - transactions.len())
    }

    async fn delete_all_transactions(&self) -> Result<usize> {
        let mut transactions = self.transactions.write().unwrap();
        let count = transactions.len();
        transactions.clear();
        Ok(count)
    }
}

#[async_trait]
impl SettingsRepositoryTrait for MockRepo {
    fn get_settings(&self) -> Result<Settings> {
        Ok(self.settings.read().unwrap().clone())
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        let mut settings = self.settings.write().unwrap();
        if let Some(savings_goal) = update.savings_goal {
            settings.savings_goal = savings_goal;
        }
        if let Some(ref description) = update.savings_goal_description {
            settings.savings_goal_description = description.clone();
        }
        if let Some(ref current_month) = update.current_month {
            settings.current_month = current_month.clone();
        }
        Ok(())
    }
}
