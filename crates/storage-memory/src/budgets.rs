//! Budget repository over the snapshot store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use spendwise_core::budgets::{
    Budget, BudgetCategory, BudgetRepositoryTrait, CategoryUpdate, NewBudget, NewCategory,
};
use spendwise_core::errors::{BudgetError, Result};

use crate::store::{SnapshotStore, StoreState};

pub struct BudgetRepository {
    store: Arc<SnapshotStore>,
}

impl BudgetRepository {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        BudgetRepository { store }
    }
}

fn budget_mut<'a>(state: &'a mut StoreState, month: &str) -> Result<&'a mut Budget> {
    state
        .budgets
        .get_mut(month)
        .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()).into())
}

/// Drops the budget for `month` along with that month's transactions
/// against its categories.
fn drop_budget(state: &mut StoreState, month: &str) -> usize {
    match state.budgets.remove(month) {
        None => 0,
        Some(budget) => {
            let category_ids: Vec<String> =
                budget.categories.iter().map(|c| c.id.clone()).collect();
            state
                .transactions
                .retain(|t| !(t.month == month && category_ids.contains(&t.category_id)));
            1
        }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, month: &str) -> Result<Option<Budget>> {
        Ok(self.store.read(|state| state.budgets.get(month).cloned()))
    }

    fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self
            .store
            .read(|state| state.budgets.values().cloned().collect()))
    }

    fn get_category(&self, month: &str, category_id: &str) -> Result<Option<BudgetCategory>> {
        Ok(self.store.read(|state| {
            state
                .budgets
                .get(month)
                .and_then(|b| b.category(category_id).cloned())
        }))
    }

    fn find_category(&self, category_id: &str) -> Result<Option<(String, BudgetCategory)>> {
        Ok(self.store.read(|state| {
            state.budgets.values().find_map(|b| {
                b.category(category_id)
                    .map(|c| (b.month.clone(), c.clone()))
            })
        }))
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.store.mutate(|state| {
            drop_budget(state, &new_budget.month);
            let now = Utc::now().naive_utc();
            let budget = Budget {
                id: new_budget
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                name: new_budget.name.clone(),
                month: new_budget.month.clone(),
                total_income: new_budget.total_income,
                categories: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            state.budgets.insert(budget.month.clone(), budget.clone());
            Ok(budget)
        })
    }

    async fn update_budget_income(&self, month: &str, total_income: Decimal) -> Result<Budget> {
        self.store.mutate(|state| {
            let budget = budget_mut(state, month)?;
            budget.total_income = total_income;
            budget.updated_at = Utc::now().naive_utc();
            Ok(budget.clone())
        })
    }

    async fn delete_budget(&self, month: &str) -> Result<usize> {
        self.store.mutate(|state| Ok(drop_budget(state, month)))
    }

    async fn delete_all_budgets(&self) -> Result<usize> {
        self.store.mutate(|state| {
            let count = state.budgets.len();
            state.budgets.clear();
            Ok(count)
        })
    }

    async fn add_category(
        &self,
        month: &str,
        new_category: NewCategory,
    ) -> Result<BudgetCategory> {
        self.store.mutate(|state| {
            let budget = budget_mut(state, month)?;
            let category = BudgetCategory {
                id: new_category
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                name: new_category.name.clone(),
                planned_amount: new_category.planned_amount,
                category_type: new_category.category_type,
                allocation: new_category.allocation,
                color: new_category.color.clone(),
                is_permanent: new_category.is_permanent,
                created_at: Utc::now().naive_utc(),
            };
            budget.categories.push(category.clone());
            budget.updated_at = Utc::now().naive_utc();
            Ok(category)
        })
    }

    async fn update_category(
        &self,
        month: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<BudgetCategory> {
        self.store.mutate(|state| {
            let budget = budget_mut(state, month)?;
            let category = budget
                .categories
                .iter_mut()
                .find(|c| c.id == category_id)
                .ok_or_else(|| BudgetError::CategoryNotFound(category_id.to_string()))?;
            if let Some(ref name) = update.name {
                category.name = name.clone();
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
            if let Some(ref color) = update.color {
                category.color = Some(color.clone());
            }
            if let Some(is_permanent) = update.is_permanent {
                category.is_permanent = is_permanent;
            }
            let category = category.clone();
            budget.updated_at = Utc::now().naive_utc();
            Ok(category)
        })
    }

    async fn remove_category(&self, month: &str, category_id: &str) -> Result<usize> {
        self.store.mutate(|state| {
            let budget = budget_mut(state, month)?;
            let before = budget.categories.len();
            budget.categories.retain(|c| c.id != category_id);
            let removed = before - budget.categories.len();
            budget.updated_at = Utc::now().naive_utc();
            state
                .transactions
                .retain(|t| !(t.category_id == category_id && t.month == month));
            Ok(removed)
        })
    }

    async fn set_planned_amounts(
        &self,
        month: &str,
        amounts: Vec<(String, Decimal)>,
    ) -> Result<()> {
        self.store.mutate(|state| {
            let budget = budget_mut(state, month)?;
            for (category_id, amount) in amounts {
                if let Some(category) =
                    budget.categories.iter_mut().find(|c| c.id == category_id)
                {
                    category.planned_amount = amount;
                }
            }
            budget.updated_at = Utc::now().naive_utc();
            Ok(())
        })
    }
}
