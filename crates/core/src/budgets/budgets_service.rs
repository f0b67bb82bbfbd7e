use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::allocation;
use super::budgets_model::{
    Allocation, Budget, BudgetCategory, BudgetSummary, CategoryType, CategoryUpdate,
    MonthlySavings, NewBudget, NewCategory, SavingsSummary,
};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::constants::{
    STARTER_FIXED_CATEGORY, STARTER_FIXED_COLOR, STARTER_SAVINGS_CATEGORY, STARTER_SAVINGS_COLOR,
    STARTER_VARIABLE_CATEGORY, STARTER_VARIABLE_COLOR,
};
use crate::errors::{Result, ValidationError};
use crate::months;
use crate::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};
use crate::transactions::TransactionRepositoryTrait;

pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
    ) -> Self {
        BudgetService {
            budget_repository,
            transaction_repository,
            settings_repository,
        }
    }

    fn target_month(&self, month: Option<&str>) -> Result<String> {
        match month {
            Some(m) => {
                months::validate_month_key(m)?;
                Ok(m.to_string())
            }
            None => Ok(self.settings_repository.get_settings()?.current_month),
        }
    }

    fn summary_for_budget(&self, budget: &Budget) -> Result<BudgetSummary> {
        let total_fixed = allocation::total_fixed_planned(&budget.categories);
        let total_variable = allocation::total_variable_planned(&budget.categories);
        let total_planned = total_fixed + total_variable;

        // Fixed spend is not independently tracked: its actual equals its
        // plan. Only variable spend is measured from transactions.
        let variable_ids: HashSet<&str> = budget
            .categories
            .iter()
            .filter(|c| c.is_variable_expense())
            .map(|c| c.id.as_str())
            .collect();
        let actual_variable: Decimal = self
            .transaction_repository
            .get_transactions_by_month(&budget.month)?
            .iter()
            .filter(|t| variable_ids.contains(t.category_id.as_str()))
            .map(|t| t.amount)
            .sum();
        let total_actual = total_fixed + actual_variable;

        Ok(BudgetSummary {
            total_income: budget.total_income,
            total_fixed_expenses: total_fixed,
            total_variable_expenses: total_variable,
            total_planned_expenses: total_planned,
            total_actual_expenses: total_actual,
            total_planned_savings: (budget.total_income - total_planned).max(Decimal::ZERO),
            total_actual_savings: (budget.total_income - total_actual).max(Decimal::ZERO),
            available_for_variable: budget.total_income - total_fixed,
        })
    }

    fn starter_categories() -> [NewCategory; 3] {
        [
            NewCategory {
                id: None,
                name: STARTER_FIXED_CATEGORY.to_string(),
                planned_amount: Decimal::ZERO,
                category_type: CategoryType::Expense,
                allocation: Allocation::Fixed,
                color: Some(STARTER_FIXED_COLOR.to_string()),
                is_permanent: false,
            },
            NewCategory {
                id: None,
                name: STARTER_VARIABLE_CATEGORY.to_string(),
                planned_amount: Decimal::ZERO,
                category_type: CategoryType::Expense,
                allocation: Allocation::Variable {
                    proportion: Decimal::ONE,
                },
                color: Some(STARTER_VARIABLE_COLOR.to_string()),
                is_permanent: false,
            },
            NewCategory {
                id: None,
                name: STARTER_SAVINGS_CATEGORY.to_string(),
                planned_amount: Decimal::ZERO,
                category_type: CategoryType::Savings,
                allocation: Allocation::Fixed,
                color: Some(STARTER_SAVINGS_COLOR.to_string()),
                is_permanent: false,
            },
        ]
    }

    fn validate_category_amounts(
        planned_amount: Option<Decimal>,
        allocation_field: Option<&Allocation>,
    ) -> Result<()> {
        if let Some(planned) = planned_amount {
            ensure_non_negative(planned, "plannedAmount")?;
        }
        if let Some(Allocation::Variable { proportion }) = allocation_field {
            ensure_non_negative(*proportion, "proportion")?;
        }
        Ok(())
    }
}

fn ensure_non_negative(amount: Decimal, field: &str) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(format!("{} = {}", field, amount)).into());
    }
    Ok(())
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget(&self, month: &str) -> Result<Option<Budget>> {
        self.budget_repository.get_budget(month)
    }

    fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        self.budget_repository.get_all_budgets()
    }

    fn get_current_budget(&self) -> Result<Option<Budget>> {
        let current_month = self.settings_repository.get_settings()?.current_month;
        self.budget_repository.get_budget(&current_month)
    }

    fn get_available_months(&self) -> Result<Vec<String>> {
        let mut months: BTreeSet<String> = self
            .budget_repository
            .get_all_budgets()?
            .into_iter()
            .map(|b| b.month)
            .collect();
        months.extend(self.transaction_repository.get_months_with_transactions()?);
        Ok(months.into_iter().collect())
    }

    fn get_budget_summary(&self, month: Option<&str>) -> Result<BudgetSummary> {
        let target = self.target_month(month)?;
        match self.budget_repository.get_budget(&target)? {
            Some(budget) => self.summary_for_budget(&budget),
            None => Ok(BudgetSummary::default()),
        }
    }

    fn get_savings_summary(&self) -> Result<SavingsSummary> {
        let mut budgets = self.budget_repository.get_all_budgets()?;
        budgets.sort_by(|a, b| a.month.cmp(&b.month));

        let mut total_planned = Decimal::ZERO;
        let mut total_actual = Decimal::ZERO;
        let mut savings_by_month = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            let summary = self.summary_for_budget(budget)?;
            total_planned += summary.total_planned_savings;
            total_actual += summary.total_actual_savings;
            savings_by_month.push(MonthlySavings {
                month: budget.month.clone(),
                planned: summary.total_planned_savings,
                actual: summary.total_actual_savings,
            });
        }

        let settings = self.settings_repository.get_settings()?;
        Ok(SavingsSummary {
            total_planned_savings: total_planned,
            total_actual_savings: total_actual,
            savings_by_month,
            goal: settings.savings_goal,
            goal_description: settings.savings_goal_description,
        })
    }

    fn get_category_actual_amount(
        &self,
        category_id: &str,
        month: Option<&str>,
    ) -> Result<Decimal> {
        let target = self.target_month(month)?;
        let budget = match self.budget_repository.get_budget(&target)? {
            Some(budget) => budget,
            None => return Ok(Decimal::ZERO),
        };
        let category = match budget.category(category_id) {
            Some(category) => category,
            None => return Ok(Decimal::ZERO),
        };

        // Savings and variable categories are measured from transactions;
        // fixed spend is assumed to occur exactly as planned.
        if category.category_type != CategoryType::Savings {
            if let Allocation::Fixed = category.allocation {
                return Ok(category.planned_amount);
            }
        }
        Ok(self
            .transaction_repository
            .get_transactions_by_category(category_id, &target)?
            .iter()
            .map(|t| t.amount)
            .sum())
    }

    async fn create_budget(
        &self,
        name: String,
        month: String,
        total_income: Decimal,
    ) -> Result<Budget> {
        months::validate_month_key(&month)?;
        ensure_non_negative(total_income, "totalIncome")?;

        let budget = self
            .budget_repository
            .create_budget(NewBudget {
                id: None,
                name,
                month: month.clone(),
                total_income,
            })
            .await?;

        for starter in Self::starter_categories() {
            self.budget_repository
                .add_category(&month, starter)
                .await?;
        }

        self.settings_repository
            .update_settings(&SettingsUpdate {
                current_month: Some(month.clone()),
                ..Default::default()
            })
            .await?;

        if total_income > Decimal::ZERO {
            self.redistribute_income(&month).await?;
        }

        debug!("Created budget for {}", month);
        Ok(self
            .budget_repository
            .get_budget(&month)?
            .unwrap_or(budget))
    }

    async fn update_budget_income(&self, month: &str, total_income: Decimal) -> Result<()> {
        ensure_non_negative(total_income, "totalIncome")?;
        if self.budget_repository.get_budget(month)?.is_none() {
            return Ok(());
        }
        self.budget_repository
            .update_budget_income(month, total_income)
            .await?;
        self.redistribute_income(month).await
    }

    async fn delete_budget(&self, month: &str) -> Result<usize> {
        self.budget_repository.delete_budget(month).await
    }

    async fn add_category(
        &self,
        month: &str,
        new_category: NewCategory,
    ) -> Result<Option<BudgetCategory>> {
        Self::validate_category_amounts(
            Some(new_category.planned_amount),
            Some(&new_category.allocation),
        )?;
        if self.budget_repository.get_budget(month)?.is_none() {
            return Ok(None);
        }

        let is_variable = new_category.is_variable_expense();
        let category = self
            .budget_repository
            .add_category(month, new_category)
            .await?;

        // A new variable category changes the proportion pool.
        if is_variable {
            self.redistribute_income(month).await?;
            return Ok(self.budget_repository.get_category(month, &category.id)?);
        }
        Ok(Some(category))
    }

    async fn update_category(
        &self,
        month: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<()> {
        Self::validate_category_amounts(update.planned_amount, update.allocation.as_ref())?;
        let existing = match self.budget_repository.get_category(month, category_id)? {
            Some(category) => category,
            None => return Ok(()),
        };

        // Fixed amounts consume budget before the variable split, so a fixed
        // plan change — like any reshaping of the pools — forces a recompute.
        let fixed_amount_changed = !existing.allocation.is_variable()
            && update
                .planned_amount
                .is_some_and(|p| p != existing.planned_amount);
        let allocation_changed = update
            .allocation
            .is_some_and(|a| a != existing.allocation);
        let type_changed = update
            .category_type
            .is_some_and(|t| t != existing.category_type);

        self.budget_repository
            .update_category(month, category_id, update)
            .await?;

        if fixed_amount_changed || allocation_changed || type_changed {
            self.redistribute_income(month).await?;
        }
        Ok(())
    }

    async fn remove_category(&self, month: &str, category_id: &str) -> Result<()> {
        let existing = match self.budget_repository.get_category(month, category_id)? {
            Some(category) => category,
            None => return Ok(()),
        };
        let was_variable = existing.is_variable_expense();
        self.budget_repository
            .remove_category(month, category_id)
            .await?;
        if was_variable {
            self.redistribute_income(month).await?;
        }
        Ok(())
    }

    async fn redistribute_income(&self, month: &str) -> Result<()> {
        let budget = match self.budget_repository.get_budget(month)? {
            Some(budget) => budget,
            None => return Ok(()),
        };
        let amounts = allocation::redistribute(budget.total_income, &budget.categories);
        if amounts.is_empty() {
            return Ok(());
        }
        debug!(
            "Redistributing income for {}: {} variable categories",
            month,
            amounts.len()
        );
        self.budget_repository
            .set_planned_amounts(month, amounts)
            .await
    }

    async fn copy_permanent_category_to_future_months(
        &self,
        category_id: &str,
        from_month: &str,
    ) -> Result<usize> {
        months::validate_month_key(from_month)?;
        let source = match self.budget_repository.get_category(from_month, category_id)? {
            Some(category) => category,
            None => return Ok(0),
        };

        let mut budgets = self.budget_repository.get_all_budgets()?;
        budgets.sort_by(|a, b| a.month.cmp(&b.month));

        let mut copied = 0;
        for budget in budgets {
            if budget.month.as_str() <= from_month {
                continue;
            }
            if budget.categories.iter().any(|c| c.name == source.name) {
                continue;
            }
            self.budget_repository
                .add_category(
                    &budget.month,
                    NewCategory {
                        id: None,
                        name: source.name.clone(),
                        planned_amount: source.planned_amount,
                        category_type: source.category_type,
                        allocation: source.allocation,
                        color: source.color.clone(),
                        is_permanent: source.is_permanent,
                    },
                )
                .await?;
            if source.is_variable_expense() {
                self.redistribute_income(&budget.month).await?;
            }
            copied += 1;
        }
        debug!(
            "Propagated category '{}' from {} into {} future months",
            source.name, from_month, copied
        );
        Ok(copied)
    }

    async fn initialize_seed_budgets(&self) -> Result<()> {
        if !self.budget_repository.get_all_budgets()?.is_empty() {
            return Ok(());
        }
        let current = months::current_month();
        let previous = months::previous_month(&current)?;
        self.create_budget(format!("Budget {}", previous), previous, Decimal::ZERO)
            .await?;
        self.create_budget(format!("Budget {}", current), current, Decimal::ZERO)
            .await?;
        Ok(())
    }

    async fn clear_all_data(&self) -> Result<()> {
        self.budget_repository.delete_all_budgets().await?;
        self.transaction_repository.delete_all_transactions().await?;
        let defaults = Settings::default();
        self.settings_repository
            .update_settings(&SettingsUpdate {
                savings_goal: Some(defaults.savings_goal),
                savings_goal_description: Some(defaults.savings_goal_description),
                current_month: Some(defaults.current_month),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STARTER_VARIABLE_CATEGORY;
    use crate::test_support::MockRepo;
    use crate::transactions::{NewTransaction, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn service_with_repo() -> (BudgetService, Arc<MockRepo>) {
        let repo = Arc::new(MockRepo::new());
        let service = BudgetService::new(repo.clone(), repo.clone(), repo.clone());
        (service, repo)
    }

    fn new_category(
        name: &str,
        planned: Decimal,
        category_type: CategoryType,
        allocation: Allocation,
    ) -> NewCategory {
        NewCategory {
            id: None,
            name: name.to_string(),
            planned_amount: planned,
            category_type,
            allocation,
            color: None,
            is_permanent: false,
        }
    }

    async fn add_transaction(repo: &MockRepo, category_id: &str, amount: Decimal, date: &str) {
        repo.add_transaction(NewTransaction {
            id: None,
            category_id: category_id.to_string(),
            amount,
            description: "test".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            transaction_type: TransactionType::Expense,
        })
        .await
        .unwrap();
    }

    /// Builds the reference budget: income 150000, one fixed category at
    /// 45000, two variable categories splitting the rest evenly.
    async fn reference_budget(service: &BudgetService) -> Budget {
        let budget = service
            .create_budget("Budget".to_string(), "2024-06".to_string(), dec!(150000))
            .await
            .unwrap();

        let starter_variable = budget
            .categories
            .iter()
            .find(|c| c.name == STARTER_VARIABLE_CATEGORY)
            .unwrap()
            .id
            .clone();
        service
            .remove_category("2024-06", &starter_variable)
            .await
            .unwrap();

        let starter_fixed = budget
            .categories
            .iter()
            .find(|c| c.is_fixed_expense())
            .unwrap()
            .id
            .clone();
        service
            .update_category(
                "2024-06",
                &starter_fixed,
                CategoryUpdate {
                    planned_amount: Some(dec!(45000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        for name in ["groceries", "transport"] {
            service
                .add_category(
                    "2024-06",
                    new_category(
                        name,
                        Decimal::ZERO,
                        CategoryType::Expense,
                        Allocation::Variable {
                            proportion: dec!(0.5),
                        },
                    ),
                )
                .await
                .unwrap();
        }

        service.get_budget("2024-06").unwrap().unwrap()
    }

    #[tokio::test]
    async fn create_budget_seeds_starter_set_and_points_current_month() {
        let (service, repo) = service_with_repo();
        let budget = service
            .create_budget("Budget".to_string(), "2024-06".to_string(), dec!(1000))
            .await
            .unwrap();

        assert_eq!(budget.categories.len(), 3);
        assert_eq!(repo.get_settings().unwrap().current_month, "2024-06");

        // Starter variable category swallows everything left after fixed.
        let variable = budget
            .categories
            .iter()
            .find(|c| c.is_variable_expense())
            .unwrap();
        assert_eq!(variable.planned_amount, dec!(1000.00));
    }

    #[tokio::test]
    async fn create_budget_replaces_existing_month() {
        let (service, _repo) = service_with_repo();
        let first = service
            .create_budget("First".to_string(), "2024-06".to_string(), dec!(1000))
            .await
            .unwrap();
        let second = service
            .create_budget("Second".to_string(), "2024-06".to_string(), dec!(2000))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let budgets = service.get_all_budgets().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].name, "Second");
    }

    #[tokio::test]
    async fn create_budget_rejects_bad_input() {
        let (service, _repo) = service_with_repo();
        assert!(service
            .create_budget("B".to_string(), "junk".to_string(), dec!(1))
            .await
            .is_err());
        assert!(service
            .create_budget("B".to_string(), "2024-06".to_string(), dec!(-1))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn redistribution_splits_available_income_evenly() {
        let (service, _repo) = service_with_repo();
        let budget = reference_budget(&service).await;

        for name in ["groceries", "transport"] {
            let category = budget.categories.iter().find(|c| c.name == name).unwrap();
            assert_eq!(category.planned_amount, dec!(52500.00), "{}", name);
        }
    }

    #[tokio::test]
    async fn redistribution_is_idempotent() {
        let (service, _repo) = service_with_repo();
        reference_budget(&service).await;

        let before = service.get_budget("2024-06").unwrap().unwrap();
        service.redistribute_income("2024-06").await.unwrap();
        let after = service.get_budget("2024-06").unwrap().unwrap();

        for (a, b) in before.categories.iter().zip(after.categories.iter()) {
            assert_eq!(a.planned_amount, b.planned_amount);
        }
    }

    #[tokio::test]
    async fn income_update_triggers_redistribution() {
        let (service, _repo) = service_with_repo();
        reference_budget(&service).await;

        service
            .update_budget_income("2024-06", dec!(105000))
            .await
            .unwrap();
        let budget = service.get_budget("2024-06").unwrap().unwrap();
        let groceries = budget
            .categories
            .iter()
            .find(|c| c.name == "groceries")
            .unwrap();
        assert_eq!(groceries.planned_amount, dec!(30000.00));

        // Unknown month is a silent no-op.
        service
            .update_budget_income("2030-01", dec!(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn summary_tracks_actuals_and_remainder_savings() {
        let (service, repo) = service_with_repo();
        let budget = reference_budget(&service).await;
        let groceries = budget
            .categories
            .iter()
            .find(|c| c.name == "groceries")
            .unwrap();

        add_transaction(&repo, &groceries.id, dec!(20000), "2024-06-10").await;

        assert_eq!(
            service
                .get_category_actual_amount(&groceries.id, Some("2024-06"))
                .unwrap(),
            dec!(20000)
        );

        let summary = service.get_budget_summary(Some("2024-06")).unwrap();
        assert_eq!(summary.total_income, dec!(150000));
        assert_eq!(summary.total_fixed_expenses, dec!(45000));
        assert_eq!(summary.total_variable_expenses, dec!(105000.00));
        assert_eq!(summary.total_planned_expenses, dec!(150000.00));
        assert_eq!(summary.total_actual_expenses, dec!(65000));
        assert_eq!(summary.total_actual_savings, dec!(85000));
        assert_eq!(summary.available_for_variable, dec!(105000));
    }

    #[tokio::test]
    async fn summary_for_unknown_month_is_all_zero() {
        let (service, _repo) = service_with_repo();
        let summary = service.get_budget_summary(Some("2030-01")).unwrap();
        assert_eq!(summary, BudgetSummary::default());
    }

    #[tokio::test]
    async fn fixed_category_actual_equals_planned() {
        let (service, repo) = service_with_repo();
        let budget = reference_budget(&service).await;
        let fixed = budget
            .categories
            .iter()
            .find(|c| c.is_fixed_expense())
            .unwrap();

        // Even with transactions recorded against it, fixed spend reports
        // the planned amount.
        add_transaction(&repo, &fixed.id, dec!(123), "2024-06-02").await;
        assert_eq!(
            service
                .get_category_actual_amount(&fixed.id, Some("2024-06"))
                .unwrap(),
            dec!(45000)
        );
    }

    #[tokio::test]
    async fn available_months_unions_budgets_and_transactions() {
        let (service, repo) = service_with_repo();
        service
            .create_budget("May".to_string(), "2024-05".to_string(), Decimal::ZERO)
            .await
            .unwrap();
        service
            .create_budget("July".to_string(), "2024-07".to_string(), Decimal::ZERO)
            .await
            .unwrap();
        add_transaction(&repo, "some-category", dec!(10), "2024-06-15").await;

        assert_eq!(
            service.get_available_months().unwrap(),
            vec!["2024-05", "2024-06", "2024-07"]
        );
    }

    #[tokio::test]
    async fn remove_category_only_deletes_that_months_transactions() {
        let (service, repo) = service_with_repo();
        let budget = reference_budget(&service).await;
        let groceries = budget
            .categories
            .iter()
            .find(|c| c.name == "groceries")
            .unwrap()
            .id
            .clone();

        add_transaction(&repo, &groceries, dec!(100), "2024-06-01").await;
        add_transaction(&repo, &groceries, dec!(200), "2024-07-01").await;

        service
            .remove_category("2024-06", &groceries)
            .await
            .unwrap();

        let remaining = repo.get_transactions().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].month, "2024-07");

        // The surviving variable category now takes the whole pool.
        let budget = service.get_budget("2024-06").unwrap().unwrap();
        let transport = budget
            .categories
            .iter()
            .find(|c| c.name == "transport")
            .unwrap();
        assert_eq!(transport.planned_amount, dec!(105000.00));
    }

    #[tokio::test]
    async fn permanent_category_propagates_to_future_budgets_only() {
        let (service, _repo) = service_with_repo();
        for month in ["2024-04", "2024-05", "2024-06", "2024-07"] {
            service
                .create_budget(format!("Budget {}", month), month.to_string(), dec!(1000))
                .await
                .unwrap();
        }
        let insurance = service
            .add_category(
                "2024-05",
                NewCategory {
                    is_permanent: true,
                    ..new_category(
                        "insurance",
                        dec!(300),
                        CategoryType::Expense,
                        Allocation::Fixed,
                    )
                },
            )
            .await
            .unwrap()
            .unwrap();

        let copied = service
            .copy_permanent_category_to_future_months(&insurance.id, "2024-05")
            .await
            .unwrap();
        assert_eq!(copied, 2);

        assert!(service
            .get_budget("2024-04")
            .unwrap()
            .unwrap()
            .categories
            .iter()
            .all(|c| c.name != "insurance"));
        for month in ["2024-06", "2024-07"] {
            let budget = service.get_budget(month).unwrap().unwrap();
            let copy = budget
                .categories
                .iter()
                .find(|c| c.name == "insurance")
                .unwrap();
            assert_ne!(copy.id, insurance.id);
            assert_eq!(copy.planned_amount, dec!(300));
        }

        // Propagating again finds the name everywhere and copies nothing.
        let copied = service
            .copy_permanent_category_to_future_months(&insurance.id, "2024-05")
            .await
            .unwrap();
        assert_eq!(copied, 0);
    }

    #[tokio::test]
    async fn savings_summary_uses_remainders() {
        let (service, repo) = service_with_repo();
        let budget = reference_budget(&service).await;
        let groceries = budget
            .categories
            .iter()
            .find(|c| c.name == "groceries")
            .unwrap();
        add_transaction(&repo, &groceries.id, dec!(20000), "2024-06-10").await;

        let savings = service.get_savings_summary().unwrap();
        assert_eq!(savings.savings_by_month.len(), 1);
        assert_eq!(savings.savings_by_month[0].month, "2024-06");
        // Fully planned-out budget: planned remainder is zero.
        assert_eq!(savings.total_planned_savings, dec!(0));
        assert_eq!(savings.total_actual_savings, dec!(85000));
        assert_eq!(savings.goal, dec!(100000));
    }

    #[tokio::test]
    async fn clear_all_data_resets_store() {
        let (service, repo) = service_with_repo();
        let budget = reference_budget(&service).await;
        add_transaction(&repo, &budget.categories[0].id, dec!(5), "2024-06-01").await;

        service.clear_all_data().await.unwrap();
        assert!(service.get_all_budgets().unwrap().is_empty());
        assert!(repo.get_transactions().unwrap().is_empty());
        assert_eq!(repo.get_settings().unwrap().savings_goal, dec!(100000));
    }

    #[tokio::test]
    async fn initialize_seed_budgets_creates_two_months_once() {
        let (service, _repo) = service_with_repo();
        service.initialize_seed_budgets().await.unwrap();
        let budgets = service.get_all_budgets().unwrap();
        assert_eq!(budgets.len(), 2);

        service.initialize_seed_budgets().await.unwrap();
        assert_eq!(service.get_all_budgets().unwrap().len(), 2);
    }
}
