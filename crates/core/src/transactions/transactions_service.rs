use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionSummary, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::budgets::BudgetRepositoryTrait;
use crate::errors::{BudgetError, Result, ValidationError};
use crate::months;
use crate::settings::SettingsRepositoryTrait;

pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
    ) -> Self {
        TransactionService {
            transaction_repository,
            budget_repository,
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
}

fn ensure_non_negative(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(amount.to_string()).into());
    }
    Ok(())
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        self.transaction_repository.get_transaction(transaction_id)
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        self.transaction_repository.get_transactions()
    }

    fn get_transactions_by_category(
        &self,
        category_id: &str,
        month: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let target = self.target_month(month)?;
        self.transaction_repository
            .get_transactions_by_category(category_id, &target)
    }

    fn get_transaction_summaries(&self, month: Option<&str>) -> Result<Vec<TransactionSummary>> {
        let target = self.target_month(month)?;
        let transactions = self.transaction_repository.get_transactions_by_month(&target)?;

        let mut by_category: HashMap<String, TransactionSummary> = HashMap::new();
        for transaction in transactions {
            let entry = by_category
                .entry(transaction.category_id.clone())
                .or_insert_with(|| TransactionSummary {
                    category_id: transaction.category_id.clone(),
                    category_name: String::new(),
                    total_amount: Decimal::ZERO,
                    transaction_count: 0,
                    last_transaction: None,
                });
            entry.total_amount += transaction.amount;
            entry.transaction_count += 1;
            if entry.last_transaction.map_or(true, |d| transaction.date > d) {
                entry.last_transaction = Some(transaction.date);
            }
        }

        let mut summaries: Vec<TransactionSummary> = by_category.into_values().collect();
        for summary in &mut summaries {
            if let Some((_, category)) =
                self.budget_repository.find_category(&summary.category_id)?
            {
                summary.category_name = category.name;
            }
        }
        summaries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        Ok(summaries)
    }

    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        ensure_non_negative(new_transaction.amount)?;
        if self
            .budget_repository
            .find_category(&new_transaction.category_id)?
            .is_none()
        {
            return Err(
                BudgetError::CategoryNotFound(new_transaction.category_id.clone()).into(),
            );
        }
        let transaction = self
            .transaction_repository
            .add_transaction(new_transaction)
            .await?;
        debug!(
            "Recorded transaction {} in {}",
            transaction.id, transaction.month
        );
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<()> {
        if let Some(amount) = update.amount {
            ensure_non_negative(amount)?;
        }
        if self
            .transaction_repository
            .get_transaction(transaction_id)?
            .is_none()
        {
            return Ok(());
        }
        self.transaction_repository
            .update_transaction(transaction_id, update)
            .await?;
        Ok(())
    }

    async fn remove_transaction(&self, transaction_id: &str) -> Result<()> {
        self.transaction_repository
            .remove_transaction(transaction_id)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::{Allocation, CategoryType, NewBudget, NewCategory};
    use crate::test_support::MockRepo;
    use crate::transactions::TransactionType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn service_with_repo() -> (TransactionService, Arc<MockRepo>) {
        let repo = Arc::new(MockRepo::new());
        let service = TransactionService::new(repo.clone(), repo.clone(), repo.clone());
        (service, repo)
    }

    async fn seed_category(repo: &MockRepo, month: &str, name: &str) -> String {
        repo.create_budget(NewBudget {
            id: None,
            name: format!("Budget {}", month),
            month: month.to_string(),
            total_income: dec!(1000),
        })
        .await
        .unwrap();
        repo.add_category(
            month,
            NewCategory {
                id: None,
                name: name.to_string(),
                planned_amount: Decimal::ZERO,
                category_type: CategoryType::Expense,
                allocation: Allocation::Variable {
                    proportion: dec!(1),
                },
                color: None,
                is_permanent: false,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_transaction(category_id: &str, amount: Decimal, day: &str) -> NewTransaction {
        NewTransaction {
            id: None,
            category_id: category_id.to_string(),
            amount,
            description: "coffee".to_string(),
            date: date(day),
            transaction_type: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn month_key_is_derived_from_date() {
        let (service, repo) = service_with_repo();
        let category = seed_category(&repo, "2024-06", "groceries").await;

        let transaction = service
            .add_transaction(new_transaction(&category, dec!(42), "2024-06-15"))
            .await
            .unwrap();
        assert_eq!(transaction.month, "2024-06");
    }

    #[tokio::test]
    async fn date_update_rederives_month_key() {
        let (service, repo) = service_with_repo();
        let category = seed_category(&repo, "2024-06", "groceries").await;
        let transaction = service
            .add_transaction(new_transaction(&category, dec!(42), "2024-06-15"))
            .await
            .unwrap();

        service
            .update_transaction(
                &transaction.id,
                TransactionUpdate {
                    date: Some(date("2024-07-02")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service.get_transaction(&transaction.id).unwrap().unwrap();
        assert_eq!(updated.month, "2024-07");

        // Amount-only update leaves the month key alone.
        service
            .update_transaction(
                &transaction.id,
                TransactionUpdate {
                    amount: Some(dec!(50)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let updated = service.get_transaction(&transaction.id).unwrap().unwrap();
        assert_eq!(updated.month, "2024-07");
    }

    #[tokio::test]
    async fn rejects_unknown_category_and_negative_amount() {
        let (service, repo) = service_with_repo();
        let category = seed_category(&repo, "2024-06", "groceries").await;

        assert!(service
            .add_transaction(new_transaction("missing", dec!(1), "2024-06-15"))
            .await
            .is_err());
        assert!(service
            .add_transaction(new_transaction(&category, dec!(-1), "2024-06-15"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_of_missing_transaction_is_a_no_op() {
        let (service, _repo) = service_with_repo();
        service
            .update_transaction("missing", TransactionUpdate::default())
            .await
            .unwrap();
        service.remove_transaction("missing").await.unwrap();
    }

    #[tokio::test]
    async fn by_category_listing_is_scoped_and_newest_first() {
        let (service, repo) = service_with_repo();
        let category = seed_category(&repo, "2024-06", "groceries").await;

        for day in ["2024-06-03", "2024-06-20", "2024-07-01"] {
            service
                .add_transaction(new_transaction(&category, dec!(10), day))
                .await
                .unwrap();
        }

        let june = service
            .get_transactions_by_category(&category, Some("2024-06"))
            .unwrap();
        assert_eq!(june.len(), 2);
        assert_eq!(june[0].date, date("2024-06-20"));
        assert_eq!(june[1].date, date("2024-06-03"));
    }

    #[tokio::test]
    async fn summaries_roll_up_by_category() {
        let (service, repo) = service_with_repo();
        let groceries = seed_category(&repo, "2024-06", "groceries").await;

        service
            .add_transaction(new_transaction(&groceries, dec!(10), "2024-06-03"))
            .await
            .unwrap();
        service
            .add_transaction(new_transaction(&groceries, dec!(32), "2024-06-08"))
            .await
            .unwrap();

        let summaries = service.get_transaction_summaries(Some("2024-06")).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].category_name, "groceries");
        assert_eq!(summaries[0].total_amount, dec!(42));
        assert_eq!(summaries[0].transaction_count, 2);
        assert_eq!(summaries[0].last_transaction, Some(date("2024-06-08")));
    }
}
