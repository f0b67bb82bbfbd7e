use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use spendwise_core::budgets::{
    Budget, BudgetCategory, BudgetRepositoryTrait, CategoryUpdate, NewBudget, NewCategory,
};
use spendwise_core::errors::{BudgetError, Result};

use super::model::{
    allocation_to_columns, category_type_to_str, BudgetDB, CategoryDB, NewBudgetDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{budget_categories, budgets, transactions};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

fn load_budget_db(conn: &mut SqliteConnection, month: &str) -> Result<Option<BudgetDB>> {
    Ok(budgets::table
        .filter(budgets::month.eq(month))
        .first::<BudgetDB>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

fn require_budget_db(conn: &mut SqliteConnection, month: &str) -> Result<BudgetDB> {
    load_budget_db(conn, month)?
        .ok_or_else(|| BudgetError::BudgetNotFound(month.to_string()).into())
}

fn load_categories(conn: &mut SqliteConnection, budget_id: &str) -> Result<Vec<CategoryDB>> {
    Ok(budget_categories::table
        .filter(budget_categories::budget_id.eq(budget_id))
        .order(budget_categories::created_at.asc())
        .load::<CategoryDB>(conn)
        .map_err(StorageError::from)?)
}

/// Deletes a budget row together with its categories (cascade) and the
/// transactions recorded against those categories within the budget's month.
fn delete_budget_db(conn: &mut SqliteConnection, budget: &BudgetDB) -> Result<usize> {
    let category_ids: Vec<String> = load_categories(conn, &budget.id)?
        .into_iter()
        .map(|c| c.id)
        .collect();
    diesel::delete(
        transactions::table
            .filter(transactions::month.eq(&budget.month))
            .filter(transactions::category_id.eq_any(&category_ids)),
    )
    .execute(conn)
    .map_err(StorageError::from)?;
    Ok(diesel::delete(budgets::table.find(&budget.id))
        .execute(conn)
        .map_err(StorageError::from)?)
}

fn touch_budget(conn: &mut SqliteConnection, budget_id: &str) -> Result<()> {
    diesel::update(budgets::table.find(budget_id))
        .set(budgets::updated_at.eq(Utc::now().naive_utc()))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, month: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        match load_budget_db(&mut conn, month)? {
            None => Ok(None),
            Some(budget_db) => {
                let categories = load_categories(&mut conn, &budget_db.id)?;
                Ok(Some(budget_db.into_domain(categories)?))
            }
        }
    }

    fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let budgets_db = budgets::table
            .order(budgets::month.asc())
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        let mut categories_by_budget: HashMap<String, Vec<CategoryDB>> = HashMap::new();
        for category in budget_categories::table
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?
        {
            categories_by_budget
                .entry(category.budget_id.clone())
                .or_default()
                .push(category);
        }
        budgets_db
            .into_iter()
            .map(|b| {
                let categories = categories_by_budget.remove(&b.id).unwrap_or_default();
                b.into_domain(categories)
            })
            .collect()
    }

    fn get_category(&self, month: &str, category_id: &str) -> Result<Option<BudgetCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budget_categories::table
            .inner_join(budgets::table)
            .filter(budget_categories::id.eq(category_id))
            .filter(budgets::month.eq(month))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(BudgetCategory::try_from).transpose()
    }

    fn find_category(&self, category_id: &str) -> Result<Option<(String, BudgetCategory)>> {
        let mut conn = get_connection(&self.pool)?;
        let row: Option<(CategoryDB, String)> = budget_categories::table
            .inner_join(budgets::table)
            .filter(budget_categories::id.eq(category_id))
            .select((CategoryDB::as_select(), budgets::month))
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(|(category, month)| Ok((month, BudgetCategory::try_from(category)?)))
            .transpose()
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                // Creating a budget for an existing month key replaces it.
                if let Some(existing) = load_budget_db(conn, &new_budget.month)? {
                    delete_budget_db(conn, &existing)?;
                }

                let now = Utc::now().naive_utc();
                let row = NewBudgetDB {
                    id: new_budget.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_budget.name,
                    month: new_budget.month,
                    total_income: new_budget.total_income.to_string(),
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(budgets::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let inserted = budgets::table
                    .find(&row.id)
                    .first::<BudgetDB>(conn)
                    .map_err(StorageError::from)?;
                inserted.into_domain(Vec::new())
            })
            .await
    }

    async fn update_budget_income(&self, month: &str, total_income: Decimal) -> Result<Budget> {
        let month_owned = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let budget_db = require_budget_db(conn, &month_owned)?;
                diesel::update(budgets::table.find(&budget_db.id))
                    .set((
                        budgets::total_income.eq(total_income.to_string()),
                        budgets::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let updated = budgets::table
                    .find(&budget_db.id)
                    .first::<BudgetDB>(conn)
                    .map_err(StorageError::from)?;
                let categories = load_categories(conn, &updated.id)?;
                updated.into_domain(categories)
            })
            .await
    }

    async fn delete_budget(&self, month: &str) -> Result<usize> {
        let month_owned = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                match load_budget_db(conn, &month_owned)? {
                    None => Ok(0),
                    Some(budget_db) => delete_budget_db(conn, &budget_db),
                }
            })
            .await
    }

    async fn delete_all_budgets(&self) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(budgets::table)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn add_category(
        &self,
        month: &str,
        new_category: NewCategory,
    ) -> Result<BudgetCategory> {
        let month_owned = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetCategory> {
                let budget_db = require_budget_db(conn, &month_owned)?;
                let (allocation_kind, proportion) = allocation_to_columns(new_category.allocation);
                let row = CategoryDB {
                    id: new_category.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    budget_id: budget_db.id.clone(),
                    name: new_category.name,
                    planned_amount: new_category.planned_amount.to_string(),
                    category_type: category_type_to_str(new_category.category_type).to_string(),
                    allocation_kind: allocation_kind.to_string(),
                    proportion,
                    color: new_category.color,
                    is_permanent: new_category.is_permanent,
                    created_at: Utc::now().naive_utc(),
                };
                diesel::insert_into(budget_categories::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                touch_budget(conn, &budget_db.id)?;
                BudgetCategory::try_from(row)
            })
            .await
    }

    async fn update_category(
        &self,
        month: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<BudgetCategory> {
        let month_owned = month.to_string();
        let category_id_owned = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetCategory> {
                let budget_db = require_budget_db(conn, &month_owned)?;
                let mut row = budget_categories::table
                    .filter(budget_categories::id.eq(&category_id_owned))
                    .filter(budget_categories::budget_id.eq(&budget_db.id))
                    .first::<CategoryDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| BudgetError::CategoryNotFound(category_id_owned.clone()))?;

                if let Some(name) = update.name {
                    row.name = name;
                }
                if let Some(planned_amount) = update.planned_amount {
                    row.planned_amount = planned_amount.to_string();
                }
                if let Some(category_type) = update.category_type {
                    row.category_type = category_type_to_str(category_type).to_string();
                }
                if let Some(allocation) = update.allocation {
                    let (allocation_kind, proportion) = allocation_to_columns(allocation);
                    row.allocation_kind = allocation_kind.to_string();
                    row.proportion = proportion;
                }
                if let Some(color) = update.color {
                    row.color = Some(color);
                }
                if let Some(is_permanent) = update.is_permanent {
                    row.is_permanent = is_permanent;
                }

                diesel::update(budget_categories::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                touch_budget(conn, &budget_db.id)?;
                BudgetCategory::try_from(row)
            })
            .await
    }

    async fn remove_category(&self, month: &str, category_id: &str) -> Result<usize> {
        let month_owned = month.to_string();
        let category_id_owned = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let budget_db = require_budget_db(conn, &month_owned)?;
                // Only this month's transactions go with the category.
                diesel::delete(
                    transactions::table
                        .filter(transactions::category_id.eq(&category_id_owned))
                        .filter(transactions::month.eq(&month_owned)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                let removed = diesel::delete(
                    budget_categories::table
                        .filter(budget_categories::id.eq(&category_id_owned))
                        .filter(budget_categories::budget_id.eq(&budget_db.id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                touch_budget(conn, &budget_db.id)?;
                Ok(removed)
            })
            .await
    }

    async fn set_planned_amounts(
        &self,
        month: &str,
        amounts: Vec<(String, Decimal)>,
    ) -> Result<()> {
        let month_owned = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let budget_db = require_budget_db(conn, &month_owned)?;
                for (category_id, amount) in amounts {
                    diesel::update(
                        budget_categories::table
                            .filter(budget_categories::id.eq(&category_id))
                            .filter(budget_categories::budget_id.eq(&budget_db.id)),
                    )
                    .set(budget_categories::planned_amount.eq(amount.to_string()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                touch_budget(conn, &budget_db.id)?;
                Ok(())
            })
            .await
    }
}
