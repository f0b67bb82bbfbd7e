use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use spendwise_core::budgets::{
    Budget, BudgetCategory, BudgetSummary, CategoryUpdate, NewCategory, SavingsSummary,
};
use spendwise_core::errors::BudgetError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBudgetBody {
    name: String,
    month: String,
    #[serde(default)]
    total_income: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomeBody {
    total_income: Decimal,
}

async fn get_budgets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Budget>>> {
    Ok(Json(state.budget_service.get_all_budgets()?))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBudgetBody>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .create_budget(body.name, body.month, body.total_income)
        .await?;
    Ok(Json(budget))
}

async fn get_budget(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .get_budget(&month)?
        .ok_or(BudgetError::BudgetNotFound(month))?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.budget_service.delete_budget(&month).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_income(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<IncomeBody>,
) -> ApiResult<StatusCode> {
    state
        .budget_service
        .update_budget_income(&month, body.total_income)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_category(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(category): Json<NewCategory>,
) -> ApiResult<Json<BudgetCategory>> {
    let created = state
        .budget_service
        .add_category(&month, category)
        .await?
        .ok_or(BudgetError::BudgetNotFound(month))?;
    Ok(Json(created))
}

async fn update_category(
    Path((month, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResult<StatusCode> {
    state
        .budget_service
        .update_category(&month, &category_id, update)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_category(
    Path((month, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .budget_service
        .remove_category(&month, &category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn redistribute(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.redistribute_income(&month).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clones a permanent category into later budgeted months; responds with
/// the number of months it reached.
async fn propagate_category(
    Path((month, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<usize>> {
    let copied = state
        .budget_service
        .copy_permanent_category_to_future_months(&category_id, &month)
        .await?;
    Ok(Json(copied))
}

async fn get_category_actual(
    Path((month, category_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Decimal>> {
    let actual = state
        .budget_service
        .get_category_actual_amount(&category_id, Some(&month))?;
    Ok(Json(actual))
}

async fn get_month_summary(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSummary>> {
    Ok(Json(state.budget_service.get_budget_summary(Some(&month))?))
}

async fn get_current_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSummary>> {
    Ok(Json(state.budget_service.get_budget_summary(None)?))
}

async fn get_savings_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SavingsSummary>> {
    Ok(Json(state.budget_service.get_savings_summary()?))
}

async fn get_available_months(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.budget_service.get_available_months()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(get_budgets).post(create_budget))
        .route("/budgets/{month}", get(get_budget).delete(delete_budget))
        .route("/budgets/{month}/income", put(update_income))
        .route("/budgets/{month}/categories", post(add_category))
        .route(
            "/budgets/{month}/categories/{id}",
            put(update_category).delete(remove_category),
        )
        .route(
            "/budgets/{month}/categories/{id}/propagate",
            post(propagate_category),
        )
        .route(
            "/budgets/{month}/categories/{id}/actual",
            get(get_category_actual),
        )
        .route("/budgets/{month}/redistribute", post(redistribute))
        .route("/budgets/{month}/summary", get(get_month_summary))
        .route("/summary", get(get_current_summary))
        .route("/savings/summary", get(get_savings_summary))
        .route("/months", get(get_available_months))
}
