use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use spendwise_core::transactions::{
    NewTransaction, Transaction, TransactionSummary, TransactionUpdate,
};

#[derive(Deserialize)]
struct MonthQuery {
    month: Option<String>,
}

async fn get_transactions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.transaction_service.get_transactions()?))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(transaction): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let created = state
        .transaction_service
        .add_transaction(transaction)
        .await?;
    Ok(Json(created))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<TransactionUpdate>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .update_transaction(&id, update)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.transaction_service.remove_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_by_category(
    Path(category_id): Path<String>,
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.transaction_service.get_transactions_by_category(
        &category_id,
        query.month.as_deref(),
    )?))
}

async fn get_summaries(
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TransactionSummary>>> {
    Ok(Json(
        state
            .transaction_service
            .get_transaction_summaries(query.month.as_deref())?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(get_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            axum::routing::put(update_transaction).delete(delete_transaction),
        )
        .route("/transactions/by-category/{id}", get(get_by_category))
        .route("/transactions/summaries", get(get_summaries))
}
