use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    error::{ApiError, Operation},
    schema::{AddExpenseSchema, DeleteExpenseSchema, ListExpensesQuery, UpdateExpenseSchema},
    AppState,
};

// Handler for the readiness probe
pub async fn readiness(State(data): State<Arc<AppState>>) -> impl IntoResponse {
    match data.store.ping().await {
        Ok(()) => (StatusCode::OK, "Ready"),
        Err(err) => {
            warn!(error = %err, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Database not ready")
        }
    }
}

// Handler for creating a new expense
pub async fn add_expense(
    State(data): State<Arc<AppState>>,
    body: Result<Json<AddExpenseSchema>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::InvalidPayload)?;
    let expense = body.validate()?;

    data.store
        .insert(&expense, Utc::now())
        .await
        .map_err(ApiError::failed(Operation::Add))?;

    Ok((StatusCode::OK, "Expense added successfully!"))
}

// Handler for listing every expense owned by a username
pub async fn get_expenses(
    State(data): State<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(pairs) = params.map_err(|_| ApiError::UsernameRequired)?;
    let username = ListExpensesQuery::from_pairs(pairs).validate()?;

    let expenses = data
        .store
        .list_for_user(&username)
        .await
        .map_err(ApiError::failed(Operation::List))?;

    Ok((StatusCode::OK, Json(expenses)))
}

// Handler for rewriting an expense in place. Reports success even when
// nothing matched (id, username).
pub async fn update_expense(
    State(data): State<Arc<AppState>>,
    body: Result<Json<UpdateExpenseSchema>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::InvalidPayload)?;
    let change = body.validate()?;

    let rows = data
        .store
        .update(&change, Utc::now())
        .await
        .map_err(ApiError::failed(Operation::Update))?;
    if rows == 0 {
        info!(id = change.id, username = %change.username, "update matched no expense");
    }

    Ok((StatusCode::OK, "Expense updated successfully!"))
}

// Handler for deleting an expense. Same no-match contract as update.
pub async fn delete_expense(
    State(data): State<Arc<AppState>>,
    body: Result<Json<DeleteExpenseSchema>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::InvalidPayload)?;
    let key = body.validate()?;

    let rows = data
        .store
        .delete(&key)
        .await
        .map_err(ApiError::failed(Operation::Delete))?;
    if rows == 0 {
        info!(id = key.id, username = %key.username, "delete matched no expense");
    }

    Ok((StatusCode::OK, "Expense deleted successfully!"))
}
