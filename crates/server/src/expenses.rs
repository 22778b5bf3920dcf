//! Expense API endpoints

use api_types::expense::{ExpenseNew, ExpenseView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Expense, ExpenseInput, User};
use uuid::Uuid;

use crate::{ServerError, period_from_engine, period_to_engine, server::ServerState};

fn input(payload: ExpenseNew) -> ExpenseInput {
    ExpenseInput {
        amount_minor: payload.amount_minor,
        category: payload.category,
        description: payload.description,
        date: payload.date,
        is_recurring: payload.is_recurring,
        recurring_period: payload.recurring_period.map(period_to_engine),
    }
}

fn view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        user_id: expense.user_id,
        amount_minor: expense.amount_minor,
        category: expense.category,
        description: expense.description,
        date: expense.date,
        is_recurring: expense.is_recurring,
        recurring_period: expense.recurring_period.map(period_from_engine),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.expenses(user.id).await?;
    Ok(Json(expenses.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state.engine.create_expense(user.id, input(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(expense))))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseView>, ServerError> {
    Ok(Json(view(state.engine.expense(user.id, id).await?)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .update_expense(user.id, id, input(payload))
        .await?;
    Ok(Json(view(expense)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
