use api_types::income::{IncomeNew, IncomeView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Income, IncomeInput, User};
use uuid::Uuid;

use crate::{ServerError, period_from_engine, period_to_engine, server::ServerState};

fn input(payload: IncomeNew) -> IncomeInput {
    IncomeInput {
        amount_minor: payload.amount_minor,
        source: payload.source,
        description: payload.description,
        date: payload.date,
        is_recurring: payload.is_recurring,
        recurring_period: payload.recurring_period.map(period_to_engine),
    }
}

fn view(income: Income) -> IncomeView {
    IncomeView {
        id: income.id,
        user_id: income.user_id,
        amount_minor: income.amount_minor,
        source: income.source,
        description: income.description,
        date: income.date,
        is_recurring: income.is_recurring,
        recurring_period: income.recurring_period.map(period_from_engine),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let incomes = state.engine.incomes(user.id).await?;
    Ok(Json(incomes.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<IncomeNew>,
) -> Result<(StatusCode, Json<IncomeView>), ServerError> {
    let income = state.engine.create_income(user.id, input(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(income))))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IncomeView>, ServerError> {
    Ok(Json(view(state.engine.income(user.id, id).await?)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<IncomeNew>,
) -> Result<Json<IncomeView>, ServerError> {
    let income = state
        .engine
        .update_income(user.id, id, input(payload))
        .await?;
    Ok(Json(view(income)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_income(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
