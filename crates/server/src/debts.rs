//! Debt API endpoints

use api_types::debt::{DebtNew, DebtView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Debt, DebtInput, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn input(payload: DebtNew) -> DebtInput {
    DebtInput {
        name: payload.name,
        amount_minor: payload.amount_minor,
        interest_rate: payload.interest_rate,
        minimum_payment_minor: payload.minimum_payment_minor,
        due_date: payload.due_date,
        kind: payload.kind,
    }
}

pub(crate) fn view(debt: Debt) -> DebtView {
    DebtView {
        id: debt.id,
        user_id: debt.user_id,
        name: debt.name,
        amount_minor: debt.amount_minor,
        interest_rate: debt.interest_rate,
        minimum_payment_minor: debt.minimum_payment_minor,
        due_date: debt.due_date,
        kind: debt.kind,
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<DebtView>>, ServerError> {
    let debts = state.engine.debts(user.id).await?;
    Ok(Json(debts.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<DebtNew>,
) -> Result<(StatusCode, Json<DebtView>), ServerError> {
    let debt = state.engine.create_debt(user.id, input(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(debt))))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DebtView>, ServerError> {
    Ok(Json(view(state.engine.debt(user.id, id).await?)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DebtNew>,
) -> Result<Json<DebtView>, ServerError> {
    let debt = state.engine.update_debt(user.id, id, input(payload)).await?;
    Ok(Json(view(debt)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_debt(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
