//! Account API endpoints

use api_types::account::{AccountNew, AccountView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Account, AccountInput, User};
use uuid::Uuid;

use crate::{ServerError, currency_from_engine, currency_to_engine, server::ServerState};

fn input(payload: AccountNew) -> AccountInput {
    AccountInput {
        name: payload.name,
        kind: payload.kind,
        balance_minor: payload.balance_minor,
        currency: currency_to_engine(payload.currency),
    }
}

fn view(account: Account) -> AccountView {
    AccountView {
        id: account.id,
        user_id: account.user_id,
        name: account.name,
        kind: account.kind,
        balance_minor: account.balance_minor,
        currency: currency_from_engine(account.currency),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.accounts(user.id).await?;
    Ok(Json(accounts.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let account = state.engine.create_account(user.id, input(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(account))))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountView>, ServerError> {
    Ok(Json(view(state.engine.account(user.id, id).await?)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AccountNew>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state
        .engine
        .update_account(user.id, id, input(payload))
        .await?;
    Ok(Json(view(account)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_account(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
