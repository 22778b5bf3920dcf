use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    accounts,
    auth::{self, AuthManager},
    debts, expenses, goals, incomes, reports, user,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub auth: Arc<AuthManager>,
}

impl ServerState {
    pub fn new(engine: Engine, auth: AuthManager) -> Self {
        Self {
            engine: Arc::new(engine),
            auth: Arc::new(auth),
        }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router.
///
/// `/token`, `/users` (registration) and `/health` are public; everything
/// else needs a bearer token.
pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/users/me", get(user::me).put(user::update_me))
        .route(
            "/accounts",
            get(accounts::list).post(accounts::create),
        )
        .route(
            "/accounts/{id}",
            get(accounts::get).put(accounts::update).delete(accounts::delete),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get).put(expenses::update).delete(expenses::delete),
        )
        .route("/incomes", get(incomes::list).post(incomes::create))
        .route(
            "/incomes/{id}",
            get(incomes::get).put(incomes::update).delete(incomes::delete),
        )
        .route("/debts", get(debts::list).post(debts::create))
        .route(
            "/debts/{id}",
            get(debts::get).put(debts::update).delete(debts::delete),
        )
        .route("/goals", get(goals::list).post(goals::create))
        .route(
            "/goals/{id}",
            get(goals::get).put(goals::update).delete(goals::delete),
        )
        .route("/reports/financial_summary", get(reports::financial_summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    Router::new()
        .route("/token", post(auth::login))
        .route("/users", post(user::register))
        .route("/health", get(health))
        .merge(protected)
        .with_state(state)
}

pub async fn run(state: ServerState, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
