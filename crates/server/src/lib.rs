use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use auth::{AuthConfig, AuthError, AuthManager, DEFAULT_SECRET};
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod accounts;
mod auth;
mod debts;
mod expenses;
mod goals;
mod incomes;
mod reports;
mod server;
mod user;

pub enum ServerError {
    Engine(EngineError),
    Auth(AuthError),
}

/// JSON body of every error response.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidField(_)
        | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Auth(err) => return err.into_response(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

pub(crate) fn currency_to_engine(value: api_types::Currency) -> engine::Currency {
    match value {
        api_types::Currency::Usd => engine::Currency::Usd,
        api_types::Currency::Eur => engine::Currency::Eur,
        api_types::Currency::Gbp => engine::Currency::Gbp,
    }
}

pub(crate) fn currency_from_engine(value: engine::Currency) -> api_types::Currency {
    match value {
        engine::Currency::Usd => api_types::Currency::Usd,
        engine::Currency::Eur => api_types::Currency::Eur,
        engine::Currency::Gbp => api_types::Currency::Gbp,
    }
}

pub(crate) fn period_to_engine(value: api_types::RecurringPeriod) -> engine::RecurringPeriod {
    match value {
        api_types::RecurringPeriod::Weekly => engine::RecurringPeriod::Weekly,
        api_types::RecurringPeriod::Monthly => engine::RecurringPeriod::Monthly,
        api_types::RecurringPeriod::Quarterly => engine::RecurringPeriod::Quarterly,
        api_types::RecurringPeriod::Yearly => engine::RecurringPeriod::Yearly,
    }
}

pub(crate) fn period_from_engine(value: engine::RecurringPeriod) -> api_types::RecurringPeriod {
    match value {
        engine::RecurringPeriod::Weekly => api_types::RecurringPeriod::Weekly,
        engine::RecurringPeriod::Monthly => api_types::RecurringPeriod::Monthly,
        engine::RecurringPeriod::Quarterly => api_types::RecurringPeriod::Quarterly,
        engine::RecurringPeriod::Yearly => api_types::RecurringPeriod::Yearly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidField("x".to_string()),
            EngineError::InvalidId("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn database_error_is_hidden_behind_500() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("disk on fire".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_error_maps_to_401() {
        let res = ServerError::from(AuthError::Unauthorized).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
