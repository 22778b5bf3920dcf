//! Registration and profile endpoints.

use api_types::user::{UserNew, UserUpdate, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{NewUser, ProfileUpdate, User};

use crate::{ServerError, server::ServerState};

pub(crate) fn view(user: User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        is_active: user.is_active,
        created_at: user.created_at,
    }
}

/// Handle requests for registering a new user
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    if payload.password.is_empty() {
        return Err(
            engine::EngineError::InvalidField("password must not be empty".to_string()).into(),
        );
    }
    let hashed_password = state.auth.hash_password(&payload.password).await?;

    let user = state
        .engine
        .create_user(NewUser {
            email: payload.email,
            hashed_password,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;
    tracing::info!(user_id = %user.id, "registered user");

    Ok((StatusCode::CREATED, Json(view(user))))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserView> {
    Json(view(user))
}

pub async fn update_me(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .update_profile(
            user.id,
            ProfileUpdate {
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
            },
        )
        .await?;
    Ok(Json(view(user)))
}
