//! Password hashing and bearer tokens.
//!
//! Passwords are stored as argon2 PHC strings. Access tokens are HS256 JWTs
//! whose `sub` claim is the user id.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use api_types::auth::{LoginRequest, Token};
use argon2::{
    Argon2, PasswordHasher,
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordVerifier, SaltString},
};
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::WWW_AUTHENTICATE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use engine::EngineError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ErrorBody, ServerError, server::ServerState};

/// Signing secret used when none is configured. Only fit for development.
pub const DEFAULT_SECRET: &str = "change-me-in-production";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            token_ttl: Duration::from_secs(30 * 60),
        }
    }
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    /// Hash checked when the email is unknown so that a miss costs as much as
    /// a wrong password.
    dummy_hash: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Missing, malformed or expired token, or unknown/inactive user.
    #[error("unauthorized")]
    Unauthorized,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("auth failure: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.secret.trim().is_empty() {
            return Err(AuthError::Internal("JWT secret cannot be empty".to_string()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_ttl: config.token_ttl,
            dummy_hash: hash_blocking(&Uuid::new_v4().to_string())?,
        })
    }

    /// Argon2 hash of `password`, computed on the blocking pool.
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
    }

    /// Check `candidate` against a stored hash on the blocking pool.
    pub async fn verify_password(&self, candidate: &str, hash: &str) -> Result<(), AuthError> {
        let (candidate, hash) = (candidate.to_string(), hash.to_string());
        tokio::task::spawn_blocking(move || verify_blocking(&candidate, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))?
    }

    /// Burn one verification against a hash no password matches.
    pub async fn reject_unknown(&self, candidate: &str) -> AuthError {
        match self.verify_password(candidate, &self.dummy_hash).await {
            Err(err @ AuthError::Internal(_)) => err,
            _ => AuthError::InvalidCredentials,
        }
    }

    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Check signature and expiry, returning the user id of the token.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| {
                tracing::debug!("rejected token: {err}");
                AuthError::Unauthorized
            })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::Unauthorized)
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
}

fn verify_blocking(candidate: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {e}")))?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|err| match err {
            PasswordHashError::Password => AuthError::InvalidCredentials,
            other => AuthError::Internal(format!("Password verification failed: {other}")),
        })
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Incorrect email or password".to_string(),
            ),
            AuthError::Internal(msg) => {
                tracing::error!("auth failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        let mut response = (status, Json(ErrorBody { error })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, axum::http::HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Exchange email and password for an access token.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Token>, ServerError> {
    let user = match state.engine.user_by_email(&payload.email).await {
        Ok(user) => user,
        Err(EngineError::KeyNotFound(_)) => {
            return Err(state.auth.reject_unknown(&payload.password).await.into());
        }
        Err(err) => return Err(err.into()),
    };
    state
        .auth
        .verify_password(&payload.password, &user.hashed_password)
        .await?;
    if !user.is_active {
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = state.auth.issue_token(user.id)?;
    tracing::debug!(user_id = %user.id, "issued access token");
    Ok(Json(Token {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
    }))
}

/// Resolve the bearer token to an active [`engine::User`] and store it in the
/// request extensions.
pub(crate) async fn require_user(
    State(state): State<ServerState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Ok(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(AuthError::Unauthorized.into());
    };
    let user_id = state.auth.validate_token(bearer.token().trim())?;

    let user = match state.engine.user(user_id).await {
        Ok(user) => user,
        Err(EngineError::KeyNotFound(_)) => return Err(AuthError::Unauthorized.into()),
        Err(err) => return Err(err.into()),
    };
    if !user.is_active {
        return Err(AuthError::Unauthorized.into());
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
