//! Authentication endpoints
//!
//! Login resolves the account through the authentication lookup service and
//! compares the candidate password against the stored hash here, at the
//! consumer side of that boundary. Successful logins are answered with a JWT.

use axum::{
    extract::State,
    routing::{get, post, put},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireProvider;
use crate::api::providers::ProviderResponse;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::auth::AuthLookupError;
use crate::infrastructure::provider::UpdatePasswordRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_current_provider))
        .route("/password", put(change_password))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub provider: ProviderResponse,
    pub expires_at: String,
}

/// Request to change the current provider's password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordApiRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response for a password change
#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub message: String,
}

/// POST /auth/login
///
/// Returns a JWT token on successful authentication.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!(username = %request.username, "Login attempt");

    let principal = state
        .auth_lookup
        .load_by_username(&request.username)
        .await
        .map_err(|e| match e {
            AuthLookupError::UserNotFound { .. } => {
                ApiError::unauthorized("Invalid username or password")
            }
            AuthLookupError::Store(e) => ApiError::internal(e.to_string()),
        })?;

    if !principal.enabled {
        return Err(ApiError::unauthorized("Account is suspended"));
    }

    if !state
        .password_hasher
        .verify(&request.password, &principal.password_hash)
    {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let provider = state
        .provider_service
        .record_login(&principal.username)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let token = state
        .jwt_service
        .generate(&provider)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    Ok(Json(LoginResponse {
        token,
        provider: ProviderResponse::from(&provider),
        expires_at: expires_at.to_rfc3339(),
    }))
}

/// GET /auth/me
///
/// Returns the currently authenticated provider.
pub async fn get_current_provider(
    State(state): State<AppState>,
    RequireProvider(principal): RequireProvider,
) -> Result<Json<ProviderResponse>, ApiError> {
    let provider = state
        .provider_service
        .find_by_username(&principal.username)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("Unknown account"))?;

    Ok(Json(ProviderResponse::from(&provider)))
}

/// PUT /auth/password
///
/// Changes the current provider's password after verifying the current one.
pub async fn change_password(
    State(state): State<AppState>,
    RequireProvider(principal): RequireProvider,
    Json(request): Json<ChangePasswordApiRequest>,
) -> Result<Json<ChangePasswordResponse>, ApiError> {
    debug!(username = %principal.username, "Password change");

    let provider = state
        .provider_service
        .find_by_username(&principal.username)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("Unknown account"))?;

    state
        .provider_service
        .update_password(
            provider.id().as_str(),
            UpdatePasswordRequest {
                current_password: request.current_password,
                new_password: request.new_password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ChangePasswordResponse {
        message: "Password updated".to_string(),
    }))
}
