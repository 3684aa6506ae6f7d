//! Business provider endpoints - registration and account management

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::provider::{BusinessProvider, ProviderRole, ProviderStatus};
use crate::infrastructure::provider::RegisterProviderRequest;

/// Request to register a new provider
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterProviderApiRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Provider response (safe to expose)
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<&BusinessProvider> for ProviderResponse {
    fn from(provider: &BusinessProvider) -> Self {
        Self {
            id: provider.id().as_str().to_string(),
            username: provider.username().to_string(),
            email: provider.email().to_string(),
            name: provider.name().to_string(),
            role: role_to_string(provider.role()),
            status: status_to_string(provider.status()),
            created_at: provider.created_at().to_rfc3339(),
            last_login_at: provider.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

fn role_to_string(role: ProviderRole) -> String {
    match role {
        ProviderRole::Admin => "admin".to_string(),
        ProviderRole::Provider => "provider".to_string(),
    }
}

fn status_to_string(status: ProviderStatus) -> String {
    match status {
        ProviderStatus::Active => "active".to_string(),
        ProviderStatus::Suspended => "suspended".to_string(),
    }
}

/// List providers response
#[derive(Debug, Clone, Serialize)]
pub struct ListProvidersResponse {
    pub providers: Vec<ProviderResponse>,
    pub total: usize,
}

/// POST /providers
///
/// Public registration path; accounts always start with the provider role.
pub async fn register_provider(
    State(state): State<AppState>,
    Json(request): Json<RegisterProviderApiRequest>,
) -> Result<Json<ProviderResponse>, ApiError> {
    debug!(username = %request.username, "Registering provider");

    let service_request = RegisterProviderRequest {
        id: request.id,
        username: request.username,
        email: request.email,
        name: request.name,
        password: request.password,
        role: ProviderRole::Provider,
    };

    let provider = state
        .provider_service
        .register(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProviderResponse::from(&provider)))
}

/// GET /providers
pub async fn list_providers(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<ListProvidersResponse>, ApiError> {
    debug!("Admin listing providers");

    let providers = state
        .provider_service
        .list(None)
        .await
        .map_err(ApiError::from)?;

    let responses: Vec<ProviderResponse> =
        providers.iter().map(ProviderResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListProvidersResponse {
        providers: responses,
        total,
    }))
}

/// GET /providers/{username}
pub async fn get_provider(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(username): Path<String>,
) -> Result<Json<ProviderResponse>, ApiError> {
    debug!(username = %username, "Admin getting provider");

    let provider = state
        .provider_service
        .find_by_username(&username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Provider '{}' not found", username)))?;

    Ok(Json(ProviderResponse::from(&provider)))
}

/// POST /providers/{id}/suspend
pub async fn suspend_provider(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ProviderResponse>, ApiError> {
    debug!(id = %id, "Admin suspending provider");

    let provider = state
        .provider_service
        .suspend(&id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProviderResponse::from(&provider)))
}

/// POST /providers/{id}/activate
pub async fn activate_provider(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ProviderResponse>, ApiError> {
    debug!(id = %id, "Admin activating provider");

    let provider = state
        .provider_service
        .activate(&id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProviderResponse::from(&provider)))
}
