//! Application state for shared services

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::asset::{Asset, AssetRepository};
use crate::domain::auth::{AuthLookupError, AuthPrincipal};
use crate::domain::provider::{BusinessProvider, BusinessProviderRepository, ProviderStatus};
use crate::domain::DomainError;
use crate::infrastructure::asset::{AddEventRequest, AssetService};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::provider::{
    AuthLookupService, BusinessProviderService, PasswordHasher, RegisterProviderRequest,
    UpdatePasswordRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub provider_service: Arc<dyn ProviderServiceTrait>,
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub auth_lookup: Arc<dyn AuthLookupTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}

/// Trait for provider service operations
#[async_trait::async_trait]
pub trait ProviderServiceTrait: Send + Sync {
    async fn register(
        &self,
        request: RegisterProviderRequest,
    ) -> Result<BusinessProvider, DomainError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<BusinessProvider>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<BusinessProvider>, DomainError>;
    async fn record_login(&self, username: &str) -> Result<BusinessProvider, DomainError>;
    async fn update_password(
        &self,
        id: &str,
        request: UpdatePasswordRequest,
    ) -> Result<BusinessProvider, DomainError>;
    async fn suspend(&self, id: &str) -> Result<BusinessProvider, DomainError>;
    async fn activate(&self, id: &str) -> Result<BusinessProvider, DomainError>;
    async fn list(
        &self,
        status: Option<ProviderStatus>,
    ) -> Result<Vec<BusinessProvider>, DomainError>;
    async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError>;
}

/// Trait for asset service operations
#[async_trait::async_trait]
pub trait AssetServiceTrait: Send + Sync {
    async fn ingest(&self, json_text: &str) -> Result<Asset, DomainError>;
    async fn get(&self, uuid: Uuid) -> Result<Option<Asset>, DomainError>;
    async fn list(&self) -> Result<Vec<Asset>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn add_event(&self, uuid: Uuid, request: AddEventRequest) -> Result<Asset, DomainError>;
    async fn delete(&self, uuid: Uuid) -> Result<bool, DomainError>;
}

/// Trait for the authentication lookup boundary
#[async_trait::async_trait]
pub trait AuthLookupTrait: Send + Sync {
    async fn load_by_username(&self, username: &str) -> Result<AuthPrincipal, AuthLookupError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> ProviderServiceTrait for BusinessProviderService<R, H>
where
    R: BusinessProviderRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(
        &self,
        request: RegisterProviderRequest,
    ) -> Result<BusinessProvider, DomainError> {
        BusinessProviderService::register(self, request).await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<BusinessProvider>, DomainError> {
        BusinessProviderService::find_by_username(self, username).await
    }

    async fn get(&self, id: &str) -> Result<Option<BusinessProvider>, DomainError> {
        BusinessProviderService::get(self, id).await
    }

    async fn record_login(&self, username: &str) -> Result<BusinessProvider, DomainError> {
        BusinessProviderService::record_login(self, username).await
    }

    async fn update_password(
        &self,
        id: &str,
        request: UpdatePasswordRequest,
    ) -> Result<BusinessProvider, DomainError> {
        BusinessProviderService::update_password(self, id, request).await
    }

    async fn suspend(&self, id: &str) -> Result<BusinessProvider, DomainError> {
        BusinessProviderService::suspend(self, id).await
    }

    async fn activate(&self, id: &str) -> Result<BusinessProvider, DomainError> {
        BusinessProviderService::activate(self, id).await
    }

    async fn list(
        &self,
        status: Option<ProviderStatus>,
    ) -> Result<Vec<BusinessProvider>, DomainError> {
        BusinessProviderService::list(self, status).await
    }

    async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError> {
        BusinessProviderService::count(self, status).await
    }
}

#[async_trait::async_trait]
impl<R: AssetRepository + 'static> AssetServiceTrait for AssetService<R> {
    async fn ingest(&self, json_text: &str) -> Result<Asset, DomainError> {
        AssetService::ingest(self, json_text).await
    }

    async fn get(&self, uuid: Uuid) -> Result<Option<Asset>, DomainError> {
        AssetService::get(self, uuid).await
    }

    async fn list(&self) -> Result<Vec<Asset>, DomainError> {
        AssetService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        AssetService::count(self).await
    }

    async fn add_event(&self, uuid: Uuid, request: AddEventRequest) -> Result<Asset, DomainError> {
        AssetService::add_event(self, uuid, request).await
    }

    async fn delete(&self, uuid: Uuid) -> Result<bool, DomainError> {
        AssetService::delete(self, uuid).await
    }
}

#[async_trait::async_trait]
impl<R: BusinessProviderRepository + 'static> AuthLookupTrait for AuthLookupService<R> {
    async fn load_by_username(&self, username: &str) -> Result<AuthPrincipal, AuthLookupError> {
        AuthLookupService::load_by_username(self, username).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        provider_service: Arc<dyn ProviderServiceTrait>,
        asset_service: Arc<dyn AssetServiceTrait>,
        auth_lookup: Arc<dyn AuthLookupTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            provider_service,
            asset_service,
            auth_lookup,
            jwt_service,
            password_hasher,
        }
    }
}
