//! In-memory provider repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::provider::{
    BusinessProvider, BusinessProviderRepository, ProviderId, ProviderStatus,
};
use crate::domain::DomainError;

/// In-memory implementation of BusinessProviderRepository
#[derive(Debug, Default)]
pub struct InMemoryProviderRepository {
    providers: Arc<RwLock<HashMap<String, BusinessProvider>>>,
    /// Index for username -> provider ID lookup
    username_index: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryProviderRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial providers
    pub fn with_providers(providers: Vec<BusinessProvider>) -> Self {
        let mut providers_map = HashMap::new();
        let mut username_map = HashMap::new();

        for provider in providers {
            let id = provider.id().as_str().to_string();
            username_map.insert(provider.username().to_string(), id.clone());
            providers_map.insert(id, provider);
        }

        Self {
            providers: Arc::new(RwLock::new(providers_map)),
            username_index: Arc::new(RwLock::new(username_map)),
        }
    }
}

#[async_trait]
impl BusinessProviderRepository for InMemoryProviderRepository {
    async fn get(&self, id: &ProviderId) -> Result<Option<BusinessProvider>, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.get(id.as_str()).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<BusinessProvider>, DomainError> {
        let username_index = self.username_index.read().await;

        if let Some(provider_id) = username_index.get(username) {
            let providers = self.providers.read().await;
            return Ok(providers.get(provider_id).cloned());
        }

        Ok(None)
    }

    async fn save(&self, provider: BusinessProvider) -> Result<BusinessProvider, DomainError> {
        let mut providers = self.providers.write().await;
        let mut username_index = self.username_index.write().await;

        let id = provider.id().as_str().to_string();
        let username = provider.username().to_string();

        // Username uniqueness: the index may only point at this provider
        if let Some(owner) = username_index.get(&username) {
            if owner != &id {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    username
                )));
            }
        }

        // Drop a stale index entry when an existing provider was renamed
        if let Some(existing) = providers.get(&id) {
            if existing.username() != username {
                username_index.remove(existing.username());
            }
        }

        username_index.insert(username, id.clone());
        providers.insert(id, provider.clone());

        Ok(provider)
    }

    async fn delete(&self, id: &ProviderId) -> Result<bool, DomainError> {
        let mut providers = self.providers.write().await;
        let mut username_index = self.username_index.write().await;

        if let Some(provider) = providers.remove(id.as_str()) {
            username_index.remove(provider.username());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(
        &self,
        status: Option<ProviderStatus>,
    ) -> Result<Vec<BusinessProvider>, DomainError> {
        let providers = self.providers.read().await;

        let mut result: Vec<BusinessProvider> = providers
            .values()
            .filter(|p| status.is_none_or(|s| p.status() == s))
            .cloned()
            .collect();

        result.sort_by_key(|p| p.created_at());

        Ok(result)
    }

    async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError> {
        let providers = self.providers.read().await;

        Ok(providers
            .values()
            .filter(|p| status.is_none_or(|s| p.status() == s))
            .count())
    }

    async fn record_login(&self, id: &ProviderId) -> Result<(), DomainError> {
        let mut providers = self.providers.write().await;

        if let Some(provider) = providers.get_mut(id.as_str()) {
            provider.record_login();
            Ok(())
        } else {
            Err(DomainError::not_found(format!(
                "Provider '{}' not found",
                id
            )))
        }
    }
}
