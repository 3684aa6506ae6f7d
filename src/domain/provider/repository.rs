//! Business provider repository trait - the credential store abstraction

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{BusinessProvider, ProviderId, ProviderStatus};
use crate::domain::DomainError;

/// Repository trait for provider storage, keyed by username
///
/// Implementations must enforce username uniqueness; a save that would give
/// two providers the same username fails with a conflict.
#[async_trait]
pub trait BusinessProviderRepository: Send + Sync + Debug {
    /// Get a provider by ID
    async fn get(&self, id: &ProviderId) -> Result<Option<BusinessProvider>, DomainError>;

    /// Get a provider by username (for login); no match is not an error
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<BusinessProvider>, DomainError>;

    /// Insert or update a provider
    async fn save(&self, provider: BusinessProvider) -> Result<BusinessProvider, DomainError>;

    /// Delete a provider
    async fn delete(&self, id: &ProviderId) -> Result<bool, DomainError>;

    /// List providers (optionally filtered by status)
    async fn list(&self, status: Option<ProviderStatus>)
        -> Result<Vec<BusinessProvider>, DomainError>;

    /// Count providers (optionally filtered by status)
    async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError>;

    /// Check if a username is taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// Record a login for a provider
    async fn record_login(&self, id: &ProviderId) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock provider repository for testing
    #[derive(Debug, Default)]
    pub struct MockProviderRepository {
        providers: Arc<RwLock<HashMap<String, BusinessProvider>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockProviderRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl BusinessProviderRepository for MockProviderRepository {
        async fn get(&self, id: &ProviderId) -> Result<Option<BusinessProvider>, DomainError> {
            self.check_should_fail().await?;
            let providers = self.providers.read().await;
            Ok(providers.get(id.as_str()).cloned())
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<BusinessProvider>, DomainError> {
            self.check_should_fail().await?;
            let providers = self.providers.read().await;
            Ok(providers
                .values()
                .find(|p| p.username() == username)
                .cloned())
        }

        async fn save(
            &self,
            provider: BusinessProvider,
        ) -> Result<BusinessProvider, DomainError> {
            self.check_should_fail().await?;
            let mut providers = self.providers.write().await;
            let id = provider.id().as_str().to_string();

            let username_taken = providers
                .values()
                .any(|p| p.username() == provider.username() && p.id().as_str() != id);

            if username_taken {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    provider.username()
                )));
            }

            providers.insert(id, provider.clone());
            Ok(provider)
        }

        async fn delete(&self, id: &ProviderId) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut providers = self.providers.write().await;
            Ok(providers.remove(id.as_str()).is_some())
        }

        async fn list(
            &self,
            status: Option<ProviderStatus>,
        ) -> Result<Vec<BusinessProvider>, DomainError> {
            self.check_should_fail().await?;
            let providers = self.providers.read().await;

            let result: Vec<BusinessProvider> = providers
                .values()
                .filter(|p| status.is_none_or(|s| p.status() == s))
                .cloned()
                .collect();

            Ok(result)
        }

        async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError> {
            self.check_should_fail().await?;
            let providers = self.providers.read().await;

            Ok(providers
                .values()
                .filter(|p| status.is_none_or(|s| p.status() == s))
                .count())
        }

        async fn record_login(&self, id: &ProviderId) -> Result<(), DomainError> {
            self.check_should_fail().await?;
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

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::provider::{Credential, ProviderRole};

        fn create_test_provider(id: &str, username: &str) -> BusinessProvider {
            let provider_id = ProviderId::new(id).unwrap();
            BusinessProvider::new(
                provider_id,
                username,
                "an@email.com",
                "Jhonn Doe",
                Credential::Hashed("hashed_password".to_string()),
                ProviderRole::Provider,
            )
        }

        #[tokio::test]
        async fn test_save_and_get() {
            let repo = MockProviderRepository::new();
            let provider = create_test_provider("provider-1", "someUserName");

            repo.save(provider.clone()).await.unwrap();

            let retrieved = repo.get(provider.id()).await.unwrap();
            assert!(retrieved.is_some());
            assert_eq!(retrieved.unwrap().username(), "someUserName");
        }

        #[tokio::test]
        async fn test_find_by_username() {
            let repo = MockProviderRepository::new();
            let provider = create_test_provider("provider-1", "someUserName");

            repo.save(provider).await.unwrap();

            let retrieved = repo.find_by_username("someUserName").await.unwrap();
            assert!(retrieved.is_some());
            assert_eq!(retrieved.unwrap().id().as_str(), "provider-1");
        }

        #[tokio::test]
        async fn test_find_by_username_on_empty_store() {
            let repo = MockProviderRepository::new();

            let missing = repo.find_by_username("missing").await.unwrap();
            assert!(missing.is_none());
        }

        #[tokio::test]
        async fn test_username_uniqueness() {
            let repo = MockProviderRepository::new();
            let first = create_test_provider("provider-1", "someUserName");
            let second = create_test_provider("provider-2", "someUserName");

            repo.save(first).await.unwrap();

            let result = repo.save(second).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_save_is_upsert() {
            let repo = MockProviderRepository::new();
            let mut provider = create_test_provider("provider-1", "someUserName");

            repo.save(provider.clone()).await.unwrap();

            provider.set_email("new@email.com");
            repo.save(provider.clone()).await.unwrap();

            let retrieved = repo.get(provider.id()).await.unwrap().unwrap();
            assert_eq!(retrieved.email(), "new@email.com");
        }

        #[tokio::test]
        async fn test_record_login() {
            let repo = MockProviderRepository::new();
            let provider = create_test_provider("provider-1", "someUserName");

            repo.save(provider.clone()).await.unwrap();
            repo.record_login(provider.id()).await.unwrap();

            let retrieved = repo.get(provider.id()).await.unwrap().unwrap();
            assert!(retrieved.last_login_at().is_some());
        }
    }
}
