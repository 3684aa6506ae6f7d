//! Business provider service - account registration, persistence, and
//! authentication support

use std::sync::Arc;

use tracing::debug;

use crate::domain::provider::{
    validate_display_name, validate_email, validate_password, validate_username,
    BusinessProvider, BusinessProviderRepository, Credential, ProviderId, ProviderRole,
    ProviderStatus,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new provider
#[derive(Debug, Clone)]
pub struct RegisterProviderRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: ProviderRole,
}

/// Request for updating a provider's password
#[derive(Debug, Clone)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Service over the credential store
///
/// All persistence flows through [`BusinessProviderService::save`], which
/// hashes a plaintext credential exactly once before it reaches the
/// repository. An entity whose credential is already hashed is forwarded
/// untouched, so re-saving cannot corrupt the stored hash.
#[derive(Debug)]
pub struct BusinessProviderService<R: BusinessProviderRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: BusinessProviderRepository, H: PasswordHasher> BusinessProviderService<R, H> {
    /// Create a new provider service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Persist a provider, hashing its credential if it is still plaintext
    pub async fn save(
        &self,
        mut provider: BusinessProvider,
    ) -> Result<BusinessProvider, DomainError> {
        if let Some(plaintext) = provider.credential().plaintext() {
            debug!(username = %provider.username(), "Hashing credential before save");
            let hash = self.hasher.hash(plaintext)?;
            provider.set_credential(Credential::Hashed(hash));
        }

        self.repository.save(provider).await
    }

    /// Register a new provider account
    pub async fn register(
        &self,
        request: RegisterProviderRequest,
    ) -> Result<BusinessProvider, DomainError> {
        validate_username(&request.username)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_display_name(&request.name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let provider_id =
            ProviderId::new(&request.id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let provider = BusinessProvider::new(
            provider_id,
            &request.username,
            &request.email,
            &request.name,
            Credential::Plain(request.password),
            request.role,
        );

        self.save(provider).await
    }

    /// Look up a provider by username; no match is not an error here
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<BusinessProvider>, DomainError> {
        self.repository.find_by_username(username).await
    }

    /// Get a provider by ID
    pub async fn get(&self, id: &str) -> Result<Option<BusinessProvider>, DomainError> {
        let provider_id =
            ProviderId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get(&provider_id).await
    }

    /// Record a successful login and return the updated provider
    pub async fn record_login(&self, username: &str) -> Result<BusinessProvider, DomainError> {
        let provider = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Provider '{}' not found", username))
            })?;

        self.repository.record_login(provider.id()).await?;

        self.repository
            .get(provider.id())
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Provider '{}' not found", username)))
    }

    /// Update a provider's password after verifying the current one
    pub async fn update_password(
        &self,
        id: &str,
        request: UpdatePasswordRequest,
    ) -> Result<BusinessProvider, DomainError> {
        let provider_id =
            ProviderId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut provider = self
            .repository
            .get(&provider_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Provider '{}' not found", id)))?;

        let Some(hash) = provider.password_hash() else {
            return Err(DomainError::internal(format!(
                "Provider '{}' has an unhashed credential in the store",
                id
            )));
        };

        if !self.hasher.verify(&request.current_password, hash) {
            return Err(DomainError::validation("Current password is incorrect"));
        }

        validate_password(&request.new_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        provider.set_password(request.new_password);

        self.save(provider).await
    }

    /// Suspend a provider
    pub async fn suspend(&self, id: &str) -> Result<BusinessProvider, DomainError> {
        self.with_provider(id, |p| p.suspend()).await
    }

    /// Activate a suspended provider
    pub async fn activate(&self, id: &str) -> Result<BusinessProvider, DomainError> {
        self.with_provider(id, |p| p.activate()).await
    }

    /// List providers
    pub async fn list(
        &self,
        status: Option<ProviderStatus>,
    ) -> Result<Vec<BusinessProvider>, DomainError> {
        self.repository.list(status).await
    }

    /// Count providers
    pub async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError> {
        self.repository.count(status).await
    }

    async fn with_provider(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut BusinessProvider),
    ) -> Result<BusinessProvider, DomainError> {
        let provider_id =
            ProviderId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut provider = self
            .repository
            .get(&provider_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Provider '{}' not found", id)))?;

        mutate(&mut provider);

        self.save(provider).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::provider::password::Argon2Hasher;
    use crate::infrastructure::provider::repository::InMemoryProviderRepository;

    fn create_service() -> BusinessProviderService<InMemoryProviderRepository, Argon2Hasher> {
        let repository = Arc::new(InMemoryProviderRepository::new());
        // Low cost keeps the test suite fast
        let hasher = Arc::new(Argon2Hasher::with_cost(1024, 1));
        BusinessProviderService::new(repository, hasher)
    }

    fn make_request(id: &str, username: &str, password: &str) -> RegisterProviderRequest {
        RegisterProviderRequest {
            id: id.to_string(),
            username: username.to_string(),
            email: "an@email.com".to_string(),
            name: "Jhonn Doe".to_string(),
            password: password.to_string(),
            role: ProviderRole::Provider,
        }
    }

    #[tokio::test]
    async fn test_save_hashes_plaintext_credential() {
        let service = create_service();
        let hasher = Argon2Hasher::new();

        let provider = BusinessProvider::new(
            ProviderId::new("provider-1").unwrap(),
            "someUserName",
            "an@email.com",
            "Jhonn Doe",
            Credential::Plain("pass".to_string()),
            ProviderRole::Provider,
        );

        let saved = service.save(provider).await.unwrap();

        let hash = saved.password_hash().unwrap();
        assert_ne!(hash, "pass");
        assert!(hasher.verify("pass", hash));
    }

    #[tokio::test]
    async fn test_save_twice_does_not_rehash() {
        let service = create_service();

        let provider = BusinessProvider::new(
            ProviderId::new("provider-1").unwrap(),
            "someUserName",
            "an@email.com",
            "Jhonn Doe",
            Credential::Plain("pass".to_string()),
            ProviderRole::Provider,
        );

        let saved = service.save(provider).await.unwrap();
        let first_hash = saved.password_hash().unwrap().to_string();

        let saved_again = service.save(saved).await.unwrap();

        // Byte-identical: the already-hashed credential passed through
        assert_eq!(saved_again.password_hash().unwrap(), first_hash);
        assert!(Argon2Hasher::new().verify("pass", saved_again.password_hash().unwrap()));
    }

    #[tokio::test]
    async fn test_find_by_username_on_empty_store() {
        let service = create_service();

        let result = service.find_by_username("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_register_provider() {
        let service = create_service();

        let provider = service
            .register(make_request("provider-1", "someUserName", "pass"))
            .await
            .unwrap();

        assert_eq!(provider.username(), "someUserName");
        assert_eq!(provider.email(), "an@email.com");
        assert!(provider.credential().is_hashed());
        assert!(provider.is_active());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let service = create_service();

        service
            .register(make_request("provider-1", "someUserName", "pass"))
            .await
            .unwrap();

        let result = service
            .register(make_request("provider-2", "someUserName", "other"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let service = create_service();

        let result = service.register(make_request("provider-1", "ab", "pass")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_invalid_display_name() {
        let service = create_service();

        let mut request = make_request("provider-1", "someUserName", "pass");
        request.name = "Jhonn  Doe".to_string();

        let result = service.register(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_record_login() {
        let service = create_service();

        service
            .register(make_request("provider-1", "someUserName", "pass"))
            .await
            .unwrap();

        let provider = service.record_login("someUserName").await.unwrap();
        assert!(provider.last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_record_login_unknown_username() {
        let service = create_service();

        let result = service.record_login("missing").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_password() {
        let service = create_service();
        let hasher = Argon2Hasher::new();

        service
            .register(make_request("provider-1", "someUserName", "old-pass"))
            .await
            .unwrap();

        let updated = service
            .update_password(
                "provider-1",
                UpdatePasswordRequest {
                    current_password: "old-pass".to_string(),
                    new_password: "new-pass".to_string(),
                },
            )
            .await
            .unwrap();

        let hash = updated.password_hash().unwrap();
        assert!(!hasher.verify("old-pass", hash));
        assert!(hasher.verify("new-pass", hash));
    }

    #[tokio::test]
    async fn test_update_password_wrong_current() {
        let service = create_service();

        service
            .register(make_request("provider-1", "someUserName", "pass"))
            .await
            .unwrap();

        let result = service
            .update_password(
                "provider-1",
                UpdatePasswordRequest {
                    current_password: "wrong".to_string(),
                    new_password: "new-pass".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_suspend_and_activate() {
        let service = create_service();

        service
            .register(make_request("provider-1", "someUserName", "pass"))
            .await
            .unwrap();

        let suspended = service.suspend("provider-1").await.unwrap();
        assert_eq!(suspended.status(), ProviderStatus::Suspended);

        let activated = service.activate("provider-1").await.unwrap();
        assert_eq!(activated.status(), ProviderStatus::Active);
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let service = create_service();

        service
            .register(make_request("provider-1", "user1", "pass"))
            .await
            .unwrap();
        service
            .register(make_request("provider-2", "user2", "pass"))
            .await
            .unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 2);
        assert_eq!(service.count(None).await.unwrap(), 2);
    }
}
