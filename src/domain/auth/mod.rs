//! Authentication domain types
//!
//! The principal is the minimal view of a stored provider that an
//! authentication consumer needs: who they are, the stored hash to compare
//! against, and whether the account may log in. No hashing happens here.

use thiserror::Error;

use crate::domain::provider::{BusinessProvider, ProviderRole};
use crate::domain::DomainError;

/// Failure modes of the authentication lookup boundary
#[derive(Debug, Error)]
pub enum AuthLookupError {
    /// No provider exists with the requested username - a distinguished
    /// failure the authentication layer turns into a rejection
    #[error("User '{username}' not found")]
    UserNotFound { username: String },

    /// Store-level failures propagate unchanged
    #[error(transparent)]
    Store(#[from] DomainError),
}

/// Minimal authentication view of a stored provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPrincipal {
    /// Login username
    pub username: String,
    /// Stored password hash, already one-way transformed
    pub password_hash: String,
    /// Whether the account may log in
    pub enabled: bool,
    /// Account role
    pub role: ProviderRole,
}

impl AuthPrincipal {
    /// Adapt a stored provider into a principal
    ///
    /// Fails if the stored credential is still plaintext; that would mean the
    /// store was populated outside the save path and the record is corrupt.
    pub fn from_provider(provider: &BusinessProvider) -> Result<Self, DomainError> {
        let password_hash = provider.password_hash().ok_or_else(|| {
            DomainError::internal(format!(
                "Provider '{}' has an unhashed credential in the store",
                provider.username()
            ))
        })?;

        Ok(Self {
            username: provider.username().to_string(),
            password_hash: password_hash.to_string(),
            enabled: provider.is_active(),
            role: provider.role(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::{Credential, ProviderId};

    fn create_provider(credential: Credential) -> BusinessProvider {
        BusinessProvider::new(
            ProviderId::new("provider-1").unwrap(),
            "someUserName",
            "an@email.com",
            "Jhonn Doe",
            credential,
            ProviderRole::Provider,
        )
    }

    #[test]
    fn test_principal_passes_stored_hash_through() {
        let provider = create_provider(Credential::Hashed("pass".to_string()));

        let principal = AuthPrincipal::from_provider(&provider).unwrap();
        assert_eq!(principal.username, "someUserName");
        assert_eq!(principal.password_hash, "pass");
        assert!(principal.enabled);
        assert_eq!(principal.role, ProviderRole::Provider);
    }

    #[test]
    fn test_principal_reflects_suspension() {
        let mut provider = create_provider(Credential::Hashed("hash".to_string()));
        provider.suspend();

        let principal = AuthPrincipal::from_provider(&provider).unwrap();
        assert!(!principal.enabled);
    }

    #[test]
    fn test_principal_rejects_plaintext_credential() {
        let provider = create_provider(Credential::Plain("pass".to_string()));

        let result = AuthPrincipal::from_provider(&provider);
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[test]
    fn test_user_not_found_message() {
        let err = AuthLookupError::UserNotFound {
            username: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "User 'missing' not found");
    }
}
