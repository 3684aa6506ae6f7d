//! Authentication lookup service
//!
//! Adapts the credential store's optional lookup into the shape an
//! authentication consumer expects: a present record becomes an
//! [`AuthPrincipal`], an absent one becomes the distinguished
//! [`AuthLookupError::UserNotFound`] failure. Password comparison stays with
//! the caller; this service never hashes.

use std::sync::Arc;

use tracing::debug;

use crate::domain::auth::{AuthLookupError, AuthPrincipal};
use crate::domain::provider::BusinessProviderRepository;

/// Stateless adapter over the credential store lookup
#[derive(Debug)]
pub struct AuthLookupService<R: BusinessProviderRepository> {
    repository: Arc<R>,
}

impl<R: BusinessProviderRepository> AuthLookupService<R> {
    /// Create a new lookup service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Load the authentication view of a provider by username
    pub async fn load_by_username(
        &self,
        username: &str,
    ) -> Result<AuthPrincipal, AuthLookupError> {
        debug!(username = %username, "Loading authentication principal");

        let provider = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AuthLookupError::UserNotFound {
                username: username.to_string(),
            })?;

        Ok(AuthPrincipal::from_provider(&provider)?)
    }
}
