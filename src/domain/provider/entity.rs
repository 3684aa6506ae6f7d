//! Business provider entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_provider_id, ProviderValidationError};

/// Provider identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a new ProviderId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ProviderValidationError> {
        let id = id.into();
        validate_provider_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderId {
    type Error = ProviderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Password credential of a provider
///
/// A credential starts out `Plain` and becomes `Hashed` on its first save.
/// The save path hashes `Plain` values exactly once and never re-hashes a
/// `Hashed` value, so an already-persisted credential cannot be corrupted by
/// saving the entity again.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Plaintext password awaiting its first save
    Plain(String),
    /// Encoded salted hash
    Hashed(String),
}

impl Credential {
    /// Whether this credential has already been hashed
    pub fn is_hashed(&self) -> bool {
        matches!(self, Self::Hashed(_))
    }

    /// The encoded hash, if this credential has been hashed
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Hashed(hash) => Some(hash),
            Self::Plain(_) => None,
        }
    }

    /// The plaintext value, if this credential has not been hashed yet
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            Self::Plain(plain) => Some(plain),
            Self::Hashed(_) => None,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => write!(f, "Plain([redacted])"),
            Self::Hashed(_) => write!(f, "Hashed([redacted])"),
        }
    }
}

/// Role of a provider account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderRole {
    /// Administrative account
    Admin,
    /// Regular business provider
    #[default]
    Provider,
}

/// Status of a provider account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// Provider is active and can log in
    #[default]
    Active,
    /// Provider is temporarily suspended
    Suspended,
}

impl ProviderStatus {
    /// Check if the provider can log in
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Business provider entity - the credentialed account that records asset
/// events
#[derive(Debug, Clone, Serialize)]
pub struct BusinessProvider {
    /// Unique identifier
    id: ProviderId,
    /// Username for login, unique across the store
    username: String,
    /// Contact email
    email: String,
    /// Human display name
    name: String,
    /// Password credential - never serialized
    #[serde(skip_serializing)]
    credential: Credential,
    /// Account role
    role: ProviderRole,
    /// Current status
    status: ProviderStatus,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    /// Last login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl BusinessProvider {
    /// Create a new provider
    pub fn new(
        id: ProviderId,
        username: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        credential: Credential,
        role: ProviderRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: username.into(),
            email: email.into(),
            name: name.into(),
            credential,
            role,
            status: ProviderStatus::Active,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Rebuild a provider from stored fields, bypassing timestamp defaults
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: ProviderId,
        username: String,
        email: String,
        name: String,
        credential: Credential,
        role: ProviderRole,
        status: ProviderStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            name,
            credential,
            role,
            status,
            created_at,
            updated_at,
            last_login_at,
        }
    }

    // Getters

    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The stored password hash, if the credential has been hashed
    pub fn password_hash(&self) -> Option<&str> {
        self.credential.hash()
    }

    pub fn role(&self) -> ProviderRole {
        self.role
    }

    pub fn status(&self) -> ProviderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Check if the provider is active and can log in
    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    pub fn is_admin(&self) -> bool {
        self.role == ProviderRole::Admin
    }

    // Mutators

    /// Replace the credential
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
        self.touch();
    }

    /// Set a new plaintext password; it will be hashed on the next save
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.set_credential(Credential::Plain(password.into()));
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    /// Suspend the provider
    pub fn suspend(&mut self) {
        self.status = ProviderStatus::Suspended;
        self.touch();
    }

    /// Activate a suspended provider
    pub fn activate(&mut self) {
        if self.status == ProviderStatus::Suspended {
            self.status = ProviderStatus::Active;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_provider_id_valid() {
        let id = ProviderId::new("provider-1").unwrap();
        assert_eq!(id.as_str(), "provider-1");
    }

    #[test]
    fn test_provider_id_invalid() {
        assert!(ProviderId::new("").is_err());
        assert!(ProviderId::new("-bad").is_err());
    }

    #[test]
    fn test_credential_states() {
        let plain = Credential::Plain("pass".to_string());
        assert!(!plain.is_hashed());
        assert_eq!(plain.plaintext(), Some("pass"));
        assert_eq!(plain.hash(), None);

        let hashed = Credential::Hashed("$argon2id$...".to_string());
        assert!(hashed.is_hashed());
        assert_eq!(hashed.plaintext(), None);
        assert_eq!(hashed.hash(), Some("$argon2id$..."));
    }

    #[test]
    fn test_credential_debug_redacts_value() {
        let plain = Credential::Plain("secret".to_string());
        let rendered = format!("{:?}", plain);
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_provider_creation() {
        let provider = create_test_provider("provider-1", "someUserName");

        assert_eq!(provider.username(), "someUserName");
        assert_eq!(provider.email(), "an@email.com");
        assert_eq!(provider.password_hash(), Some("hashed_password"));
        assert!(provider.is_active());
        assert!(!provider.is_admin());
        assert!(provider.last_login_at().is_none());
    }

    #[test]
    fn test_provider_status_changes() {
        let mut provider = create_test_provider("provider-1", "someUserName");

        provider.suspend();
        assert!(!provider.is_active());
        assert_eq!(provider.status(), ProviderStatus::Suspended);

        provider.activate();
        assert!(provider.is_active());
    }

    #[test]
    fn test_provider_set_password_marks_needs_hashing() {
        let mut provider = create_test_provider("provider-1", "someUserName");
        assert!(provider.credential().is_hashed());

        provider.set_password("new-password");
        assert!(!provider.credential().is_hashed());
        assert_eq!(provider.credential().plaintext(), Some("new-password"));
    }

    #[test]
    fn test_provider_record_login() {
        let mut provider = create_test_provider("provider-1", "someUserName");
        assert!(provider.last_login_at().is_none());

        provider.record_login();
        assert!(provider.last_login_at().is_some());
    }

    #[test]
    fn test_provider_serialization_excludes_credential() {
        let provider = create_test_provider("provider-1", "someUserName");

        let json = serde_json::to_string(&provider).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("credential"));
    }
}
