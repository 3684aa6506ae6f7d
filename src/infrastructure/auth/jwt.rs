//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::provider::{BusinessProvider, ProviderRole};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (provider ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Account role
    pub role: ProviderRole,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a provider
    pub fn new(provider: &BusinessProvider, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: provider.id().as_str().to_string(),
            username: provider.username().to_string(),
            role: provider.role(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Get the provider ID from the claims
    pub fn provider_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for JWT issuance
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a JWT token for a provider
    fn generate(&self, provider: &BusinessProvider) -> Result<String, DomainError>;

    /// Validate a JWT token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Get the token expiration time in hours
    fn expiration_hours(&self) -> u64;
}

/// HS256 JWT service backed by a shared secret
#[derive(Clone)]
pub struct JwtService {
    expiration_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.expiration_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            expiration_hours: config.expiration_hours,
            encoding_key,
            decoding_key,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, provider: &BusinessProvider) -> Result<String, DomainError> {
        let claims = JwtClaims::new(provider, self.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::{Credential, ProviderId};

    fn create_provider() -> BusinessProvider {
        BusinessProvider::new(
            ProviderId::new("provider-1").unwrap(),
            "someUserName",
            "an@email.com",
            "Jhonn Doe",
            Credential::Hashed("hash".to_string()),
            ProviderRole::Admin,
        )
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret", 24))
    }

    #[test]
    fn test_generate_and_validate_round_trip() {
        let service = create_service();
        let provider = create_provider();

        let token = service.generate(&provider).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.provider_id(), "provider-1");
        assert_eq!(claims.username, "someUserName");
        assert_eq!(claims.role, ProviderRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_rejects_tampered_token() {
        let service = create_service();
        let provider = create_provider();

        let mut token = service.generate(&provider).unwrap();
        token.push('x');

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let provider = create_provider();

        let issuer = JwtService::new(JwtConfig::new("secret-a", 24));
        let verifier = JwtService::new(JwtConfig::new("secret-b", 24));

        let token = issuer.generate(&provider).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let service = create_service();
        let rendered = format!("{:?}", service);

        assert!(!rendered.contains("test-secret"));
        assert!(rendered.contains("[hidden]"));
    }
}
