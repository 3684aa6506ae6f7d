//! Business provider domain
//!
//! Domain types and traits for the credentialed provider accounts that own
//! asset history: the entity, its validation rules, and the credential-store
//! repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{BusinessProvider, Credential, ProviderId, ProviderRole, ProviderStatus};
pub use repository::BusinessProviderRepository;
pub use validation::{
    validate_display_name, validate_email, validate_password, validate_provider_id,
    validate_username, ProviderValidationError,
};

#[cfg(test)]
pub use repository::mock::MockProviderRepository;
