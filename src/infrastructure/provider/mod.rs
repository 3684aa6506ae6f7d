//! Provider infrastructure
//!
//! Implementations backing the provider domain: Argon2 password hashing,
//! in-memory and PostgreSQL repositories, the provider service, and the
//! authentication lookup adapter.

mod auth_lookup;
mod password;
mod postgres_repository;
mod repository;
mod service;

pub use auth_lookup::AuthLookupService;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresProviderRepository;
pub use repository::InMemoryProviderRepository;
pub use service::{BusinessProviderService, RegisterProviderRequest, UpdatePasswordRequest};
