//! Asset Tracking API
//!
//! A small asset-tracking backend:
//! - Business provider accounts with salted password hashing
//! - Authentication lookup adapted for JWT login
//! - Asset ingestion from external JSON payloads with pattern validation
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use api::state::AppState;
use domain::provider::ProviderRole;
use infrastructure::asset::{AssetService, InMemoryAssetRepository, PostgresAssetRepository};
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::provider::{
    Argon2Hasher, AuthLookupService, BusinessProviderService, InMemoryProviderRepository,
    PostgresProviderRepository, RegisterProviderRequest,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::with_cost(
        config.hashing.memory_kib,
        config.hashing.iterations,
    ));

    let (provider_service, asset_service, auth_lookup): (
        Arc<dyn api::state::ProviderServiceTrait>,
        Arc<dyn api::state::AssetServiceTrait>,
        Arc<dyn api::state::AuthLookupTrait>,
    ) = match config.storage.backend.as_str() {
        "postgres" => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pg_pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let provider_repository = Arc::new(PostgresProviderRepository::new(pg_pool.clone()));
            let asset_repository = Arc::new(PostgresAssetRepository::new(pg_pool));

            (
                Arc::new(BusinessProviderService::new(
                    provider_repository.clone(),
                    hasher.clone(),
                )),
                Arc::new(AssetService::new(asset_repository)),
                Arc::new(AuthLookupService::new(provider_repository)),
            )
        }
        other => {
            if other != "memory" {
                warn!("Unknown storage backend '{}', using in-memory", other);
            }
            info!("Using in-memory storage");

            let provider_repository = Arc::new(InMemoryProviderRepository::new());
            let asset_repository = Arc::new(InMemoryAssetRepository::new());

            (
                Arc::new(BusinessProviderService::new(
                    provider_repository.clone(),
                    hasher.clone(),
                )),
                Arc::new(AssetService::new(asset_repository)),
                Arc::new(AuthLookupService::new(provider_repository)),
            )
        }
    };

    create_initial_admin(provider_service.as_ref()).await?;

    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        resolve_jwt_secret(config),
        u64::from(config.auth.jwt_expiration_hours),
    )));

    Ok(AppState::new(
        provider_service,
        asset_service,
        auth_lookup,
        jwt_service,
        hasher,
    ))
}

/// Resolve the JWT secret from config, environment, or a random fallback
fn resolve_jwt_secret(config: &AppConfig) -> String {
    config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT secret configured. Generating a random one; \
                 sessions will NOT persist across restarts. \
                 Set JWT_SECRET for persistent sessions."
            );
            random_alphanumeric(64)
        })
}

fn random_alphanumeric(len: usize) -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Create an initial admin provider if the store is empty
async fn create_initial_admin(
    provider_service: &dyn api::state::ProviderServiceTrait,
) -> anyhow::Result<()> {
    if provider_service.count(None).await? > 0 {
        return Ok(());
    }

    let (password, from_env) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (random_alphanumeric(16), false),
    };

    let request = RegisterProviderRequest {
        id: "admin".to_string(),
        username: "admin".to_string(),
        email: "admin@localhost.localdomain".to_string(),
        name: "Administrator".to_string(),
        password: password.clone(),
        role: ProviderRole::Admin,
    };

    provider_service.register(request).await?;

    info!("===========================================");
    info!("Initial admin account created!");
    info!("Username: admin");

    if from_env {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}
