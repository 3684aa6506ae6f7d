//! PostgreSQL provider repository implementation
//!
//! Expects a `business_providers` table with a unique index on `username`;
//! that constraint is what guards concurrent saves against duplicate
//! usernames.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::provider::{
    BusinessProvider, BusinessProviderRepository, Credential, ProviderId, ProviderRole,
    ProviderStatus,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of BusinessProviderRepository
#[derive(Debug, Clone)]
pub struct PostgresProviderRepository {
    pool: PgPool,
}

impl PostgresProviderRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, username, email, name, password_hash, role, status, \
                              created_at, updated_at, last_login_at";

#[async_trait]
impl BusinessProviderRepository for PostgresProviderRepository {
    async fn get(&self, id: &ProviderId) -> Result<Option<BusinessProvider>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM business_providers WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get provider: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_provider(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<BusinessProvider>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM business_providers WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage(format!("Failed to get provider by username: {}", e))
        })?;

        match row {
            Some(row) => Ok(Some(row_to_provider(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, provider: BusinessProvider) -> Result<BusinessProvider, DomainError> {
        let password_hash = provider.password_hash().ok_or_else(|| {
            DomainError::internal(format!(
                "Refusing to persist unhashed credential for '{}'",
                provider.username()
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO business_providers
                (id, username, email, name, password_hash, role, status,
                 created_at, updated_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at,
                last_login_at = EXCLUDED.last_login_at
            "#,
        )
        .bind(provider.id().as_str())
        .bind(provider.username())
        .bind(provider.email())
        .bind(provider.name())
        .bind(password_hash)
        .bind(role_to_str(provider.role()))
        .bind(status_to_str(provider.status()))
        .bind(provider.created_at())
        .bind(provider.updated_at())
        .bind(provider.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Username '{}' already exists",
                    provider.username()
                ))
            } else {
                DomainError::storage(format!("Failed to save provider: {}", e))
            }
        })?;

        Ok(provider)
    }

    async fn delete(&self, id: &ProviderId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM business_providers WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete provider: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        status: Option<ProviderStatus>,
    ) -> Result<Vec<BusinessProvider>, DomainError> {
        let rows = match status {
            Some(s) => {
                sqlx::query(&format!(
                    "SELECT {SELECT_COLUMNS} FROM business_providers \
                     WHERE status = $1 ORDER BY created_at"
                ))
                .bind(status_to_str(s))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {SELECT_COLUMNS} FROM business_providers ORDER BY created_at"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list providers: {}", e)))?;

        let mut providers = Vec::with_capacity(rows.len());

        for row in rows {
            providers.push(row_to_provider(&row)?);
        }

        Ok(providers)
    }

    async fn count(&self, status: Option<ProviderStatus>) -> Result<usize, DomainError> {
        let count: i64 = match status {
            Some(s) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM business_providers WHERE status = $1")
                    .bind(status_to_str(s))
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM business_providers")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to count providers: {}", e)))?;

        Ok(count as usize)
    }

    async fn record_login(&self, id: &ProviderId) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE business_providers SET last_login_at = NOW() WHERE id = $1")
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to record login: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Provider '{}' not found",
                id.as_str()
            )));
        }

        Ok(())
    }
}

fn row_to_provider(row: &sqlx::postgres::PgRow) -> Result<BusinessProvider, DomainError> {
    let id: String = row.get("id");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let name: String = row.get("name");
    let password_hash: String = row.get("password_hash");
    let role: String = row.get("role");
    let status: String = row.get("status");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");
    let last_login_at: Option<chrono::DateTime<chrono::Utc>> = row.get("last_login_at");

    let provider_id = ProviderId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid provider ID in database: {}", e)))?;

    Ok(BusinessProvider::restore(
        provider_id,
        username,
        email,
        name,
        Credential::Hashed(password_hash),
        str_to_role(&role),
        str_to_status(&status),
        created_at,
        updated_at,
        last_login_at,
    ))
}

fn status_to_str(status: ProviderStatus) -> &'static str {
    match status {
        ProviderStatus::Active => "active",
        ProviderStatus::Suspended => "suspended",
    }
}

fn str_to_status(s: &str) -> ProviderStatus {
    match s {
        "suspended" => ProviderStatus::Suspended,
        _ => ProviderStatus::Active,
    }
}

fn role_to_str(role: ProviderRole) -> &'static str {
    match role {
        ProviderRole::Admin => "admin",
        ProviderRole::Provider => "provider",
    }
}

fn str_to_role(s: &str) -> ProviderRole {
    match s {
        "admin" => ProviderRole::Admin,
        _ => ProviderRole::Provider,
    }
}
