//! PostgreSQL asset repository implementation
//!
//! Expects an `assets` table keyed by `uuid`, with the event history stored
//! as a JSONB column.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::asset::{Asset, AssetEvent, AssetRepository, AssetType};
use crate::domain::DomainError;

/// PostgreSQL implementation of AssetRepository
#[derive(Debug, Clone)]
pub struct PostgresAssetRepository {
    pool: PgPool,
}

impl PostgresAssetRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "uuid, serial_number, asset_type, owner_name, description, events, created_at";

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn get(&self, uuid: Uuid) -> Result<Option<Asset>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM assets WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get asset: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_asset(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, asset: Asset) -> Result<Asset, DomainError> {
        let events = serde_json::to_value(asset.events())
            .map_err(|e| DomainError::internal(format!("Failed to encode events: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO assets
                (uuid, serial_number, asset_type, owner_name, description, events, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (uuid) DO UPDATE SET
                serial_number = EXCLUDED.serial_number,
                asset_type = EXCLUDED.asset_type,
                owner_name = EXCLUDED.owner_name,
                description = EXCLUDED.description,
                events = EXCLUDED.events
            "#,
        )
        .bind(asset.uuid())
        .bind(asset.serial_number())
        .bind(asset.asset_type().to_string())
        .bind(asset.owner_name())
        .bind(asset.description())
        .bind(events)
        .bind(asset.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to save asset: {}", e)))?;

        Ok(asset)
    }

    async fn list(&self) -> Result<Vec<Asset>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM assets ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list assets: {}", e)))?;

        let mut assets = Vec::with_capacity(rows.len());

        for row in rows {
            assets.push(row_to_asset(&row)?);
        }

        Ok(assets)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count assets: {}", e)))?;

        Ok(count as usize)
    }

    async fn delete(&self, uuid: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM assets WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete asset: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_asset(row: &sqlx::postgres::PgRow) -> Result<Asset, DomainError> {
    let uuid: Uuid = row.get("uuid");
    let serial_number: String = row.get("serial_number");
    let asset_type: String = row.get("asset_type");
    let owner_name: Option<String> = row.get("owner_name");
    let description: Option<String> = row.get("description");
    let events: serde_json::Value = row.get("events");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let asset_type = parse_asset_type(&asset_type)?;

    let events: Vec<AssetEvent> = serde_json::from_value(events)
        .map_err(|e| DomainError::storage(format!("Invalid event history in database: {}", e)))?;

    Ok(Asset::restore(
        uuid,
        serial_number,
        asset_type,
        owner_name,
        description,
        events,
        created_at,
    ))
}

fn parse_asset_type(s: &str) -> Result<AssetType, DomainError> {
    match s {
        "VEHICLE" => Ok(AssetType::Vehicle),
        "REAL_ESTATE" => Ok(AssetType::RealEstate),
        other => Err(DomainError::storage(format!(
            "Unknown asset type in database: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asset_type() {
        assert_eq!(parse_asset_type("VEHICLE").unwrap(), AssetType::Vehicle);
        assert_eq!(
            parse_asset_type("REAL_ESTATE").unwrap(),
            AssetType::RealEstate
        );
        assert!(parse_asset_type("SPACESHIP").is_err());
    }

    #[test]
    fn test_asset_type_round_trip() {
        for asset_type in [AssetType::Vehicle, AssetType::RealEstate] {
            assert_eq!(
                parse_asset_type(&asset_type.to_string()).unwrap(),
                asset_type
            );
        }
    }
}
