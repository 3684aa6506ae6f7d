//! Asset repository trait

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::Asset;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for asset persistence, keyed by UUID
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Get an asset by UUID
    async fn get(&self, uuid: Uuid) -> Result<Option<Asset>, DomainError>;

    /// Insert or update an asset
    async fn save(&self, asset: Asset) -> Result<Asset, DomainError>;

    /// List all assets, oldest first
    async fn list(&self) -> Result<Vec<Asset>, DomainError>;

    /// Count stored assets
    async fn count(&self) -> Result<usize, DomainError>;

    /// Delete an asset
    async fn delete(&self, uuid: Uuid) -> Result<bool, DomainError>;
}
