//! In-memory asset repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::asset::{Asset, AssetRepository};
use crate::domain::DomainError;

/// In-memory implementation of AssetRepository
#[derive(Debug, Default)]
pub struct InMemoryAssetRepository {
    assets: Arc<RwLock<HashMap<Uuid, Asset>>>,
}

impl InMemoryAssetRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial assets
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        let map = assets.into_iter().map(|a| (a.uuid(), a)).collect();

        Self {
            assets: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn get(&self, uuid: Uuid) -> Result<Option<Asset>, DomainError> {
        let assets = self.assets.read().await;
        Ok(assets.get(&uuid).cloned())
    }

    async fn save(&self, asset: Asset) -> Result<Asset, DomainError> {
        let mut assets = self.assets.write().await;
        assets.insert(asset.uuid(), asset.clone());
        Ok(asset)
    }

    async fn list(&self) -> Result<Vec<Asset>, DomainError> {
        let assets = self.assets.read().await;

        let mut result: Vec<Asset> = assets.values().cloned().collect();
        result.sort_by_key(|a| a.created_at());

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let assets = self.assets.read().await;
        Ok(assets.len())
    }

    async fn delete(&self, uuid: Uuid) -> Result<bool, DomainError> {
        let mut assets = self.assets.write().await;
        Ok(assets.remove(&uuid).is_some())
    }
}
