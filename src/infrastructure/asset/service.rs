//! Asset service - ingestion of external JSON payloads and history events

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::asset::{convert, Asset, AssetEvent, AssetRepository};
use crate::domain::validation::ValidationPattern;
use crate::domain::DomainError;

/// Request for appending a history event to an asset
#[derive(Debug, Clone)]
pub struct AddEventRequest {
    pub summary: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub business_provider_id: String,
}

/// Service over asset storage
#[derive(Debug)]
pub struct AssetService<R: AssetRepository> {
    repository: Arc<R>,
}

impl<R: AssetRepository> AssetService<R> {
    /// Create a new asset service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Ingest a raw JSON payload as a new asset
    ///
    /// The payload is parsed by the converter and then validated at this
    /// input boundary: the serial number must match LETTERS_AND_NUMBERS and
    /// the owner name, when present, LETTERS_WITH_SPACE. A payload whose
    /// UUID is already tracked is a conflict.
    pub async fn ingest(&self, json_text: &str) -> Result<Asset, DomainError> {
        let asset =
            convert(json_text).map_err(|e| DomainError::validation(e.to_string()))?;

        debug!(uuid = %asset.uuid(), "Ingesting asset");

        if !ValidationPattern::LettersAndNumbers.is_match(asset.serial_number()) {
            return Err(DomainError::validation(format!(
                "Serial number '{}' does not match {}",
                asset.serial_number(),
                ValidationPattern::LettersAndNumbers
            )));
        }

        if let Some(owner_name) = asset.owner_name() {
            if !ValidationPattern::LettersWithSpace.is_match(owner_name) {
                return Err(DomainError::validation(format!(
                    "Owner name '{}' does not match {}",
                    owner_name,
                    ValidationPattern::LettersWithSpace
                )));
            }
        }

        if self.repository.get(asset.uuid()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Asset '{}' already exists",
                asset.uuid()
            )));
        }

        self.repository.save(asset).await
    }

    /// Get an asset by UUID
    pub async fn get(&self, uuid: Uuid) -> Result<Option<Asset>, DomainError> {
        self.repository.get(uuid).await
    }

    /// List all assets
    pub async fn list(&self) -> Result<Vec<Asset>, DomainError> {
        self.repository.list().await
    }

    /// Count stored assets
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Append a history event to an existing asset
    pub async fn add_event(
        &self,
        uuid: Uuid,
        request: AddEventRequest,
    ) -> Result<Asset, DomainError> {
        if request.summary.trim().is_empty() {
            return Err(DomainError::validation("Event summary cannot be empty"));
        }

        let mut asset = self
            .repository
            .get(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Asset '{}' not found", uuid)))?;

        asset.add_event(AssetEvent::new(
            request.summary,
            request.description,
            request.date,
            request.business_provider_id,
        ));

        self.repository.save(asset).await
    }

    /// Delete an asset
    pub async fn delete(&self, uuid: Uuid) -> Result<bool, DomainError> {
        self.repository.delete(uuid).await
    }
}
