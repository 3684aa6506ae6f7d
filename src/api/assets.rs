//! Asset endpoints - ingestion, lookup, and history events

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::{RequireAdmin, RequireProvider};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::asset::{Asset, AssetEvent};
use crate::infrastructure::asset::AddEventRequest;

/// Asset response in the external wire format
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub uuid: Uuid,
    pub serial_number: String,
    pub asset_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub events: Vec<AssetEventResponse>,
    pub created_at: String,
}

/// Asset event in the external wire format
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEventResponse {
    pub summary: String,
    pub description: String,
    pub date: String,
    pub business_provider_id: String,
}

impl From<&AssetEvent> for AssetEventResponse {
    fn from(event: &AssetEvent) -> Self {
        Self {
            summary: event.summary.clone(),
            description: event.description.clone(),
            date: event.date.to_rfc3339(),
            business_provider_id: event.business_provider_id.clone(),
        }
    }
}

impl From<&Asset> for AssetResponse {
    fn from(asset: &Asset) -> Self {
        Self {
            uuid: asset.uuid(),
            serial_number: asset.serial_number().to_string(),
            asset_type: asset.asset_type().to_string(),
            owner_name: asset.owner_name().map(String::from),
            description: asset.description().map(String::from),
            events: asset.events().iter().map(AssetEventResponse::from).collect(),
            created_at: asset.created_at().to_rfc3339(),
        }
    }
}

/// List assets response
#[derive(Debug, Clone, Serialize)]
pub struct ListAssetsResponse {
    pub assets: Vec<AssetResponse>,
    pub total: usize,
}

/// Request to append a history event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEventApiRequest {
    pub summary: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to now when omitted
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Deletion response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAssetResponse {
    pub deleted: bool,
}

/// POST /assets
///
/// The body is the raw JSON payload of the external asset record; it goes
/// through the converter and input validation before being stored.
pub async fn ingest_asset(
    State(state): State<AppState>,
    RequireProvider(principal): RequireProvider,
    body: String,
) -> Result<Json<AssetResponse>, ApiError> {
    debug!(username = %principal.username, "Ingesting asset payload");

    let asset = state
        .asset_service
        .ingest(&body)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AssetResponse::from(&asset)))
}

/// GET /assets
pub async fn list_assets(
    State(state): State<AppState>,
    RequireProvider(_): RequireProvider,
) -> Result<Json<ListAssetsResponse>, ApiError> {
    let assets = state.asset_service.list().await.map_err(ApiError::from)?;

    let responses: Vec<AssetResponse> = assets.iter().map(AssetResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListAssetsResponse {
        assets: responses,
        total,
    }))
}

/// GET /assets/{uuid}
pub async fn get_asset(
    State(state): State<AppState>,
    RequireProvider(_): RequireProvider,
    Path(uuid): Path<Uuid>,
) -> Result<Json<AssetResponse>, ApiError> {
    let asset = state
        .asset_service
        .get(uuid)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Asset '{}' not found", uuid)))?;

    Ok(Json(AssetResponse::from(&asset)))
}

/// POST /assets/{uuid}/events
///
/// Appends a history event recorded by the authenticated provider.
pub async fn add_asset_event(
    State(state): State<AppState>,
    RequireProvider(principal): RequireProvider,
    Path(uuid): Path<Uuid>,
    Json(request): Json<AddEventApiRequest>,
) -> Result<Json<AssetResponse>, ApiError> {
    debug!(uuid = %uuid, username = %principal.username, "Adding asset event");

    let service_request = AddEventRequest {
        summary: request.summary,
        description: request.description,
        date: request.date.unwrap_or_else(Utc::now),
        business_provider_id: principal.username,
    };

    let asset = state
        .asset_service
        .add_event(uuid, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AssetResponse::from(&asset)))
}

/// DELETE /assets/{uuid}
pub async fn delete_asset(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(uuid): Path<Uuid>,
) -> Result<Json<DeleteAssetResponse>, ApiError> {
    debug!(uuid = %uuid, "Admin deleting asset");

    let deleted = state
        .asset_service
        .delete(uuid)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!("Asset '{}' not found", uuid)));
    }

    Ok(Json(DeleteAssetResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::AssetType;

    #[test]
    fn test_asset_response_uses_wire_field_names() {
        let asset = Asset::new(
            Uuid::parse_str("9d40ee4e-bf1e-4f74-8237-c5e9b6e8f6d3").unwrap(),
            "3VW1W21KIBM312176",
            AssetType::Vehicle,
            Some("Jhonn Doe".to_string()),
            None,
        );

        let json = serde_json::to_string(&AssetResponse::from(&asset)).unwrap();

        assert!(json.contains("\"serialNumber\":\"3VW1W21KIBM312176\""));
        assert!(json.contains("\"assetType\":\"VEHICLE\""));
        assert!(json.contains("\"ownerName\":\"Jhonn Doe\""));
        assert!(!json.contains("description"));
    }

    #[test]
    fn test_add_event_request_defaults() {
        let json = r#"{"summary": "Oil change"}"#;

        let request: AddEventApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.summary, "Oil change");
        assert_eq!(request.description, "");
        assert!(request.date.is_none());
    }
}
