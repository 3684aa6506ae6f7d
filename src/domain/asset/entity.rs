//! Asset entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of tracked asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Vehicle,
    RealEstate,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vehicle => write!(f, "VEHICLE"),
            Self::RealEstate => write!(f, "REAL_ESTATE"),
        }
    }
}

/// History event recorded against an asset by a business provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEvent {
    /// Short summary of what happened
    pub summary: String,
    /// Free-text detail
    pub description: String,
    /// When the event took place
    pub date: DateTime<Utc>,
    /// Username of the provider that recorded the event
    pub business_provider_id: String,
}

impl AssetEvent {
    pub fn new(
        summary: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
        business_provider_id: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            date,
            business_provider_id: business_provider_id.into(),
        }
    }
}

/// Tracked physical asset, constructed from an external JSON payload
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    /// External identifier
    uuid: Uuid,
    /// Manufacturer or registry serial number
    serial_number: String,
    /// Kind of asset
    asset_type: AssetType,
    /// Current owner's name
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_name: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// History events, oldest first
    events: Vec<AssetEvent>,
    /// When this record was ingested
    created_at: DateTime<Utc>,
}

impl Asset {
    /// Create a new asset with an empty event history
    pub fn new(
        uuid: Uuid,
        serial_number: impl Into<String>,
        asset_type: AssetType,
        owner_name: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            uuid,
            serial_number: serial_number.into(),
            asset_type,
            owner_name,
            description,
            events: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Rebuild an asset from stored fields
    pub(crate) fn restore(
        uuid: Uuid,
        serial_number: String,
        asset_type: AssetType,
        owner_name: Option<String>,
        description: Option<String>,
        events: Vec<AssetEvent>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            uuid,
            serial_number,
            asset_type,
            owner_name,
            description,
            events,
            created_at,
        }
    }

    // Getters

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn events(&self) -> &[AssetEvent] {
        &self.events
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Append a history event
    pub fn add_event(&mut self, event: AssetEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_asset() -> Asset {
        Asset::new(
            Uuid::new_v4(),
            "3VW1W21KIBM312176",
            AssetType::Vehicle,
            Some("Jhonn Doe".to_string()),
            Some("2011 VW JETTA".to_string()),
        )
    }

    #[test]
    fn test_asset_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&AssetType::Vehicle).unwrap(),
            "\"VEHICLE\""
        );
        assert_eq!(
            serde_json::to_string(&AssetType::RealEstate).unwrap(),
            "\"REAL_ESTATE\""
        );

        let parsed: AssetType = serde_json::from_str("\"REAL_ESTATE\"").unwrap();
        assert_eq!(parsed, AssetType::RealEstate);
    }

    #[test]
    fn test_asset_creation() {
        let asset = create_test_asset();

        assert_eq!(asset.serial_number(), "3VW1W21KIBM312176");
        assert_eq!(asset.asset_type(), AssetType::Vehicle);
        assert_eq!(asset.owner_name(), Some("Jhonn Doe"));
        assert!(asset.events().is_empty());
    }

    #[test]
    fn test_asset_add_event() {
        let mut asset = create_test_asset();

        asset.add_event(AssetEvent::new(
            "Oil change",
            "Full synthetic, 5W-30",
            Utc::now(),
            "someUserName",
        ));

        assert_eq!(asset.events().len(), 1);
        assert_eq!(asset.events()[0].summary, "Oil change");
        assert_eq!(asset.events()[0].business_provider_id, "someUserName");
    }

    #[test]
    fn test_asset_serialization_skips_absent_optionals() {
        let asset = Asset::new(
            Uuid::new_v4(),
            "SN1",
            AssetType::Vehicle,
            None,
            None,
        );

        let json = serde_json::to_string(&asset).unwrap();
        assert!(!json.contains("owner_name"));
        assert!(!json.contains("description"));
    }
}
