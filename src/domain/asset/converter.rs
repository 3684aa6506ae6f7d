//! JSON-to-asset converter
//!
//! Parses an external JSON payload (flat object, camelCase string keys) into
//! a typed [`Asset`]. Syntactically invalid JSON, a missing required field,
//! or an unknown asset type all surface as [`ConversionError::MalformedInput`];
//! `ownerName` and `description` are optional and absent values stay `None`.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::entity::{Asset, AssetType};

/// Failure to turn a JSON payload into an asset record
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Malformed asset payload: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

/// External wire shape of an asset payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AssetPayload {
    uuid: Uuid,
    serial_number: String,
    asset_type: AssetType,
    #[serde(default)]
    owner_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parse a JSON-encoded asset record into a typed [`Asset`]
///
/// Pure; the returned asset carries the payload values verbatim and an empty
/// event history.
pub fn convert(json_text: &str) -> Result<Asset, ConversionError> {
    let payload: AssetPayload = serde_json::from_str(json_text)?;

    Ok(Asset::new(
        payload.uuid,
        payload.serial_number,
        payload.asset_type,
        payload.owner_name,
        payload.description,
    ))
}
