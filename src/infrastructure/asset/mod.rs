//! Asset infrastructure
//!
//! Repository implementations and the ingestion service for tracked assets.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresAssetRepository;
pub use repository::InMemoryAssetRepository;
pub use service::{AddEventRequest, AssetService};
