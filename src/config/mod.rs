//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, HashingConfig, LogFormat, LoggingConfig, MetricsConfig, ServerConfig,
    StorageConfig,
};
