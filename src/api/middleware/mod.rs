//! API middleware components

pub mod metrics;
pub mod provider_auth;
pub mod security;

pub use metrics::metrics_middleware;
pub use provider_auth::{extract_bearer_token, RequireAdmin, RequireProvider};
pub use security::security_headers_middleware;
