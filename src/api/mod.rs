//! HTTP API layer

pub mod assets;
pub mod auth;
pub mod health;
pub mod middleware;
pub mod providers;
pub mod router;
pub mod state;
pub mod types;

pub use router::{create_router, create_router_with_state};
