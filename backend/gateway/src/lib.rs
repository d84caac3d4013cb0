//! UnivAegis Gateway HTTP API Server
//!
//! Document upload, eligibility checks and health reporting over JSON.

pub mod documents;
pub mod eligibility_api;
pub mod error;
pub mod health_api;
pub mod rate_limit;
pub mod server;
pub mod settings;
pub mod state;

pub use error::ApiError;
pub use server::{ServerError, build_router, serve};
pub use settings::{GatewaySettings, ocr_settings_from_config, policy_from_config};
pub use state::GatewayState;
