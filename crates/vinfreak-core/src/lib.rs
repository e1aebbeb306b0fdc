pub mod app_config;
pub mod config;
pub mod filters;
pub mod page;
pub mod paging;
pub mod vehicle;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{FilterState, SortOrder};
pub use page::NormalizedPage;
pub use paging::{PagingRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use vehicle::{Vehicle, VehicleId};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort order: {0}")]
    InvalidSort(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
