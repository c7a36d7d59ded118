pub mod app_config;
pub mod config;
pub mod criteria;
pub mod vehicle;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{FilterCriteria, FilterUpdate, KNOWN_BRANDS};
pub use vehicle::{format_mileage, Vehicle};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
