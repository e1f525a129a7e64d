pub mod app_config;
pub mod config;
pub mod status;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use status::{
    selection_priority, SelectionStatus, Verdict, SOURCING_STAGE, UNRANKED_PRIORITY,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
