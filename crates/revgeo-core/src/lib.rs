//! Shared domain types and configuration for the location-resolution pipeline.

pub mod app_config;
pub mod config;
pub mod location;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Address, Coordinates, LocationRecord, Slot, DEFAULT_SUMMARY};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinates ({lat}, {lng}): {reason}")]
    InvalidCoordinates { lat: f64, lng: f64, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
