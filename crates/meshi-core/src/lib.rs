pub mod app_config;
pub mod config;
pub mod masters;
pub mod places;
pub mod validation;

pub use app_config::{AppConfig, Environment, LogdockSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use masters::{GenreSeed, PriceRangeSeed, GENRE_MASTERS, PRICE_RANGE_MASTERS};
pub use places::{DuplicateCheckResult, NewPlace, PlacePostInput, PlaceSummary};
pub use validation::{
    image_extension, is_google_maps_url, is_google_maps_url_strict, validate_image_upload,
    ImageUpload, ValidationErrors,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
