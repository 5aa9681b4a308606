pub mod app_config;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod field;
pub mod whisky;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, Catalog, CatalogEntry, CatalogFile, CatalogMatcher};
pub use chart::{
    datasets, find_whisky, max_average_price, region_color, regions, ChartKind, ChartPoint,
    Dataset, RangeFilter,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use field::FieldValue;
pub use whisky::{js_round, parse_price, MapPosition, Review, ReviewOutcome, Whisky};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),

    #[error("failed to compile catalog name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
