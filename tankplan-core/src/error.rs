use thiserror::Error;

/// Failures at the loading and building boundary. Evaluation itself never fails; every
/// compatibility problem is reported as data in `CompatibilityResult`.
#[derive(Debug, Error)]
pub enum TankPlanError {
    #[error("Organism '{0}' not found in catalog")]
    OrganismNotFound(String),

    #[error("Quantity for '{0}' must be a non-negative whole number, got {1}")]
    InvalidQuantity(String, i64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
