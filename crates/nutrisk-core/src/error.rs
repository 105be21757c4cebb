use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NutriskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("label analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("could not reach {service}: {reason}")]
    ServiceUnavailable { service: String, reason: String },

    #[error("{service} returned status {status}: {message}")]
    ServiceError {
        service: String,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {service}: {reason}")]
    ResponseParse { service: String, reason: String },

    #[error("failed to load health profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid health profile: {0}")]
    ProfileInvalid(String),

    #[error("failed to load scanned food from {path}: {reason}")]
    FoodLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
