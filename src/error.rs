use thiserror::Error;

/// Errors raised by the filter, transform, reduction and classifier stages.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("invalid element type: {0}")]
    InvalidType(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("singular pooled covariance: {0}")]
    SingularCovariance(String),

    #[error("model has not been trained")]
    NotTrained,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] ::image::ImageError),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
