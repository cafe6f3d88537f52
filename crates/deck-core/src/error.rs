use thiserror::Error;

/// Malformed input handed to the gesture adapter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("expected {expected} hand landmarks, found {found}")]
    LandmarkCount { expected: usize, found: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Why an image reference could not be resolved to a resource.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssetError {
    #[error("asset `{0}` not found")]
    NotFound(String),
    #[error("failed to read asset `{reference}`: {message}")]
    Io { reference: String, message: String },
    #[error("asset `{0}` is empty")]
    Empty(String),
}
