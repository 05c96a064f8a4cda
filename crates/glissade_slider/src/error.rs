//! Slider error types

use thiserror::Error;

/// Slider-related errors
#[derive(Error, Debug)]
pub enum SliderError {
    /// An option value is outside its accepted range
    #[error("Invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Option key as written in configuration
        name: &'static str,
        /// What is wrong with the value
        reason: String,
    },

    /// A measured cell size is negative or not finite
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(String),

    /// Options could not be parsed
    #[error("Failed to parse options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for slider operations
pub type Result<T> = std::result::Result<T, SliderError>;
