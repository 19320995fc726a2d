//! Domain-specific error types for signal-lab

use thiserror::Error;

/// Main error type for the analysis pipeline and its surrounding plumbing
#[derive(Error, Debug)]
pub enum SignalLabError {
    #[error("Insufficient data: parsed {parsed} message(s), at least {required} required")]
    InsufficientData { parsed: usize, required: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Text extraction error: {message}")]
    Extraction { message: String },
}

impl SignalLabError {
    /// True when the transcript was too short to analyze at all, as opposed to
    /// an analysis that ran and simply found nothing notable.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, SignalLabError::InsufficientData { .. })
    }
}

impl From<serde_json::Error> for SignalLabError {
    fn from(err: serde_json::Error) -> Self {
        SignalLabError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SignalLabError {
    fn from(err: toml::de::Error) -> Self {
        SignalLabError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

/// Result type alias for signal-lab operations
pub type Result<T> = std::result::Result<T, SignalLabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_is_distinguishable() {
        let err = SignalLabError::InsufficientData {
            parsed: 1,
            required: 2,
        };
        assert!(err.is_insufficient_data());
        assert!(err.to_string().contains("parsed 1 message(s)"));

        let other = SignalLabError::Validation {
            message: "stakes".into(),
        };
        assert!(!other.is_insufficient_data());
    }

    #[test]
    fn toml_errors_map_to_config() {
        let err: SignalLabError = toml::from_str::<toml::Value>("stakes = ")
            .unwrap_err()
            .into();
        assert!(matches!(err, SignalLabError::Config { .. }));
    }
}
