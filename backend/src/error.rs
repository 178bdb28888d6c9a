//! Error types for the visibility engine.
//!
//! Missing coordinates are not errors: they travel as `Option` and surface as
//! [`crate::models::Visibility::Unavailable`] or
//! [`crate::models::Separation::Undefined`]. The variants below cover input that
//! cannot be represented at all.

/// Result type for engine operations
pub type AstroResult<T> = Result<T, AstroError>;

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AstroError {
    /// Calendar input outside the supported Gregorian range.
    #[error("Unsupported date: {message}")]
    UnsupportedDate { message: String },

    /// Observer latitude/longitude/elevation out of range or not finite.
    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },

    /// Right ascension or declination out of range or not finite.
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Configuration file could not be read, parsed or validated.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AstroError {
    /// Create an unsupported date error.
    pub fn unsupported_date(message: impl Into<String>) -> Self {
        Self::UnsupportedDate {
            message: message.into(),
        }
    }

    /// Create an invalid location error.
    pub fn invalid_location(message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    /// Create an invalid coordinates error.
    pub fn invalid_coordinates(message: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Short machine-friendly name of the error kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedDate { .. } => "unsupported_date",
            Self::InvalidLocation { .. } => "invalid_location",
            Self::InvalidCoordinates { .. } => "invalid_coordinates",
            Self::Configuration { .. } => "configuration",
        }
    }
}
