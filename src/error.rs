//! Error types for metaclass construction

use thiserror::Error;

/// Main error type for metaclass construction
#[derive(Error, Debug)]
pub enum MetaError {
    /// The bases admit no consistent linearization
    #[error("Cannot create a consistent method resolution order (MRO) for bases {}", .bases.join(", "))]
    InconsistentHierarchy {
        /// Names of the bases passed to the linearization
        bases: Vec<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for metaclass construction
pub type Result<T> = std::result::Result<T, MetaError>;

impl MetaError {
    /// Create a new inconsistent hierarchy error
    #[must_use]
    pub fn inconsistent<I, S>(bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InconsistentHierarchy {
            bases: bases.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }

    /// Whether this error aborts class construction because of contradictory bases
    #[must_use]
    pub fn is_inconsistent_hierarchy(&self) -> bool {
        matches!(self, Self::InconsistentHierarchy { .. })
    }
}

impl From<serde_json::Error> for MetaError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for MetaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
