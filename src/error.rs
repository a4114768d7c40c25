//! Error types for platform resolution

use thiserror::Error;

/// Result type for platform resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while resolving or normalizing image platforms
#[derive(Error, Debug)]
pub enum Error {
    /// The image reference could not be parsed
    #[error("Invalid image reference '{reference}': {reason}")]
    Reference { reference: String, reason: String },

    /// Transport, auth or registry-side failure
    #[error("Failed to fetch '{reference}': {reason}")]
    Fetch { reference: String, reason: String },

    /// The fetch was cancelled before the registry answered
    #[error("Fetch of '{0}' was cancelled")]
    Cancelled(String),

    /// Manifest bytes don't decode as the claimed media type
    #[error("Malformed manifest for '{reference}': {reason}")]
    ManifestParse { reference: String, reason: String },

    /// Image configuration object is malformed
    #[error("Malformed image configuration for '{reference}': {reason}")]
    ConfigParse { reference: String, reason: String },

    #[error("This is not a valid architecture: '{0}'")]
    UnknownArchitecture(String),

    #[error("This is not a valid operating system: '{0}'")]
    UnknownOs(String),

    /// A platform string is not of the form os/arch[/variant]
    #[error("Invalid platform '{0}': expected os/arch[/variant]")]
    InvalidPlatform(String),

    /// A pull secret could not be decoded
    #[error("Invalid registry credentials: {0}")]
    InvalidCredentials(String),
}

impl Error {
    pub(crate) fn reference(reference: &str, reason: impl ToString) -> Self {
        Self::Reference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn fetch(reference: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            reference: reference.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn manifest_parse(reference: &str, reason: impl ToString) -> Self {
        Self::ManifestParse {
            reference: reference.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn config_parse(reference: &str, reason: impl ToString) -> Self {
        Self::ConfigParse {
            reference: reference.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error came from talking to the registry
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Cancelled(_))
    }

    /// Whether this error is a vocabulary mismatch rather than a registry problem
    pub fn is_normalization(&self) -> bool {
        matches!(self, Self::UnknownArchitecture(_) | Self::UnknownOs(_))
    }
}
