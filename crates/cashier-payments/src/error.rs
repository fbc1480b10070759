use cashier_config::{OperationKind, SourcePath};

/// Faults raised by payment operations
///
/// These signal a programming or deployment mistake rather than a
/// processor-side failure, so they are returned as errors instead of being
/// folded into a user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// No usable secret key for the active mode
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operation input is missing or malformed
    #[error("validation error: {0}")]
    Validation(String),

    /// A declared result field could not be read from the response
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// A registered result field did not resolve on a successful response
///
/// Indicates that the configured field map does not match the shape of the
/// processor's responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot map `{local}` for {kind}: `{path}` is not present on the response")]
pub struct MappingError {
    /// Operation kind being projected
    pub kind: OperationKind,
    /// Local field name that failed
    pub local: String,
    /// Path that did not resolve
    pub path: SourcePath,
}

/// Result type of payment operations
pub type Result<T> = std::result::Result<T, PaymentError>;
