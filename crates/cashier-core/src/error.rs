/// Failure reported by a payment processor
///
/// Each variant is one error family of the processor's API. The facade
/// collapses these into user-safe messages; the fields here carry the
/// original detail so it can be logged before it is discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessorError {
    /// The card was declined or failed a check
    #[error("card error ({error_type}): {message}")]
    Card {
        /// Processor error type (e.g. `card_error`)
        error_type: String,
        /// Machine-readable decline code, if any
        code: Option<String>,
        /// Human-readable message from the processor
        message: String,
    },

    /// The request was rejected as malformed or referenced a missing object
    #[error("invalid request ({error_type}): {message}")]
    InvalidRequest {
        /// Processor error type (e.g. `invalid_request_error`)
        error_type: String,
        /// Human-readable message from the processor
        message: String,
        /// Offending parameter, if reported
        param: Option<String>,
    },

    /// The secret key was rejected
    #[error("authentication failed: {message}")]
    Authentication {
        /// Processor-supplied detail
        message: String,
    },

    /// The processor failed or could not be reached
    #[error("processor unavailable: {message}")]
    Service {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Processor-supplied or transport detail
        message: String,
    },

    /// Anything the processor client could not place in another family
    #[error("unexpected processor failure: {0}")]
    Unknown(String),
}

impl ProcessorError {
    /// Short name of the error family, used in log fields
    pub const fn family(&self) -> &'static str {
        match self {
            Self::Card { .. } => "card",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Authentication { .. } => "authentication",
            Self::Service { .. } => "service",
            Self::Unknown(_) => "unknown",
        }
    }
}
