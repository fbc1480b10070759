//! Collapsing processor failures into user-safe messages

use std::fmt;

use cashier_core::ProcessorError;
use serde::Serialize;

/// Log target for processor diagnostics
pub const LOG_TARGET: &str = "cashier::processor";

/// Message returned when the processor rejects the secret key
pub const AUTH_ERROR_MESSAGE: &str = "Payment processor API key error.";

/// Message returned when the processor is failing or unreachable
pub const PROCESSOR_ERROR_MESSAGE: &str = "Payment processor error, try again later.";

/// Message returned for failures that fit no other category
pub const UNKNOWN_ERROR_MESSAGE: &str = "There was an error, try again later.";

/// Stable category of a failed payment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Card declined or failed a check
    Card,
    /// Processor rejected the request
    InvalidRequest,
    /// Secret key rejected
    Auth,
    /// Processor failing or unreachable
    Processor,
    /// Anything else
    Unknown,
}

/// User-safe description of a failed payment operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentFailure {
    /// Failure category
    pub category: FailureCategory,
    /// Message safe to show to the paying user
    pub message: String,
}

impl fmt::Display for PaymentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Classify a processor failure, logging its original detail
///
/// Card and invalid-request failures carry a message written for end users,
/// so it is passed through. Every other family is replaced by a fixed
/// message; only the log keeps the processor's detail.
pub fn classify(processor: &str, error: &ProcessorError) -> PaymentFailure {
    match error {
        ProcessorError::Card {
            error_type,
            code,
            message,
        } => {
            let code = code.as_deref().unwrap_or_default();
            tracing::error!(
                target: LOG_TARGET,
                error_type = %error_type,
                code = %code,
                "{processor}: {error_type}: {code}: {message}"
            );

            PaymentFailure {
                category: FailureCategory::Card,
                message: message.clone(),
            }
        }
        ProcessorError::InvalidRequest {
            error_type,
            message,
            param,
        } => {
            tracing::error!(
                target: LOG_TARGET,
                error_type = %error_type,
                param = param.as_deref(),
                "{processor}: {error_type}: {message}"
            );

            PaymentFailure {
                category: FailureCategory::InvalidRequest,
                message: message.clone(),
            }
        }
        ProcessorError::Authentication { message } => {
            tracing::error!(target: LOG_TARGET, detail = %message, "{processor}: API key rejected!");

            PaymentFailure {
                category: FailureCategory::Auth,
                message: AUTH_ERROR_MESSAGE.to_owned(),
            }
        }
        ProcessorError::Service { status, message } => {
            tracing::error!(
                target: LOG_TARGET,
                status = *status,
                detail = %message,
                "{processor}: processor error, it could be down."
            );

            PaymentFailure {
                category: FailureCategory::Processor,
                message: PROCESSOR_ERROR_MESSAGE.to_owned(),
            }
        }
        ProcessorError::Unknown(detail) => {
            tracing::error!(target: LOG_TARGET, detail = %detail, "{processor}: unknown error.");

            PaymentFailure {
                category: FailureCategory::Unknown,
                message: UNKNOWN_ERROR_MESSAGE.to_owned(),
            }
        }
    }
}
