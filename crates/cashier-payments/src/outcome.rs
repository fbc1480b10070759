use serde::Serialize;

use crate::classify::PaymentFailure;

/// Completed record or user-safe failure of a payment operation
///
/// Exactly one of the two is produced per call. Processor failures always
/// end up here; faults that need a developer's attention are returned as
/// [`PaymentError`](crate::PaymentError) instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum PaymentOutcome<T> {
    /// The processor accepted the operation
    Completed(T),
    /// The processor refused or failed the operation
    Failed(PaymentFailure),
}

impl<T> PaymentOutcome<T> {
    /// Whether the operation completed
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Completed value, if any
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Failure, if any
    pub const fn failure(&self) -> Option<&PaymentFailure> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Convert into a standard `Result`
    ///
    /// # Errors
    ///
    /// Returns the failure when the operation did not complete
    pub fn into_result(self) -> Result<T, PaymentFailure> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Failed(failure) => Err(failure),
        }
    }

    /// Map the completed value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PaymentOutcome<U> {
        match self {
            Self::Completed(value) => PaymentOutcome::Completed(f(value)),
            Self::Failed(failure) => PaymentOutcome::Failed(failure),
        }
    }
}
