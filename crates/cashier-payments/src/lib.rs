//! Payment operations over a processor client
//!
//! [`PaymentOperations`] validates inputs, calls a [`cashier_core::Processor`],
//! projects successful responses with a [`FieldMapper`], and collapses
//! failures into a [`PaymentFailure`] with a user-safe message.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod cards;
pub mod classify;
mod error;
pub mod mapper;
mod operations;
mod outcome;
pub mod request;

#[cfg(test)]
mod test_support;

pub use cards::CardRecord;
pub use classify::{FailureCategory, PaymentFailure, classify};
pub use error::{MappingError, PaymentError, Result};
pub use mapper::{FieldMapper, ProjectedResult};
pub use operations::PaymentOperations;
pub use outcome::PaymentOutcome;
pub use request::{AddCardRequest, Amount, ChargeRequest, CreateCustomerRequest, RefundRequest};
