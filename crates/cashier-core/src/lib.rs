//! Shared seam between the payment facade and processor clients
//!
//! Defines the [`Processor`] capability and the [`ProcessorError`] families
//! a processor call may fail with.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod processor;

pub use error::ProcessorError;
pub use processor::{NewCharge, NewCustomer, Processor, RawResponse, Result};
