#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod client;
pub mod error;

pub use client::StripeClient;
pub use error::StripeError;
