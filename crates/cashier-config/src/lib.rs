#![allow(clippy::must_use_candidate)]

mod env;
pub mod fields;
mod loader;
pub mod logging;
pub mod processor;

use serde::Deserialize;

pub use env::ExpandError;
pub use fields::{FieldMap, OperationKind, ResultSpec, SourcePath};
pub use logging::{LogFormat, LoggingConfig};
pub use processor::{CardAttachResult, Mode, ProcessorConfig};

/// Top-level cashier configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Processor credentials and defaults
    #[serde(default)]
    pub processor: ProcessorConfig,
    /// Result field maps keyed by operation kind
    #[serde(default)]
    pub fields: FieldMap,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}
