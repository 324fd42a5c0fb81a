//! Configuration
//!
//! Layered configuration for the tooling layer: record schema, logging and
//! output formatting. Sources are merged by the `config` crate, see
//! [`merge::service::MergeService`] for precedence.

pub mod facade;
pub mod merge;
pub mod sources;
pub mod xdg;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::types::RecordSchema;
use serde::{Deserialize, Serialize};

fn default_output_format() -> String {
    "json".to_string()
}

fn default_true() -> bool {
    true
}

/// How query results are rendered by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: json, text (default: json)
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            pretty: default_true(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeStoreConfig {
    #[serde(default)]
    pub schema: RecordSchema,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}
