//! Config composition: default values and the merge service.

pub mod service;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the built-in defaults (lowest precedence).
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("schema.id_field", "id")?
        .set_default("schema.parent_field", "parent")?
        .set_default("schema.root_marker", "root")?
        .set_default("output.format", "json")?
        .set_default("output.pretty", true)
}
