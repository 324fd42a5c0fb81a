//! Environment variable source: TREESTORE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `TREESTORE__SCHEMA__ID_FIELD=uid` sets `schema.id_field`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TREESTORE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
