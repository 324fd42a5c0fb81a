//! CLI Tooling
//!
//! Command-line surface over [`TreeStore`]: load a JSON record list, run one
//! query, render the result as JSON or as a table.

use crate::config::{ConfigLoader, OutputConfig, TreeStoreConfig};
use crate::error::ApiError;
use crate::store::TreeStore;
use crate::types::{Identifier, Record, RecordSchema};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Treestore CLI - hierarchical queries over flat parent-linked records
#[derive(Parser, Debug)]
#[command(name = "treestore")]
#[command(about = "Hierarchical queries over flat parent-linked JSON records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file holding an array of records ("-" reads stdin)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(long)]
    pub format: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Every record, sorted by id
    All,
    /// Top-level records
    Roots,
    /// One record by id
    Item { id: String },
    /// Direct children of a record
    Children { id: String },
    /// All descendants of a record, sorted by id
    Descendants { id: String },
    /// Ancestors of a record, nearest first
    Ancestors { id: String },
    /// Direct parent of a record
    Parent { id: String },
    /// Record count, top-level count and maximum depth
    Stats,
    /// Print the effective configuration as TOML
    Config,
}

/// Store summary for the `stats` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub records: usize,
    pub roots: usize,
    pub max_depth: usize,
}

/// Loaded configuration plus, when an input was given, the built store.
pub struct CliContext {
    config: TreeStoreConfig,
    log_file: Option<PathBuf>,
    store: Option<TreeStore>,
}

impl CliContext {
    /// Create a context from parsed arguments, folding CLI flags into the config.
    pub fn from_cli(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(format) = &cli.format {
            config.output.format = format.clone();
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        let mut context = Self::with_config(config);
        context.log_file = cli.log_file.clone();
        Ok(context)
    }

    pub fn with_config(config: TreeStoreConfig) -> Self {
        Self {
            config,
            log_file: None,
            store: None,
        }
    }

    pub fn config(&self) -> &TreeStoreConfig {
        &self.config
    }

    /// `--log-file`, kept apart from the config so it outranks `TREESTORE_LOG_FILE`.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn store(&self) -> Option<&TreeStore> {
        self.store.as_ref()
    }

    /// Read and build the store from `input` ("-" for stdin).
    pub fn load_input(&mut self, input: &Path) -> Result<(), ApiError> {
        let schema = &self.config.schema;
        let store = if input.as_os_str() == "-" {
            debug!("Reading records from stdin");
            TreeStore::from_reader(std::io::stdin().lock(), schema)?
        } else {
            debug!(path = %input.display(), "Reading records");
            let file = File::open(input).map_err(|e| {
                ApiError::InvalidArgument(format!("Cannot open {}: {}", input.display(), e))
            })?;
            TreeStore::from_reader(BufReader::new(file), schema)?
        };
        info!(records = store.len(), "Loaded record store");
        self.store = Some(store);
        Ok(())
    }

    pub fn load_store(&mut self, store: TreeStore) {
        self.store = Some(store);
    }

    /// Execute a CLI command and return the rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let renderer = Renderer::new(&self.config.output, &self.config.schema)?;
        match command {
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::Serialization(e.to_string())),
            Commands::All => renderer.records(&self.require_store()?.get_all()),
            Commands::Roots => renderer.records(&self.require_store()?.root_children()),
            Commands::Item { id } => {
                let store = self.require_store()?;
                renderer.record(Some(store.get_item(&resolve_id(store, id))?))
            }
            Commands::Children { id } => {
                let store = self.require_store()?;
                renderer.records(&store.get_children(&resolve_id(store, id))?)
            }
            Commands::Descendants { id } => {
                let store = self.require_store()?;
                renderer.records(&store.get_all_children(&resolve_id(store, id))?)
            }
            Commands::Ancestors { id } => {
                let store = self.require_store()?;
                renderer.records(&store.get_all_parents(&resolve_id(store, id))?)
            }
            Commands::Parent { id } => {
                let store = self.require_store()?;
                renderer.record(store.get_parent(&resolve_id(store, id))?)
            }
            Commands::Stats => renderer.stats(&collect_stats(self.require_store()?)),
        }
    }

    fn require_store(&self) -> Result<&TreeStore, ApiError> {
        self.store.as_ref().ok_or_else(|| {
            ApiError::InvalidArgument("No input given; pass --input <file>".to_string())
        })
    }
}

/// Map command-line text to an identifier the store actually holds.
///
/// Text that parses as an integer resolves to the integer id when the store
/// has it; otherwise the string id is tried, then the integer again so the
/// not-found error names the number.
pub fn resolve_id(store: &TreeStore, raw: &str) -> Identifier {
    let as_str = Identifier::from(raw);
    match raw.parse::<i64>() {
        Ok(n) => {
            let as_int = Identifier::Int(n);
            if store.contains(&as_int) || !store.contains(&as_str) {
                as_int
            } else {
                as_str
            }
        }
        Err(_) => as_str,
    }
}

pub fn collect_stats(store: &TreeStore) -> StoreStats {
    StoreStats {
        records: store.len(),
        roots: store.root_children().len(),
        max_depth: store.max_depth(),
    }
}

enum Format {
    Json { pretty: bool },
    Text,
}

struct Renderer<'a> {
    format: Format,
    schema: &'a RecordSchema,
}

impl<'a> Renderer<'a> {
    fn new(output: &OutputConfig, schema: &'a RecordSchema) -> Result<Self, ApiError> {
        let format = match output.format.as_str() {
            "json" => Format::Json {
                pretty: output.pretty,
            },
            "text" => Format::Text,
            other => {
                return Err(ApiError::InvalidArgument(format!(
                    "Invalid output format: {} (must be 'json' or 'text')",
                    other
                )))
            }
        };
        Ok(Self { format, schema })
    }

    fn records(&self, records: &[&Record]) -> Result<String, ApiError> {
        match self.format {
            Format::Json { pretty } => to_json(&records, pretty),
            Format::Text => Ok(self.table(records)),
        }
    }

    fn record(&self, record: Option<&Record>) -> Result<String, ApiError> {
        match (&self.format, record) {
            (Format::Json { pretty }, _) => to_json(&record, *pretty),
            (Format::Text, Some(record)) => Ok(self.table(&[record])),
            (Format::Text, None) => Ok("(top-level item)".to_string()),
        }
    }

    fn stats(&self, stats: &StoreStats) -> Result<String, ApiError> {
        match self.format {
            Format::Json { pretty } => to_json(stats, pretty),
            Format::Text => {
                let mut table = Table::new();
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.set_header(vec!["Records", "Top-level", "Max depth"]);
                table.add_row(vec![
                    stats.records.to_string(),
                    stats.roots.to_string(),
                    stats.max_depth.to_string(),
                ]);
                Ok(table.to_string())
            }
        }
    }

    fn table(&self, records: &[&Record]) -> String {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["ID", "Parent", "Fields"]);
        for record in records {
            let extra: Map<String, Value> = record
                .fields()
                .iter()
                .filter(|(k, _)| **k != self.schema.id_field && **k != self.schema.parent_field)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let extra = if extra.is_empty() {
                String::new()
            } else {
                json!(extra).to_string()
            };
            table.add_row(vec![
                record.id().to_string(),
                record.parent().to_string(),
                extra,
            ]);
        }
        table.to_string()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, ApiError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| ApiError::Serialization(e.to_string()))
}
