use clap::Parser;
use std::fs;
use tempfile::TempDir;
use treestore::config::TreeStoreConfig;
use treestore::tooling::cli::{Cli, CliContext, Commands};
use treestore::{ApiError, StoreError};

const RECORDS: &str = r#"[
    {"id": 2, "parent": 1, "type": "test"},
    {"id": 1, "parent": "root"},
    {"id": 3, "parent": 2, "type": null}
]"#;

fn context_with_input(temp: &TempDir) -> CliContext {
    let input = temp.path().join("records.json");
    fs::write(&input, RECORDS).unwrap();
    let mut config = TreeStoreConfig::default();
    config.output.pretty = false;
    let mut ctx = CliContext::with_config(config);
    ctx.load_input(&input).unwrap();
    ctx
}

#[test]
fn parses_command_line() {
    let cli = Cli::try_parse_from([
        "treestore",
        "--input",
        "records.json",
        "--format",
        "text",
        "ancestors",
        "7",
    ])
    .unwrap();
    assert_eq!(cli.format.as_deref(), Some("text"));
    assert!(matches!(cli.command, Commands::Ancestors { ref id } if id == "7"));
}

#[test]
fn queries_loaded_file() {
    let temp = TempDir::new().unwrap();
    let ctx = context_with_input(&temp);

    assert_eq!(
        ctx.execute(&Commands::Ancestors { id: "3".to_string() }).unwrap(),
        r#"[{"id":2,"parent":1,"type":"test"},{"id":1,"parent":"root"}]"#
    );
    assert_eq!(
        ctx.execute(&Commands::Descendants { id: "1".to_string() }).unwrap(),
        r#"[{"id":2,"parent":1,"type":"test"},{"id":3,"parent":2,"type":null}]"#
    );
    assert_eq!(
        ctx.execute(&Commands::Item { id: "3".to_string() }).unwrap(),
        r#"{"id":3,"parent":2,"type":null}"#
    );
    assert_eq!(
        ctx.execute(&Commands::Roots).unwrap(),
        r#"[{"id":1,"parent":"root"}]"#
    );
}

#[test]
fn missing_input_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let mut ctx = CliContext::with_config(TreeStoreConfig::default());
    let err = ctx.load_input(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[test]
fn broken_input_surfaces_store_error() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("records.json");
    fs::write(&input, r#"[{"id": 2, "parent": 1}]"#).unwrap();
    let mut ctx = CliContext::with_config(TreeStoreConfig::default());
    let err = ctx.load_input(&input).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Store(StoreError::ParentNotFound { .. })
    ));
}

#[test]
fn config_file_changes_schema() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("treestore.toml");
    fs::write(
        &config_path,
        "[schema]\nparent_field = \"owner\"\n\n[output]\npretty = false\n",
    )
    .unwrap();
    let input = temp.path().join("records.json");
    fs::write(
        &input,
        r#"[{"id": "a", "owner": "root"}, {"id": "b", "owner": "a"}]"#,
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "treestore",
        "--config",
        config_path.to_str().unwrap(),
        "children",
        "a",
    ])
    .unwrap();
    let mut ctx = CliContext::from_cli(&cli).unwrap();
    ctx.load_input(&input).unwrap();
    assert_eq!(
        ctx.execute(&cli.command).unwrap(),
        r#"[{"id":"b","owner":"a"}]"#
    );
}

#[test]
fn log_file_flag_stays_out_of_config() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("treestore.toml");
    fs::write(&config_path, "[logging]\nfile = \"/from/config.log\"\n").unwrap();
    let log_path = temp.path().join("cli.log");

    let cli = Cli::try_parse_from([
        "treestore",
        "--config",
        config_path.to_str().unwrap(),
        "--log-file",
        log_path.to_str().unwrap(),
        "stats",
    ])
    .unwrap();
    let ctx = CliContext::from_cli(&cli).unwrap();
    assert_eq!(ctx.log_file(), Some(log_path.as_path()));
    assert_eq!(
        ctx.config().logging.file.as_deref(),
        Some(std::path::Path::new("/from/config.log"))
    );
}

#[test]
fn stats_on_long_chain() {
    let temp = TempDir::new().unwrap();
    let n = 50_000;
    let records: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            let parent = if i == 0 {
                serde_json::json!("root")
            } else {
                serde_json::json!(i - 1)
            };
            serde_json::json!({"id": i, "parent": parent})
        })
        .collect();
    let input = temp.path().join("chain.json");
    fs::write(&input, serde_json::to_string(&records).unwrap()).unwrap();

    let mut config = TreeStoreConfig::default();
    config.output.pretty = false;
    let mut ctx = CliContext::with_config(config);
    ctx.load_input(&input).unwrap();
    assert_eq!(
        ctx.execute(&Commands::Stats).unwrap(),
        format!(r#"{{"records":{},"roots":1,"max_depth":{}}}"#, n, n - 1)
    );
}
