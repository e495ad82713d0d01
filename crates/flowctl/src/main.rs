//! flowctl - inspect, store and dry-run flows from the command line

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;

use flow_client::{ClientConfig, ClientError, ConfigError, FlowStore, HttpFlowStore, Session};
use flow_graph::{validate_document, FlowDocument, ValidationError};
use flow_nodes::{builtin_registry, builtin_sockets, ComponentKind};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding config.json
    #[arg(long, env = "FLOWVIEW_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Session token sent as a bearer credential
    #[arg(long, env = "FLOWVIEW_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored flows
    List,
    /// Print a stored flow
    Get {
        name: String,
        /// Revision to fetch (latest when omitted)
        #[arg(long)]
        rev: Option<i64>,
    },
    /// Print a flow's revision summary
    Meta { name: String },
    /// Validate and store a flow document as a new revision
    Save {
        name: String,
        /// Flow document (JSON)
        flow: PathBuf,
        /// Sample payload saved with the flow (JSON)
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Mark a revision as active
    Activate { name: String, rev: i64 },
    /// Dry-run a flow document against a payload
    Test {
        flow: PathBuf,
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Print the component palette
    Nodes,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Graph(#[from] flow_graph::FlowGraphError),
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Flow is invalid ({} problems)", .0.len())]
    Invalid(Vec<ValidationError>),
    #[error("Flow not found: {0}")]
    NotFound(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Invalid(errors)) => {
            for error in &errors {
                log::error!("{}", error);
            }
            log::error!("Flow is invalid ({} problems)", errors.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Nodes = cli.command {
        print_palette();
        return Ok(());
    }

    let store = connect(cli.config_dir.as_deref(), cli.token.as_deref()).await?;

    match cli.command {
        Command::List => {
            for meta in store.list().await? {
                println!(
                    "{}\tlatest {}\tactive {}",
                    meta.name, meta.latest_rev, meta.active_rev
                );
            }
        }
        Command::Get { name, rev } => {
            let record = match rev {
                Some(rev) => store.get_by_name_and_revision(&name, rev).await?,
                None => store.get_by_name(&name).await?,
            }
            .ok_or_else(|| CliError::NotFound(name.clone()))?;
            print_json(&serde_json::to_value(&record).map_err(ClientError::from)?);
        }
        Command::Meta { name } => {
            let meta = store
                .get_meta_by_name(&name)
                .await?
                .ok_or_else(|| CliError::NotFound(name.clone()))?;
            print_json(&serde_json::to_value(&meta).map_err(ClientError::from)?);
        }
        Command::Save { name, flow, payload } => {
            let document = read_checked_document(&flow)?;
            let payload = read_payload(payload.as_deref())?;
            let saved = store.save(&name, &payload, &document).await?;
            println!("{} rev {}", name, saved.rev);
        }
        Command::Activate { name, rev } => {
            store.set_active(&name, rev).await?;
            println!("{} active rev {}", name, rev);
        }
        Command::Test { flow, payload } => {
            let document = read_checked_document(&flow)?;
            let payload = read_payload(payload.as_deref())?;
            let result = store.test(&payload, &document).await?;
            print_json(&serde_json::to_value(&result).map_err(ClientError::from)?);
        }
        Command::Nodes => {}
    }
    Ok(())
}

async fn connect(config_dir: Option<&Path>, token: Option<&str>) -> Result<HttpFlowStore, CliError> {
    let config = match config_dir {
        Some(dir) => ClientConfig::load(dir).await?,
        None => ClientConfig::default(),
    }
    .with_overrides(|key| std::env::var(key).ok())?;
    log::debug!("Using flow store at {}", config.api_url);

    let session = Arc::new(Session::new(config.refresh_window_ms));
    if let Some(token) = token {
        session.login(token)?;
    }
    Ok(HttpFlowStore::new(config, session)?)
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_payload(path: Option<&Path>) -> Result<Value, CliError> {
    match path {
        Some(path) => read_json(path),
        None => Ok(Value::Object(Default::default())),
    }
}

/// Read a flow document and check it against the built-in components
fn read_checked_document(path: &Path) -> Result<FlowDocument, CliError> {
    let document = FlowDocument::from_value(read_json(path)?)?;
    let errors = validate_document(&document, &builtin_registry(), &builtin_sockets());
    if !errors.is_empty() {
        return Err(CliError::Invalid(errors));
    }
    Ok(document)
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("Failed to format output: {}", e),
    }
}

fn print_palette() {
    for kind in ComponentKind::all() {
        let meta = kind.metadata();
        let ports = |ports: &[flow_graph::PortMetadata]| {
            ports
                .iter()
                .map(|p| format!("{}:{}", p.id, p.socket))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<16} {:<10} in [{}] out [{}]",
            meta.name,
            format!("{:?}", meta.category),
            ports(&meta.inputs),
            ports(&meta.outputs)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["flowctl", "get", "orders", "--rev", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Get { ref name, rev: Some(3) } if name == "orders"));

        let cli = Cli::try_parse_from(["flowctl", "activate", "orders", "2"]).unwrap();
        assert!(matches!(cli.command, Command::Activate { rev: 2, .. }));

        assert!(Cli::try_parse_from(["flowctl", "activate", "orders"]).is_err());
    }

    #[test]
    fn test_checked_document_rejects_bad_flow() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"id": "flows@1.0.0", "nodes": {{"1": {{"id": 1, "name": "Teleport"}}}}}}"#
        )
        .unwrap();
        let err = read_checked_document(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Invalid(ref errors) if errors.len() == 2));
    }

    #[test]
    fn test_missing_payload_is_empty_object() {
        assert_eq!(read_payload(None).unwrap(), serde_json::json!({}));
    }
}
