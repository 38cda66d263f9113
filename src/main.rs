use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::future::join_all;
use seastatus::api::ApiClient;
use seastatus::config::Config;
use seastatus::status::{Status, StatusSlice, StatusState};
use seastatus::store::Store;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage sea-transport statuses over the REST API
#[derive(Parser, Debug)]
#[command(name = "seastatus", version = seastatus::VERSION, about, long_about = None)]
struct Args {
    /// Server root, e.g. http://localhost:8080/
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token for the API
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Format of the printed state
    #[arg(long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page of statuses
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Page size (defaults to the configured size)
        #[arg(long)]
        size: Option<u32>,
        /// Sort, e.g. `name,desc` (defaults to the configured sort)
        #[arg(long, conflicts_with = "unsorted")]
        sort: Option<String>,
        /// Plain list request without paging parameters
        #[arg(long)]
        unsorted: bool,
    },
    /// Fetch one status
    Get { id: i64 },
    /// Create a status
    Create {
        #[arg(long)]
        name: String,
        /// Extra field as key=value (value parsed as JSON when possible)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Replace a status
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Patch the given fields of a status
    Patch {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Delete one or more statuses concurrently
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Print the initial state
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected key=value, got {:?}", raw));
    };
    if key.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("seastatus started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("seastatus").join("seastatus.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".seastatus").join("seastatus.log");
    }
    PathBuf::from("seastatus.log")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = Config::load();
    let base_url = resolve_base_url(args.base_url.clone(), &config);
    let token = args.token.clone().or_else(|| config.token.clone());

    tracing::info!("Using API at {}", base_url);

    let client = ApiClient::new(&base_url, token)?;
    let slice = StatusSlice::new(client, Store::new());

    let state = run_command(&slice, args.command, &config).await?;
    println!("{}", render_state(&state, args.output)?);

    Ok(exit_code(&state))
}

/// Base URL precedence: CLI flag > SEASTATUS_BASE_URL > config file > default
fn resolve_base_url(flag: Option<String>, config: &Config) -> String {
    flag.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.effective_base_url())
}

/// Non-zero when the last request left an error in the snapshot
fn exit_code(state: &StatusState) -> ExitCode {
    if state.error_message.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn run_command(slice: &StatusSlice, command: Command, config: &Config) -> Result<StatusState> {
    match command {
        Command::List {
            page,
            size,
            sort,
            unsorted,
        } => {
            let size = size.unwrap_or_else(|| config.effective_page_size());
            let sort = if unsorted {
                None
            } else {
                Some(sort.unwrap_or_else(|| config.effective_sort()))
            };
            let snapshot = slice
                .get_entities(page, size, sort.as_deref())
                .await
                .context("List request task failed")?;
            match snapshot.state.total_items.count() {
                Some(total) => tracing::info!(
                    "Loaded {} of {} statuses",
                    snapshot.state.entities.len(),
                    total
                ),
                None => tracing::warn!("Server sent no usable x-total-count header"),
            }
        }
        Command::Get { id } => {
            slice
                .get_entity(id)
                .await
                .context("Get request task failed")?;
        }
        Command::Create { name, fields } => {
            let entity = build_status(None, Some(name), fields);
            match slice.create_entity(&entity).await {
                Ok(created) => tracing::info!("Created status {:?}", created.id),
                Err(e) => tracing::warn!("Create failed: {}", e),
            }
        }
        Command::Update { id, name, fields } => {
            let entity = build_status(Some(id), Some(name), fields);
            if let Err(e) = slice.update_entity(&entity).await {
                tracing::warn!("Update of {} failed: {}", id, e);
            }
        }
        Command::Patch { id, name, fields } => {
            let entity = build_status(Some(id), name, fields);
            if let Err(e) = slice.partial_update(&entity).await {
                tracing::warn!("Patch of {} failed: {}", id, e);
            }
        }
        Command::Delete { ids } => {
            let results = join_all(ids.iter().map(|id| slice.delete_entity(*id))).await;
            for (id, result) in ids.iter().zip(results) {
                if let Err(e) = result {
                    tracing::warn!("Delete of {} failed: {}", id, e);
                }
            }
        }
        Command::Reset => {
            slice.reset();
        }
    }

    Ok(slice.store().state().as_ref().clone())
}

fn build_status(id: Option<i64>, name: Option<String>, fields: Vec<(String, Value)>) -> Status {
    Status {
        id,
        name,
        extra: fields.into_iter().collect(),
    }
}

fn render_state(state: &StatusState, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(state)?,
        OutputFormat::Yaml => serde_yaml::to_string(state)?,
    };
    Ok(rendered)
}
