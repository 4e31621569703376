use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use roadmap_core::roadmap::Roadmap;
use services::{AppServices, Clock, ProgressService, TransferService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

/// The dataset shipped with the binary; `--data` swaps in another file.
const BUILTIN_DATASET: &str = include_str!("../assets/roadmap.json");

const DEFAULT_DB: &str = "roadmap.sqlite3";

#[derive(Debug)]
enum CliError {
    MissingValue(&'static str),
    Unexpected(String),
    EmptyDbUrl,
    MissingImportFile,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingValue(flag) => write!(f, "{flag} requires a value"),
            CliError::Unexpected(arg) => write!(f, "unexpected argument: {arg}"),
            CliError::EmptyDbUrl => write!(f, "--db requires a non-empty value"),
            CliError::MissingImportFile => write!(f, "import requires a file path"),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Export,
    Import,
}

struct Cli {
    command: Command,
    db_url: String,
    data_path: Option<PathBuf>,
    out_path: Option<PathBuf>,
    import_path: Option<PathBuf>,
}

impl Cli {
    fn parse(mut argv: Vec<String>) -> Result<Self, CliError> {
        let command = match argv.first().map(String::as_str) {
            Some("ui") => {
                argv.remove(0);
                Command::Ui
            }
            Some("export") => {
                argv.remove(0);
                Command::Export
            }
            Some("import") => {
                argv.remove(0);
                Command::Import
            }
            Some(other) if !other.starts_with('-') => {
                return Err(CliError::Unexpected(other.to_string()));
            }
            // Bare flags (or nothing) launch the UI.
            _ => Command::Ui,
        };

        let mut cli = Self {
            command,
            db_url: std::env::var("ROADMAP_DB_URL")
                .unwrap_or_else(|_| DEFAULT_DB.to_string()),
            data_path: std::env::var_os("ROADMAP_DATA").map(PathBuf::from),
            out_path: None,
            import_path: None,
        };

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = args.next().ok_or(CliError::MissingValue("--db"))?;
                    if value.trim().is_empty() {
                        return Err(CliError::EmptyDbUrl);
                    }
                    cli.db_url = value;
                }
                "--data" => {
                    let value = args.next().ok_or(CliError::MissingValue("--data"))?;
                    cli.data_path = Some(PathBuf::from(value));
                }
                "--out" if command == Command::Export => {
                    let value = args.next().ok_or(CliError::MissingValue("--out"))?;
                    cli.out_path = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if command == Command::Import
                    && !arg.starts_with('-')
                    && cli.import_path.is_none() =>
                {
                    cli.import_path = Some(PathBuf::from(arg));
                }
                _ => return Err(CliError::Unexpected(arg)),
            }
        }

        if command == Command::Import && cli.import_path.is_none() {
            return Err(CliError::MissingImportFile);
        }

        Ok(cli)
    }

    /// Full sqlite URL, with bare file paths made absolute.
    fn sqlite_url(&self) -> String {
        let raw = self.db_url.as_str();
        if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
            return raw.to_string();
        }
        let path = Path::new(raw.strip_prefix("sqlite:").unwrap_or(raw));
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(path)
        };
        format!("sqlite://{}", absolute.display())
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  roadmap [ui]    [--db <sqlite_url>] [--data <roadmap.json>]");
    eprintln!("  roadmap export  [--out <file>] [--db ...] [--data ...]");
    eprintln!("  roadmap import <file> [--db ...] [--data ...]");
    eprintln!();
    eprintln!("Defaults: --db {DEFAULT_DB}, --data built-in math roadmap.");
    eprintln!("Environment: ROADMAP_DB_URL, ROADMAP_DATA, RUST_LOG.");
}

/// sqlx will not create the database file itself; make sure it exists.
fn ensure_db_file(url: &str) -> std::io::Result<()> {
    let Some(path) = url
        .strip_prefix("sqlite://")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
    else {
        return Ok(());
    };
    if path.is_empty() {
        return Ok(());
    }
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

struct DesktopApp {
    roadmap: Arc<Roadmap>,
    progress: Arc<ProgressService>,
    transfer: Arc<TransferService>,
}

impl UiApp for DesktopApp {
    fn roadmap(&self) -> Arc<Roadmap> {
        Arc::clone(&self.roadmap)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn transfer(&self) -> Arc<TransferService> {
        Arc::clone(&self.transfer)
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse(std::env::args().skip(1).collect()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let dataset = match &cli.data_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUILTIN_DATASET.to_string(),
    };

    // Storage setup stays in the binary glue so core/services remain pure.
    let db_url = cli.sqlite_url();
    if db_url != "sqlite::memory:" {
        ensure_db_file(&db_url)?;
    }
    let services = AppServices::new_sqlite(&db_url, Clock::system(), &dataset).await?;

    match cli.command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                roadmap: services.roadmap(),
                progress: services.progress(),
                transfer: services.transfer(),
            });
            let context = build_app_context(&app);

            let window = WindowBuilder::new()
                .with_title("Roadmap")
                .with_always_on_top(false);
            LaunchBuilder::desktop()
                .with_cfg(DesktopConfig::new().with_window(window))
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Export => {
            let done = services.progress().load().await;
            let document = services.transfer().export(&done)?;
            let out = cli
                .out_path
                .unwrap_or_else(|| PathBuf::from(services.transfer().export_file_name()));
            std::fs::write(&out, document)?;
            println!("exported {} topics to {}", done.len(), out.display());
            Ok(())
        }
        Command::Import => {
            let Some(path) = cli.import_path else {
                return Err(CliError::MissingImportFile.into());
            };
            let text = std::fs::read_to_string(&path)?;
            let ids = services.transfer().parse(&text)?;
            let applied = services.progress().replace(ids).await;
            if !applied.update.persisted {
                return Err("import parsed but could not be saved".into());
            }
            println!(
                "imported {} topics ({} unknown dropped)",
                applied.imported, applied.dropped
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
