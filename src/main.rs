use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use content_export::cli::{
    handle_attributes_command, handle_config_command, handle_run_command, handle_types_command,
    ConfigCommands, RunArgs,
};
use content_export::config::{ExportPaths, Settings};
use content_export::services::JsonDumpSource;

#[derive(Parser)]
#[command(
    name = "content-export",
    author = "Kaylee Beyene",
    version,
    about = "Export repository content as CSV tables or nested JSON/YAML trees",
    long_about = "content-export reads every item of one content type below a site root \
                  and writes it either as a fully quoted delimiter-separated table or as \
                  a tree rebuilt from the items' paths."
)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List exportable content types
    Types {
        /// Repository dump to read from
        #[arg(short, long, env = "CONTENT_EXPORT_SOURCE")]
        source: PathBuf,
    },

    /// List the attributes of a content type
    Attributes {
        /// Content type name
        content_type: String,
        /// Repository dump to read from
        #[arg(short, long, env = "CONTENT_EXPORT_SOURCE")]
        source: PathBuf,
        /// Include hidden attributes
        #[arg(long)]
        all: bool,
    },

    /// Export one content type to a file
    Run(RunArgs),

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    // Initialize paths and settings
    let paths = ExportPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Types { source }) => {
            let source = JsonDumpSource::open(&source)?;
            handle_types_command(&source)?;
        }
        Some(Commands::Attributes {
            content_type,
            source,
            all,
        }) => {
            let source = JsonDumpSource::open(&source)?;
            handle_attributes_command(&source, &content_type, all)?;
        }
        Some(Commands::Run(args)) => {
            if let Err(failure) = handle_run_command(&paths, &settings, args) {
                debug!(kind = ?failure.error.kind(), "export failed");
                eprintln!("{}", failure);
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
        None => {
            println!("content-export - repository content as CSV tables or trees");
            println!();
            println!("Run 'content-export --help' for usage information.");
        }
    }

    Ok(ExitCode::SUCCESS)
}
