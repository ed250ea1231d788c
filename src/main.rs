use clap::{Parser, Subcommand};
use ghpm::format_error_with_help;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "ghpm")]
#[command(about = "Install and track binaries published as GitHub release assets")]
#[command(version)]
struct Cli {
    /// Manifest file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download an asset of the latest release and record it
    Install {
        /// Repository as owner/repo
        target: String,
    },
    /// List recorded packages and newer upstream releases
    List {
        /// Accepted for compatibility; the whole manifest is always listed
        target: Option<String>,
    },
    /// Search for a package (currently does nothing)
    Search {
        /// Search term
        target: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install { target } => cli::install::run(target, cli.manifest).await,
        Commands::List { target } => cli::list::run(target, cli.manifest).await,
        Commands::Search { target } => cli::search::run(target),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
