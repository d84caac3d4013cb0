mod check_cmd;
mod extract_cmd;
mod serve_cmd;
mod settings;
mod status_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aegis")]
#[command(about = "UnivAegis: admissions document verification engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the verification HTTP server
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Config file (defaults to the config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Read one document and print the extracted fields as JSON
    Extract {
        file: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Decide eligibility from a grade and a language test score
    Check {
        /// Grade as text, e.g. "8.7" or "85%"
        #[arg(short, long)]
        grade: Option<String>,
        #[arg(short, long = "test-score")]
        test_score: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Query a running server's health endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, config } => {
            serve_cmd::run(config.as_deref(), host, port).await
        }
        Commands::Extract { file, config } => extract_cmd::run(config.as_deref(), &file).await,
        Commands::Check {
            grade,
            test_score,
            config,
        } => check_cmd::run(config.as_deref(), grade, test_score).await,
        Commands::Status { port } => status_cmd::run(port).await,
    }
}
