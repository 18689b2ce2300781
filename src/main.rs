//! RAX Sandbox - Entry Point
//!
//! An interactive shell for file operations confined to one sandbox directory.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;

use rax_sandbox::shell::run_session;
use rax_sandbox::{FileStore, SandboxConfig};

#[derive(Debug, Parser)]
#[command(name = "rax-sandbox", about = "File operations confined to a sandbox directory")]
struct Args {
    /// Path to sandbox directory (overrides configuration)
    #[arg(long)]
    sandbox_path: Option<String>,

    /// Configuration file (defaults to ./sandbox.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let args = Args::parse();

    let config = match SandboxConfig::load(args.config.as_deref(), args.sandbox_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match FileStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("Error setting up sandbox: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Sandbox ready at {} (allowed: {})",
        store.root().path().display(),
        store.allowed_extensions().display_list()
    );

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = run_session(Arc::new(store), stdin, tokio::io::stdout()).await {
        error!("Shell terminated: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
