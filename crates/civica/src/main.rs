//! Civica CLI binary.

use anyhow::Result;
use civica::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the civica CLI.
///
/// Uses tokio's current_thread runtime for simplicity and lower overhead.
/// This is appropriate for CLI applications with sequential I/O-bound
/// operations; media uploads still fan out concurrently on this runtime.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=civica=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("civica=info")),
        )
        .with_target(false)
        .init();

    tracing::debug!("Starting civica CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Civica CLI completed successfully");
    Ok(())
}
