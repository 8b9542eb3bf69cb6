//! eplda CLI
//!
//! Command-line access to Premier League statistics

use clap::Parser;
use eplda::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let runner = match Runner::new(cli) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level
    let level: tracing::Level = runner.log_level().into();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
