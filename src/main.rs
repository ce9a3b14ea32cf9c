//! mp4trim
//!
//! A command-line tool that trims MP4 videos without re-encoding, using an
//! external ffmpeg stream copy.
//!
//! # Usage
//!
//! ```bash
//! mp4trim probe --input video.mp4
//! mp4trim trim --input video.mp4 --start 00:05 --end 10.5
//! cat video.mp4 | mp4trim trim --input - --start 5 --output clip.mp4
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use mp4trim::app::AppContainer;
use mp4trim::cli::{commands, Cli, Commands};
use mp4trim::config_initialization::initialize_configuration;
use mp4trim::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    init_logging(&config.logging)?;

    info!("Starting mp4trim v{}", env!("CARGO_PKG_VERSION"));

    let container = AppContainer::new(config);

    let code = match cli.command {
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(args, &container).await?
        }
        Commands::Trim(args) => {
            info!("Executing trim command");
            commands::trim(args, &container).await?
        }
    };

    Ok(code)
}
