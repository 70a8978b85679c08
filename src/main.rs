use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use clipfuse::{
    align::AlignStrategy,
    compose::ComposeEngine,
    config::Config,
    media::FfmpegTool,
    storage::LocalStorage,
};

#[derive(Parser)]
#[command(
    name = "clipfuse",
    version,
    about = "Align an audio track onto a video track and mux the result",
    long_about = "Clipfuse probes both inputs, computes a trim-or-loop alignment plan from the \
                  lead-in/lead-out offsets, applies it with ffmpeg, and can publish the combined \
                  file to a storage directory, printing a shareable link."
)]
struct Cli {
    /// Input video file
    #[arg(long)]
    video: PathBuf,

    /// Input audio file
    #[arg(long)]
    audio: PathBuf,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Seconds of video before the audio starts (lead-in); overrides the configured default
    #[arg(long)]
    start: Option<f64>,

    /// Seconds of video after the audio ends (lead-out); overrides the configured default
    #[arg(long)]
    end: Option<f64>,

    /// Alignment strategy (trim_window or loop_to_fit)
    #[arg(short, long)]
    strategy: Option<AlignStrategy>,

    /// Publish the output to this directory and print a shareable link
    #[arg(long)]
    publish_to: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting clipfuse v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if let Some(strategy) = cli.strategy {
        config.align.strategy = strategy;
    }
    config.validate()?;

    let offsets = config.align.offsets_with(cli.start, cli.end);
    let tool = FfmpegTool::new().await?;

    // Publish destination: flag wins over config
    let destination = cli.publish_to.or_else(|| {
        config
            .storage
            .publish
            .then(|| config.storage.destination.clone())
    });

    let report = match destination {
        Some(dir) => {
            let engine =
                ComposeEngine::new(config, tool).with_storage(LocalStorage::new(dir));
            engine.fuse(&cli.video, &cli.audio, &cli.output, offsets).await?
        }
        None => {
            let engine = ComposeEngine::new(config, tool);
            engine.fuse(&cli.video, &cli.audio, &cli.output, offsets).await?
        }
    };

    if let Some(link) = &report.link {
        println!("{}", link);
    }

    info!("Done! Output saved to: {:?}", report.output);
    Ok(())
}
