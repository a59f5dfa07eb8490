//! icowatch CLI - export SVG files to multi-size ICO as they change

use anyhow::Result;
use clap::Parser;
use iconwatch_core::{JobScheduler, SchedulerConfig};
use iconwatch_render::IcoConverter;
use iconwatch_watcher::{ExtensionFilter, WatchPipeline, WatchTarget};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod console;
mod prompt;

use console::ConsoleReporter;

/// icowatch - watch a directory and export every SVG to a multi-size ICO
#[derive(Parser)]
#[command(name = "icowatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to watch (asked for interactively when omitted)
    dir: Option<PathBuf>,

    /// Quiet period after the last change before exporting, in milliseconds
    #[arg(long, default_value = "500")]
    debounce_ms: u64,

    /// Wait between attempts while a file is locked, in milliseconds
    #[arg(long, default_value = "300")]
    retry_delay_ms: u64,

    /// Export attempts per change before giving up on a locked file
    #[arg(long, default_value = "5")]
    max_attempts: u32,

    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::default()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_retry_delay(Duration::from_millis(self.retry_delay_ms))
            .with_max_attempts(self.max_attempts)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => prompt::ask_directory()?,
    };
    let target = WatchTarget::validate(&dir)?;

    let console = Arc::new(ConsoleReporter::new());
    let scheduler = Arc::new(JobScheduler::new(
        Arc::new(IcoConverter::new()),
        console.clone(),
        cli.scheduler_config(),
    ));

    let pipeline = WatchPipeline::start(
        &target,
        ExtensionFilter::default(),
        scheduler,
        console.clone(),
    )?;

    pipeline.run_until(interrupted()).await;
    console.stopped();

    Ok(())
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
