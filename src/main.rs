use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use faasbench::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser)]
#[command(
    name = "faasbench",
    about = "Windowed analysis of serverless autoscaling benchmark logs",
    version,
    propagate_version = true
)]
struct Cli {
    /// Window width in seconds (overrides analysis.window_secs)
    #[arg(short, long, global = true)]
    window: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one benchmark log into a directory of chart documents
    Analyze {
        /// CSV log written by the load generator
        csv: PathBuf,
        /// Output directory (replaced when output.clean is set)
        out_dir: PathBuf,
    },
    /// Analyze every log under a directory into a mirrored output tree
    Batch {
        input: PathBuf,
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let mut app_config = config::AppConfig::load()?;
    if let Some(window) = cli.window {
        app_config.analysis.window_secs = window;
        app_config.validate()?;
    }
    let window_secs = app_config.analysis.window_secs;
    tracing::info!(version = %version::banner(), window_secs, "starting");

    match cli.command {
        Commands::Analyze { csv, out_dir } => {
            let output = app_config.output.clone();
            let report = tokio::task::spawn_blocking(move || {
                batch::analyze_file(&csv, &out_dir, window_secs, &output)
            })
            .await??;
            tracing::info!(
                windows = report.windows,
                charts = report.charts.len(),
                "done"
            );
        }
        Commands::Batch { input, output } => {
            let summary = batch::run(&input, &output, window_secs, &app_config).await?;
            anyhow::ensure!(
                summary.failed == 0,
                "{} of {} logs failed",
                summary.failed,
                summary.failed + summary.analyzed
            );
        }
    }

    Ok(())
}
