// Batch analysis: every log under an input tree is analyzed into a mirrored output tree.
// e.g. logs/run1/result-1.csv -> plots/run1/result-1/*.json

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use crate::config::{AppConfig, OutputConfig};
use crate::export;
use crate::record_repo;
use crate::report::{self, Report};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub failed: usize,
}

/// Load, analyze and export one log file.
pub fn analyze_file(
    csv: &Path,
    out_dir: &Path,
    window_secs: f64,
    output: &OutputConfig,
) -> anyhow::Result<Report> {
    let set = record_repo::load_csv(csv)?;
    let report =
        report::analyze(set, window_secs).with_context(|| format!("analyze {}", csv.display()))?;
    export::write_report(&report, out_dir, output)?;
    Ok(report)
}

/// Files under `root` with the given extension, sorted by path.
pub fn discover_logs(root: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(root.is_dir(), "{} is not a directory", root.display());
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let matches = path.extension().is_some_and(|e| e == OsStr::new(extension));
        if entry.file_type().is_file() && matches {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// `output_root` + path of `file` relative to `input_root`, extension dropped.
pub fn output_dir_for(input_root: &Path, file: &Path, output_root: &Path) -> PathBuf {
    let rel = file.strip_prefix(input_root).unwrap_or(file);
    output_root.join(rel.with_extension(""))
}

/// Analyze every log under `input` on the blocking pool, at most
/// `batch.max_concurrency` at a time. Failures are logged and counted, not fatal.
#[instrument(
    skip_all,
    fields(input = %input.display(), output = %output.display(), window_secs = window_secs)
)]
pub async fn run(
    input: &Path,
    output: &Path,
    window_secs: f64,
    config: &AppConfig,
) -> anyhow::Result<BatchSummary> {
    let files = discover_logs(input, &config.batch.extension)?;
    info!(files = files.len(), "batch started");

    let permits = Arc::new(Semaphore::new(config.batch.max_concurrency));
    let mut tasks = JoinSet::new();
    for file in files {
        let permit = permits.clone().acquire_owned().await?;
        let out_dir = output_dir_for(input, &file, output);
        let output_cfg = config.output.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let result = analyze_file(&file, &out_dir, window_secs, &output_cfg);
            (file, result)
        });
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((file, Ok(report))) => {
                summary.analyzed += 1;
                info!(
                    file = %file.display(),
                    charts = report.charts.len(),
                    "log analyzed"
                );
            }
            Ok((file, Err(e))) => {
                summary.failed += 1;
                warn!(file = %file.display(), error = %format!("{e:#}"), "log analysis failed");
            }
            Err(e) => {
                summary.failed += 1;
                warn!(error = %e, "analysis task panicked");
            }
        }
    }

    info!(
        analyzed = summary.analyzed,
        failed = summary.failed,
        "batch complete"
    );
    Ok(summary)
}
