// Chart artifacts: one JSON document per chart, named after the chart.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, instrument};

use crate::config::OutputConfig;
use crate::models::Chart;
use crate::report::Report;

/// Writes every chart of `report` into `dir` as `<slug>.json`. Returns the written paths in
/// chart order.
#[instrument(skip(report, opts), fields(dir = %dir.display(), charts = report.charts.len()))]
pub fn write_report(
    report: &Report,
    dir: &Path,
    opts: &OutputConfig,
) -> anyhow::Result<Vec<PathBuf>> {
    prepare_dir(dir, opts.clean)?;
    let mut written = Vec::with_capacity(report.charts.len());
    for chart in &report.charts {
        written.push(write_chart(chart, dir, opts.pretty)?);
    }
    info!(files = written.len(), "charts exported");
    Ok(written)
}

pub fn write_chart(chart: &Chart, dir: &Path, pretty: bool) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!("{}.json", chart.slug()));
    let body = if pretty {
        serde_json::to_vec_pretty(chart)
    } else {
        serde_json::to_vec(chart)
    }
    .with_context(|| format!("serialize chart {:?}", chart.name))?;
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "chart written");
    Ok(path)
}

/// Create `dir`; with `clean`, an existing directory is removed first.
fn prepare_dir(dir: &Path, clean: bool) -> anyhow::Result<()> {
    if clean && dir.is_dir() {
        std::fs::remove_dir_all(dir).with_context(|| format!("remove {}", dir.display()))?;
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(())
}
