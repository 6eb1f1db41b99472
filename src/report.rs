// One analysis run: bucket a record set and compute the full chart catalogue.

use anyhow::Context;
use tracing::{debug, info, instrument};

use crate::aggregator::{HeatMap, SeriesTarget, WindowedAggregator, discovery};
use crate::models::{Chart, NamedSeries, fields};
use crate::record_repo::RecordSet;
use crate::units::UnitFamily;

/// Chart (artifact) names, in output order.
pub mod names {
    pub const LATENCY: &str = "Latency Plots";
    pub const STATUS: &str = "Status Code";
    pub const CONTAINERS_PER_HOST: &str = "Containers Per Hosts";
    pub const REQUESTS_PER_CONTAINER: &str = "Requests Per Container";
    pub const REPLICAS: &str = "Pod Replicas";
    pub const INVOCATION_RATE: &str = "Function Invocation Rate";
    pub const MEMORY: &str = "Nodes Memory Usage";
    pub const CPU: &str = "Nodes CPU Usage";
}

const LATENCY_FIELDS: [&str; 3] = [
    fields::EXECUTION_LATENCY,
    fields::REQUEST_RESPONSE_LATENCY,
    fields::SCHEDULING_LATENCY,
];

#[derive(Debug, Clone)]
pub struct Report {
    pub start_time: f64,
    pub window_secs: f64,
    pub windows: usize,
    /// Records that landed in a window.
    pub records: usize,
    pub charts: Vec<Chart>,
}

impl Report {
    pub fn chart(&self, name: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.name == name)
    }
}

#[instrument(skip(set), fields(rows = set.len()))]
pub fn analyze(set: RecordSet, window_secs: f64) -> anyhow::Result<Report> {
    let window = set
        .window_config(window_secs)
        .context("no record has a parsable requestTime")?;
    let RecordSet { columns, records } = set;
    let agg = WindowedAggregator::new(window, records)?;
    let cols: Vec<&str> = columns.iter().map(String::as_str).collect();
    let has = |name: &str| cols.iter().any(|c| *c == name);

    let ctx = ChartContext::new(&agg);
    let mut charts = Vec::new();

    charts.push(ctx.chart(
        names::LATENCY,
        "Latency Plots",
        "Latency (in seconds)",
        LATENCY_FIELDS
            .iter()
            .map(|f| NamedSeries::new(*f, agg.latency(f)))
            .collect(),
    ));

    let (ok, failed) = agg.status_split();
    charts.push(ctx.chart(
        names::STATUS,
        "Successful and Failed Requests Plot",
        "Number of requests",
        vec![
            NamedSeries::new("Successful Requests", ok),
            NamedSeries::new("Failed Requests", failed),
        ],
    ));

    charts.extend(ctx.non_empty(
        names::CONTAINERS_PER_HOST,
        "Running containers per host heat plot",
        "Running containers",
        heat_series("host", agg.host_heat()),
    ));
    charts.extend(ctx.non_empty(
        names::REQUESTS_PER_CONTAINER,
        "Requests per container heat plot",
        "Requests per container",
        heat_series("container", agg.container_heat()),
    ));

    if has(fields::REPLICAS) {
        charts.push(ctx.chart(
            names::REPLICAS,
            "Kube Metric: running pod replicas per sec",
            "Replicas",
            vec![NamedSeries::new("Replicas", agg.replicas())],
        ));
    }

    if has(fields::FUNCTION_INVOCATION_RATE) {
        charts.push(ctx.chart(
            names::INVOCATION_RATE,
            "Function Invocation Rate",
            "Function invocation rate",
            vec![NamedSeries::new(
                "Function Invocation Rate (in secs)",
                agg.invocation_rate(),
            )],
        ));
    }

    charts.extend(ctx.non_empty(
        names::MEMORY,
        "Memory Usage per host-node",
        "Memory Usage (in MiB)",
        node_series(&agg, discovery::discover(cols.iter().copied(), UnitFamily::Memory)),
    ));
    charts.extend(ctx.non_empty(
        names::CPU,
        "CPU Usage per host-node",
        "CPU Usage (in cores)",
        node_series(&agg, discovery::discover(cols.iter().copied(), UnitFamily::Cpu)),
    ));

    let report = Report {
        start_time: agg.start_time(),
        window_secs,
        windows: agg.window_count(),
        records: agg.record_count(),
        charts,
    };
    info!(
        windows = report.windows,
        records = report.records,
        charts = report.charts.len(),
        "analysis complete"
    );
    Ok(report)
}

/// Shared per-run chart fields: axis label with the start time, companion request series.
struct ChartContext<'a> {
    agg: &'a WindowedAggregator,
    x_label: String,
}

impl<'a> ChartContext<'a> {
    fn new(agg: &'a WindowedAggregator) -> Self {
        Self {
            agg,
            x_label: format!(
                "Time in seconds (start-time: {})",
                format_start_time(agg.start_time())
            ),
        }
    }

    fn chart(&self, name: &str, title: &str, y_label: &str, series: Vec<NamedSeries>) -> Chart {
        debug!(chart = name, series = series.len(), "chart computed");
        Chart {
            name: name.to_string(),
            title: title.to_string(),
            x_label: self.x_label.clone(),
            y_label: y_label.to_string(),
            start_time: self.agg.start_time(),
            window_secs: self.agg.config().bucket_width,
            series,
            requests: self.agg.requests(),
        }
    }

    /// Like `chart`, but nothing to draw means no artifact.
    fn non_empty(
        &self,
        name: &str,
        title: &str,
        y_label: &str,
        series: Vec<NamedSeries>,
    ) -> Option<Chart> {
        if series.is_empty() {
            debug!(chart = name, "no series; chart skipped");
            return None;
        }
        Some(self.chart(name, title, y_label, series))
    }
}

fn heat_series(kind: &str, heat: HeatMap) -> Vec<NamedSeries> {
    heat.into_iter()
        .enumerate()
        .map(|(i, (id, series))| NamedSeries::new(format!("{kind}-{i}: {id}"), series))
        .collect()
}

fn node_series(agg: &WindowedAggregator, targets: Vec<SeriesTarget>) -> Vec<NamedSeries> {
    targets
        .iter()
        .map(|t| NamedSeries::new(node_label(t), agg.target_average(t)))
        .collect()
}

/// "n1CpuUsage" -> "n1"; the bare column name if stripping leaves nothing.
fn node_label(target: &SeriesTarget) -> String {
    target
        .unit
        .column_suffix()
        .and_then(|s| target.name.strip_suffix(s))
        .filter(|n| !n.is_empty())
        .unwrap_or(target.name.as_str())
        .to_string()
}

fn format_start_time(ts: f64) -> String {
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9) as u32;
    match chrono::DateTime::from_timestamp(secs as i64, nanos) {
        Some(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S%.6f")
            .to_string(),
        None => format!("{ts}"),
    }
}
