// Benchmark CSV logs -> in-memory record set.
// One header row; rows may be short (metric rows lack request columns and vice versa).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::{info, instrument, warn};

use crate::aggregator::WindowConfig;
use crate::models::EventRecord;

/// Loaded log: column catalogue in header order plus one record per row.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<EventRecord>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<EventRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Earliest and latest parsable request timestamps.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(EventRecord::timestamp)
            .fold(None, |span, t| match span {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }

    /// Windows anchored at the earliest request, running one second past the whole-second
    /// duration so the latest request is always inside.
    pub fn window_config(&self, bucket_width: f64) -> Option<WindowConfig> {
        let (first, last) = self.time_span()?;
        let end = first + (last - first).floor() + 1.0;
        Some(WindowConfig::new(first, end, bucket_width))
    }
}

#[instrument(fields(repo = "records", operation = "load_csv"))]
pub fn load_csv(path: &Path) -> anyhow::Result<RecordSet> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let set = read_csv(file).with_context(|| format!("read {}", path.display()))?;
    info!(
        rows = set.len(),
        columns = set.columns.len(),
        "loaded benchmark log"
    );
    Ok(set)
}

/// Parse CSV from any reader. Undecodable rows are skipped; I/O errors abort.
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<RecordSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()
        .context("csv header")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e).context("csv read"),
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping undecodable row");
                continue;
            }
        };
        records.push(EventRecord::from_pairs(
            columns.iter().map(String::as_str).zip(row.iter()),
        ));
    }

    Ok(RecordSet::new(columns, records))
}
