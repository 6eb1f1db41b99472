// Windowed aggregation: partition event records into fixed-width windows anchored at the
// run's start timestamp, then derive one (x, y) series per statistic.
// Pure and synchronous; loading and exporting happen in the caller.

pub mod discovery;
mod error;
mod heat;

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{DerivedSeries, EventRecord, Window, fields};
use crate::units::UnitFamily;

pub use discovery::SeriesTarget;
pub use error::{AggregateError, AggregateResult};
pub use heat::HeatMap;

/// Upper bound on windows per run.
pub const MAX_WINDOWS: usize = 10_000_000;

/// Window layout for one run. All values in seconds; `start_time` and `end_time` are epoch
/// timestamps, window bounds are relative to `start_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub start_time: f64,
    pub end_time: f64,
    pub bucket_width: f64,
}

impl WindowConfig {
    pub fn new(start_time: f64, end_time: f64, bucket_width: f64) -> Self {
        Self {
            start_time,
            end_time,
            bucket_width,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// `ceil(duration / width)`; rejects empty, inverted and non-finite ranges, and widths so
    /// small the count exceeds [`MAX_WINDOWS`].
    pub fn window_count(&self) -> AggregateResult<usize> {
        let valid = self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.bucket_width.is_finite()
            && self.bucket_width > 0.0
            && self.end_time > self.start_time;
        if !valid {
            return Err(AggregateError::InvalidRange {
                start: self.start_time,
                end: self.end_time,
                width: self.bucket_width,
            });
        }
        let count = (self.duration() / self.bucket_width).ceil();
        if !(count <= MAX_WINDOWS as f64) {
            return Err(AggregateError::TooManyWindows {
                count,
                max: MAX_WINDOWS,
            });
        }
        Ok(count as usize)
    }
}

/// Records bucketed into contiguous windows. Immutable once built; every query allocates a
/// fresh series with exactly one point per window.
#[derive(Debug, Clone)]
pub struct WindowedAggregator {
    config: WindowConfig,
    windows: Vec<Window>,
}

impl WindowedAggregator {
    pub fn new<I>(config: WindowConfig, records: I) -> AggregateResult<Self>
    where
        I: IntoIterator<Item = EventRecord>,
    {
        let count = config.window_count()?;
        let width = config.bucket_width;
        let windows = (0..count)
            .map(|i| Window::new(i as f64 * width, (i + 1) as f64 * width))
            .collect();
        let mut agg = Self { config, windows };

        let (mut assigned, mut skipped) = (0usize, 0usize);
        for record in records {
            if agg.assign(record) {
                assigned += 1;
            } else {
                skipped += 1;
            }
        }
        debug!(
            windows = count,
            width_secs = width,
            assigned,
            skipped,
            "records bucketed"
        );
        Ok(agg)
    }

    /// Appends the record to its window. Returns false when the record has no usable
    /// timestamp or falls outside `[0, duration)`.
    fn assign(&mut self, record: EventRecord) -> bool {
        let Some(ts) = record.timestamp() else {
            return false;
        };
        let Some(idx) = self.index_of(ts - self.config.start_time) else {
            return false;
        };
        self.windows[idx].push(record);
        true
    }

    /// Window containing `elapsed`. The division gives the candidate; neighbours are checked
    /// so the `min <= t < max` test on the stored bounds is what decides.
    pub fn index_of(&self, elapsed: f64) -> Option<usize> {
        if !(elapsed >= 0.0 && elapsed < self.config.duration()) {
            return None;
        }
        let last = self.windows.len().checked_sub(1)?;
        let guess = ((elapsed / self.config.bucket_width).floor() as usize).min(last);
        [guess.checked_sub(1), Some(guess), Some(guess + 1)]
            .into_iter()
            .flatten()
            .find(|&i| self.windows.get(i).is_some_and(|w| w.contains(elapsed)))
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn start_time(&self) -> f64 {
        self.config.start_time
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Total records held across all windows.
    pub fn record_count(&self) -> usize {
        self.windows.iter().map(Window::len).sum()
    }

    /// Every field name seen in any bucketed record, sorted.
    pub fn columns(&self) -> BTreeSet<&str> {
        self.windows
            .iter()
            .flat_map(|w| w.records())
            .flat_map(|r| r.field_names())
            .collect()
    }

    pub fn midpoints(&self) -> Vec<f64> {
        self.windows.iter().map(Window::midpoint).collect()
    }

    /// One point per window: `(midpoint, stat(window))`.
    pub fn derive<F>(&self, mut stat: F) -> DerivedSeries
    where
        F: FnMut(&Window) -> f64,
    {
        let mut out = DerivedSeries::with_capacity(self.windows.len());
        for w in &self.windows {
            out.push(w.midpoint(), stat(w));
        }
        out
    }

    /// Records per window (the requests-per-window reference series).
    pub fn requests(&self) -> DerivedSeries {
        self.derive(|w| w.len() as f64)
    }

    /// Mean of a latency-like field over successful (status 200) records. Records without a
    /// parsable value are left out of the mean.
    pub fn latency(&self, field: &str) -> DerivedSeries {
        self.derive(|w| {
            let values: Vec<f64> = w
                .records()
                .iter()
                .filter(|r| r.is_success())
                .filter_map(|r| r.get_f64(field))
                .collect();
            mean_f64(&values)
        })
    }

    /// `(successful, failed)` counts per window; a record without a status code is failed.
    pub fn status_split(&self) -> (DerivedSeries, DerivedSeries) {
        let ok = self.derive(|w| w.records().iter().filter(|r| r.is_success()).count() as f64);
        let failed =
            self.derive(|w| w.records().iter().filter(|r| !r.is_success()).count() as f64);
        (ok, failed)
    }

    /// Mean of a numeric field over all records, truncated to an integer.
    pub fn truncated_average(&self, field: &str) -> DerivedSeries {
        self.derive(|w| {
            let values: Vec<f64> = w.records().iter().filter_map(|r| r.get_f64(field)).collect();
            mean_f64(&values).trunc()
        })
    }

    /// Running pod replicas per window.
    pub fn replicas(&self) -> DerivedSeries {
        self.truncated_average(fields::REPLICAS)
    }

    /// Mean of a suffixed quantity field, parsed with the family's suffix table. Values that
    /// fail to parse count towards neither sum nor count.
    pub fn unit_average(&self, field: &str, unit: UnitFamily) -> DerivedSeries {
        self.derive(|w| {
            let values: Vec<f64> = w
                .records()
                .iter()
                .filter_map(|r| r.get(field))
                .filter_map(|raw| unit.parse(raw))
                .collect();
            mean_f64(&values)
        })
    }

    pub fn target_average(&self, target: &SeriesTarget) -> DerivedSeries {
        self.unit_average(&target.field, target.unit)
    }

    pub fn invocation_rate(&self) -> DerivedSeries {
        self.unit_average(fields::FUNCTION_INVOCATION_RATE, UnitFamily::Rate)
    }
}

fn mean_f64(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_helpers_zero_fill() {
        assert_eq!(mean_f64(&[]), 0.0);
        assert_eq!(mean_f64(&[1.0, 2.0]), 1.5);
    }

    #[test]
    fn index_of_respects_float_bounds() {
        let agg = WindowedAggregator::new(WindowConfig::new(0.0, 1.0, 0.1), Vec::new()).unwrap();
        for (i, w) in agg.windows().iter().enumerate() {
            assert_eq!(agg.index_of(w.min()), Some(i));
        }
        assert_eq!(agg.index_of(1.0), None);
        assert_eq!(agg.index_of(-0.0001), None);
    }
}
