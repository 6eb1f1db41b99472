// Fixed-width time window: [min, max) in seconds elapsed since the run's start timestamp.

use super::EventRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    min: f64,
    max: f64,
    records: Vec<EventRecord>,
}

impl Window {
    pub(crate) fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            records: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Midpoint; the x value of every derived series.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, elapsed: f64) -> bool {
        elapsed >= self.min && elapsed < self.max
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
