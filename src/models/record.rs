// Event records: one row of benchmark telemetry (request log or sampled kube metric row).

use std::collections::HashMap;

/// Field names written by the load generator and the metrics scraper.
pub mod fields {
    pub const REQUEST_TIME: &str = "requestTime";
    pub const STATUS_CODE: &str = "statusCode";
    pub const EXECUTION_LATENCY: &str = "executionLatency";
    pub const REQUEST_RESPONSE_LATENCY: &str = "requestResponseLatency";
    pub const SCHEDULING_LATENCY: &str = "schedulingLatency";
    pub const EXECUTION_START_TIME: &str = "executionStartTime";
    pub const EXECUTION_END_TIME: &str = "executionEndTime";
    pub const HOST_ID: &str = "hostId";
    pub const CONTAINER_ID: &str = "containerId";
    pub const REQUEST_ID: &str = "requestId";
    pub const REPLICAS: &str = "replicas";
    pub const FUNCTION_INVOCATION_RATE: &str = "functionInvocationRate";
}

pub const STATUS_OK: u16 = 200;

/// Immutable field -> raw value mapping. Empty cells are never stored, so every accessor
/// returning `None` means "absent or unparsable".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    fields: HashMap<String, String>,
}

impl EventRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        let fields = fields
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self { fields }
    }

    /// Build from `(name, value)` pairs (tests, loaders with a header row).
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Raw string value, trimmed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|v| v.trim())
    }

    /// Value parsed as a finite float.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field)?
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Integer value; accepts float-formatted integers ("200.0") as written by some exporters.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        let raw = self.get(field)?;
        if let Ok(v) = raw.parse::<i64>() {
            return Some(v);
        }
        let v = raw.parse::<f64>().ok()?;
        (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Request start, epoch seconds.
    pub fn timestamp(&self) -> Option<f64> {
        self.get_f64(fields::REQUEST_TIME)
    }

    pub fn status_code(&self) -> Option<u16> {
        self.get_i64(fields::STATUS_CODE)
            .and_then(|v| u16::try_from(v).ok())
    }

    pub fn is_success(&self) -> bool {
        self.status_code() == Some(STATUS_OK)
    }

    /// `[executionStartTime, executionEndTime]`, epoch seconds. `None` if either end is missing.
    pub fn execution_interval(&self) -> Option<(f64, f64)> {
        let start = self.get_f64(fields::EXECUTION_START_TIME)?;
        let end = self.get_f64(fields::EXECUTION_END_TIME)?;
        Some((start, end))
    }

    pub fn host_id(&self) -> Option<&str> {
        self.get(fields::HOST_ID)
    }

    pub fn container_id(&self) -> Option<&str> {
        self.get(fields::CONTAINER_ID)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.get(fields::REQUEST_ID)
    }

    pub fn replicas(&self) -> Option<f64> {
        self.get_f64(fields::REPLICAS)
    }
}
