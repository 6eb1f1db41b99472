// Kubernetes-style quantity parsing for the metric columns.
// Each family has its own suffix table and base unit; anything else fails to parse.

use serde::{Deserialize, Serialize};

/// Unit family of a suffixed numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Cores. `n` = nanocores, `u` = microcores, bare = cores.
    Cpu,
    /// MiB. `Ki` = KiB, `Mi` = MiB, bare = bytes.
    Memory,
    /// Seconds. `m` = milli, `n` = nano, bare = seconds.
    Rate,
}

impl UnitFamily {
    /// Column-name suffix for per-node families; `None` for single-column families.
    pub fn column_suffix(self) -> Option<&'static str> {
        match self {
            UnitFamily::Cpu => Some("CpuUsage"),
            UnitFamily::Memory => Some("MemoryUsage"),
            UnitFamily::Rate => None,
        }
    }

    pub fn parse(self, raw: &str) -> Option<f64> {
        match self {
            UnitFamily::Cpu => parse_cpu(raw),
            UnitFamily::Memory => parse_memory(raw),
            UnitFamily::Rate => parse_rate(raw),
        }
    }
}

pub fn parse_cpu(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Some(v) = raw.strip_suffix('n') {
        number(v).map(|v| v / 1e9)
    } else if let Some(v) = raw.strip_suffix('u') {
        number(v).map(|v| v / 1e6)
    } else {
        number(raw)
    }
}

pub fn parse_memory(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Some(v) = raw.strip_suffix("Ki") {
        number(v).map(|v| v / 1024.0)
    } else if let Some(v) = raw.strip_suffix("Mi") {
        number(v)
    } else {
        number(raw).map(|v| v / (1024.0 * 1024.0))
    }
}

pub fn parse_rate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Some(v) = raw.strip_suffix('m') {
        number(v).map(|v| v / 1e3)
    } else if let Some(v) = raw.strip_suffix('n') {
        number(v).map(|v| v / 1e9)
    } else {
        number(raw)
    }
}

fn number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
