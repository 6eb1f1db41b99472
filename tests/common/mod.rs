// Shared test helpers

#![allow(dead_code)]

use faasbench::models::EventRecord;

pub const T0: f64 = 1_650_000_000.0;

pub fn record(pairs: &[(&str, &str)]) -> EventRecord {
    EventRecord::from_pairs(pairs.iter().copied())
}

/// Request row at `T0 + offset` with the given status.
pub fn request(offset: f64, status: u16) -> EventRecord {
    let t = (T0 + offset).to_string();
    let s = status.to_string();
    record(&[("requestTime", t.as_str()), ("statusCode", s.as_str())])
}

/// Request row with one extra field.
pub fn request_with(offset: f64, status: u16, field: &str, value: &str) -> EventRecord {
    let t = (T0 + offset).to_string();
    let s = status.to_string();
    record(&[("requestTime", t.as_str()), ("statusCode", s.as_str()), (field, value)])
}

/// Sampled metric row (no status code) at `T0 + offset`.
pub fn metric(offset: f64, field: &str, value: &str) -> EventRecord {
    let t = (T0 + offset).to_string();
    record(&[("requestTime", t.as_str()), (field, value)])
}

/// Successful request executed on `host`/`container` over `[T0 + start, T0 + end]`.
pub fn execution(offset: f64, host: &str, container: &str, start: f64, end: f64) -> EventRecord {
    let t = (T0 + offset).to_string();
    let s = (T0 + start).to_string();
    let e = (T0 + end).to_string();
    record(&[
        ("requestTime", t.as_str()),
        ("statusCode", "200"),
        ("hostId", host),
        ("containerId", container),
        ("executionStartTime", s.as_str()),
        ("executionEndTime", e.as_str()),
    ])
}

pub const SAMPLE_CSV: &str = "\
requestTime,statusCode,executionLatency,requestResponseLatency,schedulingLatency,executionStartTime,executionEndTime,hostId,containerId,requestId,replicas,functionInvocationRate,n1CpuUsage,n1MemoryUsage
1650000000.5,200,0.5,0.7,0.1,1650000000.6,1650000001.1,h1,c1,r1,,,,
1650000003.0,200,1.5,1.9,0.2,1650000003.1,1650000017.0,h1,c2,r2,,,,
1650000015.0,500,,0.05,,,,,,r3,,,,
1650000016.0,,,,,,,,,,2,250m,500000000n,10240Ki
1650000024.2,200,0.25,0.3,0.05,1650000024.2,1650000024.45,h2,c3,r4,,,,
";
