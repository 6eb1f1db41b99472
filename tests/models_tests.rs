// Model tests: chart document JSON shape, slugs, record accessors

use faasbench::models::*;

fn chart(name: &str) -> Chart {
    Chart {
        name: name.into(),
        title: "t".into(),
        x_label: "x".into(),
        y_label: "y".into(),
        start_time: 1_650_000_000.0,
        window_secs: 10.0,
        series: vec![NamedSeries::new(
            "executionLatency",
            DerivedSeries {
                x: vec![5.0, 15.0],
                y: vec![0.5, 0.0],
            },
        )],
        requests: DerivedSeries {
            x: vec![5.0, 15.0],
            y: vec![1.0, 1.0],
        },
    }
}

#[test]
fn test_slug_lowercases_and_replaces_spaces() {
    assert_eq!(chart("Latency Plots").slug(), "latency_plots");
    assert_eq!(slugify("Nodes CPU Usage"), "nodes_cpu_usage");
    assert_eq!(slugify("Status Code"), "status_code");
}

#[test]
fn test_chart_serialization_camel_case() {
    let json = serde_json::to_string(&chart("Latency Plots")).unwrap();
    assert!(json.contains("\"xLabel\""));
    assert!(json.contains("\"startTime\""));
    assert!(json.contains("\"windowSecs\""));
    let back: Chart = serde_json::from_str(&json).unwrap();
    assert_eq!(back, chart("Latency Plots"));
}

#[test]
fn test_named_series_flattens_points() {
    let v = serde_json::to_value(&chart("c").series[0]).unwrap();
    assert_eq!(v["label"], "executionLatency");
    assert_eq!(v["x"], serde_json::json!([5.0, 15.0]));
    assert_eq!(v["y"], serde_json::json!([0.5, 0.0]));
}

#[test]
fn test_derived_series_points_pair_up() {
    let s = chart("c").requests;
    let points: Vec<_> = s.points().collect();
    assert_eq!(points, vec![(5.0, 1.0), (15.0, 1.0)]);
}

#[test]
fn test_record_typed_accessors() {
    let r = EventRecord::from_pairs([
        ("requestTime", "1650000000.25"),
        ("statusCode", "200"),
        ("hostId", "1634567890"),
        ("containerId", "c-1"),
        ("requestId", "r-1"),
        ("replicas", "3"),
    ]);
    assert_eq!(r.timestamp(), Some(1_650_000_000.25));
    assert_eq!(r.status_code(), Some(STATUS_OK));
    assert!(r.is_success());
    assert_eq!(r.host_id(), Some("1634567890"));
    assert_eq!(r.container_id(), Some("c-1"));
    assert_eq!(r.request_id(), Some("r-1"));
    assert_eq!(r.replicas(), Some(3.0));
    assert!(r.execution_interval().is_none());
}

#[test]
fn test_record_status_out_of_range_is_absent() {
    let r = EventRecord::from_pairs([("statusCode", "-1")]);
    assert_eq!(r.status_code(), None);
    let r = EventRecord::from_pairs([("statusCode", "70000")]);
    assert_eq!(r.status_code(), None);
}
