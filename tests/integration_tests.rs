// Integration tests: CSV -> report -> exported chart documents, single file and batch

mod common;

use common::SAMPLE_CSV;
use faasbench::batch;
use faasbench::config::{AppConfig, OutputConfig};
use faasbench::models::Chart;
use faasbench::record_repo::read_csv;
use faasbench::report::{self, names};

fn read_chart(dir: &std::path::Path, slug: &str) -> Chart {
    let body = std::fs::read_to_string(dir.join(format!("{slug}.json"))).unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn analyze_builds_full_chart_catalogue() {
    let report = report::analyze(read_csv(SAMPLE_CSV.as_bytes()).unwrap(), 10.0).unwrap();
    assert_eq!(report.windows, 3);
    assert_eq!(report.records, 5);
    assert_eq!(report.start_time, 1_650_000_000.5);

    let order: Vec<&str> = report.charts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        order,
        vec![
            names::LATENCY,
            names::STATUS,
            names::CONTAINERS_PER_HOST,
            names::REQUESTS_PER_CONTAINER,
            names::REPLICAS,
            names::INVOCATION_RATE,
            names::MEMORY,
            names::CPU,
        ]
    );
    for chart in &report.charts {
        assert_eq!(chart.requests.y, vec![2.0, 2.0, 1.0]);
        assert!(chart.x_label.starts_with("Time in seconds (start-time: "));
        for s in &chart.series {
            assert_eq!(s.series.x, vec![5.0, 15.0, 25.0], "{}", chart.name);
        }
    }
}

#[test]
fn analyze_computes_expected_values() {
    let report = report::analyze(read_csv(SAMPLE_CSV.as_bytes()).unwrap(), 10.0).unwrap();

    let latency = report.chart(names::LATENCY).unwrap();
    assert_eq!(latency.series[0].label, "executionLatency");
    assert_eq!(latency.series[0].series.y, vec![1.0, 0.0, 0.25]);

    let status = report.chart(names::STATUS).unwrap();
    assert_eq!(status.series[0].series.y, vec![2.0, 0.0, 1.0]);
    assert_eq!(status.series[1].series.y, vec![0.0, 2.0, 0.0]);

    let hosts = report.chart(names::CONTAINERS_PER_HOST).unwrap();
    assert_eq!(hosts.series[0].label, "host-0: h1");
    assert_eq!(hosts.series[0].series.y, vec![1.0, 1.0, 0.0]);
    assert_eq!(hosts.series[1].label, "host-1: h2");
    assert_eq!(hosts.series[1].series.y, vec![0.0, 0.0, 0.0]);

    let containers = report.chart(names::REQUESTS_PER_CONTAINER).unwrap();
    let ys: Vec<_> = containers.series.iter().map(|s| s.series.y.clone()).collect();
    assert_eq!(
        ys,
        vec![vec![1.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]
    );

    let replicas = report.chart(names::REPLICAS).unwrap();
    assert_eq!(replicas.series[0].series.y, vec![0.0, 2.0, 0.0]);

    let rate = report.chart(names::INVOCATION_RATE).unwrap();
    assert_eq!(rate.series[0].series.y, vec![0.0, 0.25, 0.0]);

    let cpu = report.chart(names::CPU).unwrap();
    assert_eq!(cpu.series[0].label, "n1");
    assert_eq!(cpu.series[0].series.y, vec![0.0, 0.5, 0.0]);

    let mem = report.chart(names::MEMORY).unwrap();
    assert_eq!(mem.series[0].series.y, vec![0.0, 10.0, 0.0]);
}

#[test]
fn analyze_omits_optional_charts_without_columns() {
    let csv = "requestTime,statusCode,executionLatency\n1650000000,200,0.1\n1650000005,200,0.3\n";
    let report = report::analyze(read_csv(csv.as_bytes()).unwrap(), 10.0).unwrap();
    let order: Vec<&str> = report.charts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(order, vec![names::LATENCY, names::STATUS]);
    assert_eq!(report.windows, 1);
}

#[test]
fn analyze_rejects_log_without_timestamps() {
    let csv = "statusCode\n200\n";
    let err = report::analyze(read_csv(csv.as_bytes()).unwrap(), 10.0).unwrap_err();
    assert!(err.to_string().contains("requestTime"));
}

#[test]
fn analyze_file_exports_one_document_per_chart() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = dir.path().join("result-1.csv");
    std::fs::write(&csv, SAMPLE_CSV).unwrap();
    let out = dir.path().join("plots");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("stale.json"), "{}").unwrap();

    let report = batch::analyze_file(&csv, &out, 10.0, &OutputConfig::default()).unwrap();

    assert!(!out.join("stale.json").exists());
    let mut files: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec![
            "containers_per_hosts.json",
            "function_invocation_rate.json",
            "latency_plots.json",
            "nodes_cpu_usage.json",
            "nodes_memory_usage.json",
            "pod_replicas.json",
            "requests_per_container.json",
            "status_code.json",
        ]
    );
    let latency = read_chart(&out, "latency_plots");
    assert_eq!(&latency, report.chart(names::LATENCY).unwrap());
}

#[test]
fn analyze_file_without_clean_keeps_existing_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = dir.path().join("result-1.csv");
    std::fs::write(&csv, SAMPLE_CSV).unwrap();
    let out = dir.path().join("plots");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("notes.txt"), "keep").unwrap();

    let output = OutputConfig {
        clean: false,
        pretty: false,
    };
    batch::analyze_file(&csv, &out, 10.0, &output).unwrap();
    assert!(out.join("notes.txt").exists());
    assert!(out.join("status_code.json").exists());
}

#[test]
fn output_dir_mirrors_input_layout() {
    let out = batch::output_dir_for(
        std::path::Path::new("logs"),
        std::path::Path::new("logs/run1/result-1.csv"),
        std::path::Path::new("plots"),
    );
    assert_eq!(out, std::path::Path::new("plots/run1/result-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_analyzes_tree_and_counts_failures() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("logs");
    std::fs::create_dir_all(input.join("run1")).unwrap();
    std::fs::create_dir_all(input.join("run2")).unwrap();
    std::fs::write(input.join("run1/result-1.csv"), SAMPLE_CSV).unwrap();
    std::fs::write(input.join("run2/result-2.csv"), SAMPLE_CSV).unwrap();
    std::fs::write(input.join("run2/broken.csv"), "statusCode\n500\n").unwrap();
    std::fs::write(input.join("run2/README.md"), "not a log").unwrap();

    let output = dir.path().join("plots");
    let config = AppConfig::load_from_str("[batch]\nmax_concurrency = 2\n").unwrap();
    let summary = batch::run(&input, &output, 10.0, &config).await.unwrap();

    assert_eq!(summary.analyzed, 2);
    assert_eq!(summary.failed, 1);
    assert!(output.join("run1/result-1/latency_plots.json").exists());
    assert!(output.join("run2/result-2/nodes_cpu_usage.json").exists());
    assert!(!output.join("run2/README").exists());
}

#[test]
fn discover_logs_requires_directory() {
    let err = batch::discover_logs(std::path::Path::new("/nonexistent/logs"), "csv").unwrap_err();
    assert!(err.to_string().contains("not a directory"));
}
