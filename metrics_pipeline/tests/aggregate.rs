mod common;

use std::path::Path;

use insta::assert_json_snapshot;
use metrics_pipeline::{
    AggregateConfig, MetricKind, MetricsError,
    aggregate::{self, MetricTables},
    write_aggregation,
};
use serde_json::json;
use shared_utils::sink::MemorySink;

use common::{read_json, tree, write_metric};

fn seed_inputs(data: &Path) {
    let metrics = data.join("metrics");
    write_metric(
        &metrics,
        MetricKind::Asking,
        &[
            ("2025-07", 11, "2", "Residential", "1100000", "40"),
            ("2025-07", 12, "2", "Residential", "900000", "5"),
        ],
    );
    write_metric(
        &metrics,
        MetricKind::Registered,
        &[("2025-07", 11, "2", "Residential", "1000000", "30")],
    );
    write_metric(
        &metrics,
        MetricKind::Rent,
        &[
            ("2025-07", 11, "2", "Residential", "10000", "20"),
            ("2025-07", 12, "2", "Residential", "8000", "25"),
            ("2025-07", 13, "2", "Residential", "7000", "30"),
        ],
    );
}

#[test]
fn writes_summary_and_choropleth_tree() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(dir.path());

    let report = aggregate::run(&AggregateConfig::new(dir.path())).unwrap();
    assert_eq!(report.written.summaries, 3);

    let out = dir.path().join("out");
    assert_json_snapshot!(tree(&out), @r###"
    [
      "choropleth/asking/2025-07/Residential/2.json",
      "choropleth/registered/2025-07/Residential/2.json",
      "choropleth/rent/2025-07/Residential/2.json",
      "choropleth/yield/2025-07/Residential/2.json",
      "summary/11/2025-07/Residential/2.json",
      "summary/12/2025-07/Residential/2.json",
      "summary/13/2025-07/Residential/2.json"
    ]
    "###);

    let summary = read_json(&out.join("summary/11/2025-07/Residential/2.json"));
    assert_eq!(summary["locality_id"], json!(11));
    assert_eq!(summary["counts"], json!({"asking": 40, "registered": 30, "rent": 20}));
    assert!((summary["yield"].as_f64().unwrap() - 0.12).abs() < 1e-12);

    let rent_only = read_json(&out.join("summary/13/2025-07/Residential/2.json"));
    assert_eq!(rent_only["median_asking"], json!(null));
    assert_eq!(rent_only["median_registered"], json!(null));
    assert_eq!(rent_only["yield"], json!(null));

    let rent = read_json(&out.join("choropleth/rent/2025-07/Residential/2.json"));
    let ids: Vec<i64> = rent.as_array().unwrap().iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![11, 12, 13]);

    // locality 12 has only 5 asking samples
    let asking = read_json(&out.join("choropleth/asking/2025-07/Residential/2.json"));
    assert_eq!(asking.as_array().unwrap().len(), 1);
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(dir.path());
    let config = AggregateConfig::new(dir.path());
    let file = dir.path().join("out/choropleth/yield/2025-07/Residential/2.json");

    aggregate::run(&config).unwrap();
    let first = std::fs::read(&file).unwrap();
    aggregate::run(&config).unwrap();
    assert_eq!(first, std::fs::read(&file).unwrap());
}

#[test]
fn raising_the_threshold_drops_paints_not_summaries() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(dir.path());
    let tables = MetricTables::load(&dir.path().join("metrics")).unwrap();

    let mut sink = MemorySink::default();
    let agg = metrics_pipeline::aggregate(&tables, 100);
    let written = write_aggregation(&mut sink, &agg).unwrap();
    assert_eq!(written.summaries, 3);
    assert_eq!(written.paints, 0);
    assert!(sink.files.keys().all(|p| p.starts_with("summary")));
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_metric(&dir.path().join("metrics"), MetricKind::Asking, &[]);
    let err = aggregate::run(&AggregateConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, MetricsError::MissingMetric(p) if p.ends_with("metric_registered_monthly.csv")));
    assert!(!dir.path().join("out").exists());
}
