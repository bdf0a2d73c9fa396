use bench_diff::{compare, BenchmarkSet, Change};
use pretty_assertions::assert_eq;

fn set(entries: &[(&str, f64)]) -> BenchmarkSet {
    entries
        .iter()
        .map(|(name, mean)| (name.to_string(), *mean))
        .collect()
}

#[test]
fn percent_change_is_relative_to_the_baseline() {
    let baseline = set(&[("sort", 200.0)]);
    let updated = set(&[("sort", 230.0)]);

    let report = compare(&baseline, &updated);
    assert_eq!(report.rows.len(), 1);
    let pct = report.rows[0].percent_change.unwrap();
    assert!((pct - 15.0).abs() < 1e-9, "unexpected percent change: {pct}");
}

#[test]
fn rows_cover_the_union_in_lexicographic_order() {
    let baseline = set(&[("zlib", 1.0), ("alpha", 2.0)]);
    let updated = set(&[("mid", 3.0), ("alpha", 2.5)]);

    let report = compare(&baseline, &updated);
    let names: Vec<&str> = report.rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zlib"]);
}

#[test]
fn ordering_ignores_document_order() {
    let forward = r#"<?xml version="1.0" encoding="UTF-8"?>
<Catch2TestRun name="benchmarks">
  <TestCase name="core benchmarks">
    <BenchmarkResults name="alpha"><mean value="1.0"/></BenchmarkResults>
    <BenchmarkResults name="beta"><mean value="2.0"/></BenchmarkResults>
  </TestCase>
</Catch2TestRun>"#;
    let reversed = r#"<?xml version="1.0" encoding="UTF-8"?>
<Catch2TestRun name="benchmarks">
  <TestCase name="core benchmarks">
    <BenchmarkResults name="beta"><mean value="2.0"/></BenchmarkResults>
    <BenchmarkResults name="alpha"><mean value="1.0"/></BenchmarkResults>
  </TestCase>
</Catch2TestRun>"#;

    let baseline = BenchmarkSet::parse(forward).unwrap();
    let updated_forward = BenchmarkSet::parse(forward).unwrap();
    let updated_reversed = BenchmarkSet::parse(reversed).unwrap();
    assert_eq!(updated_forward, updated_reversed);

    let rows: Vec<String> = compare(&baseline, &updated_reversed)
        .rows
        .into_iter()
        .map(|row| row.name)
        .collect();
    assert_eq!(rows, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn one_sided_rows_keep_the_present_value() {
    let baseline = set(&[("removed", 10.0)]);
    let updated = set(&[("added", 20.0)]);

    let report = compare(&baseline, &updated);
    assert_eq!(report.rows.len(), 2);

    let added = &report.rows[0];
    assert_eq!(added.name, "added");
    assert_eq!(added.baseline, None);
    assert_eq!(added.updated, Some(20.0));
    assert_eq!(added.percent_change, None);

    let removed = &report.rows[1];
    assert_eq!(removed.name, "removed");
    assert_eq!(removed.baseline, Some(10.0));
    assert_eq!(removed.updated, None);
    assert_eq!(removed.percent_change, None);
}

#[test]
fn zero_baseline_has_no_percent_change() {
    let baseline = set(&[("noop", 0.0)]);
    let updated = set(&[("noop", 3.0)]);

    let report = compare(&baseline, &updated);
    assert_eq!(report.rows[0].baseline, Some(0.0));
    assert_eq!(report.rows[0].updated, Some(3.0));
    assert_eq!(report.rows[0].percent_change, None);
    assert_eq!(report.rows[0].change(5.0), Change::Neutral);
}

#[test]
fn threshold_boundary_is_exclusive() {
    assert_eq!(Change::classify(Some(6.0), 5.0), Change::Regression);
    assert_eq!(Change::classify(Some(-6.0), 5.0), Change::Improvement);
    assert_eq!(Change::classify(Some(5.0), 5.0), Change::Neutral);
    assert_eq!(Change::classify(Some(-5.0), 5.0), Change::Neutral);
    assert_eq!(Change::classify(Some(0.0), 5.0), Change::Neutral);
    assert_eq!(Change::classify(None, 5.0), Change::Neutral);
}

#[test]
fn custom_threshold_moves_the_flag_boundary() {
    assert_eq!(Change::classify(Some(6.0), 10.0), Change::Neutral);
    assert_eq!(Change::classify(Some(11.0), 10.0), Change::Regression);
    assert_eq!(Change::classify(Some(-0.5), 0.0), Change::Improvement);
}

#[test]
fn added_benchmark_and_regression_in_one_run() {
    let baseline = set(&[("sort", 100.0), ("parse", 50.0)]);
    let updated = set(&[("sort", 106.0), ("parse", 48.0), ("build", 10.0)]);

    let report = compare(&baseline, &updated);
    let names: Vec<&str> = report.rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["build", "parse", "sort"]);

    let build = &report.rows[0];
    assert_eq!(build.baseline, None);
    assert_eq!(build.updated, Some(10.0));
    assert_eq!(build.percent_change, None);
    assert_eq!(build.change(5.0), Change::Neutral);

    let parse = &report.rows[1];
    let pct = parse.percent_change.unwrap();
    assert!((pct + 4.0).abs() < 1e-9, "unexpected percent change: {pct}");
    assert_eq!(parse.change(5.0), Change::Neutral);

    let sort = &report.rows[2];
    let pct = sort.percent_change.unwrap();
    assert!((pct - 6.0).abs() < 1e-9, "unexpected percent change: {pct}");
    assert_eq!(sort.change(5.0), Change::Regression);

    assert!(report.has_regression(5.0));
    assert_eq!(report.count(Change::Regression, 5.0), 1);
    assert_eq!(report.count(Change::Neutral, 5.0), 2);
}
