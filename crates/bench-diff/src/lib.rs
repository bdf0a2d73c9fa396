//! Catch2 benchmark comparison tooling.
//!
//! This crate compares two Catch2 XML benchmark reports (a baseline run and a
//! new run) by benchmark name. It intentionally reads only the per-benchmark
//! mean: sibling statistics (standard deviation, outlier counts, confidence
//! bounds) vary too much run-to-run to gate on and are ignored.

pub mod cli;
mod render;
mod xml;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub use render::RenderOptions;
pub use xml::ReportError;

/// Default highlight threshold, in percent.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read benchmark report `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse benchmark report `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}

/// Mean durations from one benchmark run, keyed by benchmark name.
///
/// Built once per report file and never mutated afterwards. Values are finite
/// floats in nanoseconds; entries whose report element carried no mean are
/// absent rather than zero, so a legitimate zero timing stays distinguishable
/// from a missing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSet {
    means: BTreeMap<String, f64>,
}

impl BenchmarkSet {
    /// Parse a Catch2 XML report from already-loaded text.
    pub fn parse(text: &str) -> Result<Self, ReportError> {
        Ok(Self {
            means: xml::parse_report(text)?,
        })
    }

    /// Read and parse a Catch2 XML report file.
    pub fn parse_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.means.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.means.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

impl FromIterator<(String, f64)> for BenchmarkSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            means: iter.into_iter().collect(),
        }
    }
}

/// Presentation classification of one row's percent change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Regression,
    Improvement,
    Neutral,
}

impl Change {
    /// Classify a percent change against a threshold (exclusive on both
    /// sides): strictly above `+threshold` is a regression, strictly below
    /// `-threshold` an improvement. Rows without a percent change are neutral.
    pub fn classify(percent_change: Option<f64>, threshold: f64) -> Self {
        match percent_change {
            Some(pct) if pct > threshold => Change::Regression,
            Some(pct) if pct < -threshold => Change::Improvement,
            _ => Change::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Change::Regression => "regression",
            Change::Improvement => "improvement",
            Change::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One benchmark's baseline/new pairing.
///
/// `percent_change` is present iff both sides are present and the baseline is
/// non-zero. A zero baseline would turn the relative change into `inf`/`NaN`;
/// it is almost certainly a measurement artifact, so the row renders as `N/A`
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub name: String,
    pub baseline: Option<f64>,
    pub updated: Option<f64>,
    pub percent_change: Option<f64>,
}

impl Comparison {
    pub fn change(&self, threshold: f64) -> Change {
        Change::classify(self.percent_change, threshold)
    }
}

/// Ordered comparison rows for every benchmark present in either run.
#[derive(Debug, Default)]
pub struct DiffReport {
    pub rows: Vec<Comparison>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count(&self, change: Change, threshold: f64) -> usize {
        self.rows
            .iter()
            .filter(|row| row.change(threshold) == change)
            .count()
    }

    pub fn has_regression(&self, threshold: f64) -> bool {
        self.rows
            .iter()
            .any(|row| row.change(threshold) == Change::Regression)
    }

    /// Render the report as an aligned plain-text table.
    pub fn render(&self, options: &RenderOptions) -> String {
        render::render_table(self, options)
    }
}

/// Compare two benchmark runs.
///
/// Rows cover the union of benchmark names from both sets, sorted
/// lexicographically ascending, so the report is stable under reordering of
/// the input documents. Either side of a row may be absent; such rows carry no
/// percent change but still appear, keeping added/removed benchmarks visible.
pub fn compare(baseline: &BenchmarkSet, updated: &BenchmarkSet) -> DiffReport {
    let names: BTreeSet<&str> = baseline.names().chain(updated.names()).collect();

    let rows = names
        .into_iter()
        .map(|name| {
            let base = baseline.get(name);
            let new = updated.get(name);
            let percent_change = match (base, new) {
                (Some(base), Some(new)) if base != 0.0 => Some((new - base) / base * 100.0),
                _ => None,
            };
            Comparison {
                name: name.to_string(),
                baseline: base,
                updated: new,
                percent_change,
            }
        })
        .collect();

    DiffReport { rows }
}
