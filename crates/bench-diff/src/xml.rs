use std::collections::BTreeMap;

use log::debug;
use roxmltree::Document;

/// Errors within a single report document (no file context; callers attach
/// the path via [`crate::Error::Parse`]).
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
    #[error("BenchmarkResults entry without a `name` attribute")]
    MissingName,
    #[error("benchmark `{name}`: mean element without a `value` attribute")]
    MissingMeanValue { name: String },
    #[error("benchmark `{name}`: mean value `{value}` is not a finite number")]
    InvalidMeanValue { name: String, value: String },
}

/// Extract `name -> mean` from a Catch2 XML report.
///
/// `BenchmarkResults` elements are matched at any depth (Catch2 nests them
/// under `TestCase`, but the depth is not part of the contract). The mean is
/// the `value` attribute of the direct `mean` child; an entry without a `mean`
/// child recorded no timing and is skipped. Duplicate names keep the
/// last-seen value.
pub(crate) fn parse_report(text: &str) -> Result<BTreeMap<String, f64>, ReportError> {
    let doc = Document::parse(text)?;

    let mut means = BTreeMap::new();
    for result in doc
        .descendants()
        .filter(|node| node.has_tag_name("BenchmarkResults"))
    {
        let name = result.attribute("name").ok_or(ReportError::MissingName)?;

        let Some(mean) = result.children().find(|child| child.has_tag_name("mean")) else {
            debug!("benchmark `{name}` has no mean element; skipping");
            continue;
        };

        let value = mean
            .attribute("value")
            .ok_or_else(|| ReportError::MissingMeanValue {
                name: name.to_string(),
            })?;
        let parsed = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ReportError::InvalidMeanValue {
                name: name.to_string(),
                value: value.to_string(),
            })?;

        means.insert(name.to_string(), parsed);
    }

    Ok(means)
}
