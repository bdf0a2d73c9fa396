use yansi::Paint;

use crate::{Change, DiffReport, DEFAULT_THRESHOLD};

const NAME_WIDTH: usize = 50;
const VALUE_WIDTH: usize = 15;
const CHANGE_WIDTH: usize = 10;
const SEPARATOR_WIDTH: usize = 100;

/// Presentation knobs for [`DiffReport::render`].
///
/// Emphasis is applied to the already-padded change cell, so toggling `color`
/// never moves a column boundary.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Highlight threshold in percent (exclusive on both sides).
    pub threshold: f64,
    /// Wrap flagged change cells in terminal color escapes.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            color: false,
        }
    }
}

pub(crate) fn render_table(report: &DiffReport, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<name$} | {:<value$} | {:<value$} | {:<change$}\n",
        "Benchmark Name",
        "Baseline (ns)",
        "New (ns)",
        "Change",
        name = NAME_WIDTH,
        value = VALUE_WIDTH,
        change = CHANGE_WIDTH,
    ));
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');

    for row in &report.rows {
        let change_cell = format!(
            "{:<change$}",
            percent_cell(row.percent_change),
            change = CHANGE_WIDTH,
        );
        let change_cell = if options.color {
            match row.change(options.threshold) {
                Change::Regression => change_cell.bright_red().to_string(),
                Change::Improvement => change_cell.bright_green().to_string(),
                Change::Neutral => change_cell,
            }
        } else {
            change_cell
        };

        out.push_str(&format!(
            "{:<name$} | {:<value$} | {:<value$} | {}\n",
            row.name,
            value_cell(row.baseline),
            value_cell(row.updated),
            change_cell,
            name = NAME_WIDTH,
            value = VALUE_WIDTH,
        ));
    }

    out
}

fn value_cell(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "N/A".to_string(),
    }
}

fn percent_cell(percent_change: Option<f64>) -> String {
    match percent_change {
        Some(pct) => format!("{pct:+.2}%"),
        None => "N/A".to_string(),
    }
}
