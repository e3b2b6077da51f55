//! Console grid output for a residual life expectancy result

use serde::Serialize;

use crate::table::LifeExpectancyResult;

/// Flat view of a result, as shown in the grid and returned as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPayload {
    pub gender: String,
    pub reference_year: i32,
    pub age_in_reference_year: u32,
    pub remaining_years: f64,
    pub remaining_years_rounded: i64,
}

impl From<&LifeExpectancyResult> for GridPayload {
    fn from(result: &LifeExpectancyResult) -> Self {
        Self {
            gender: result.gender.clone(),
            reference_year: result.reference_year,
            age_in_reference_year: result.age_in_reference_year,
            remaining_years: result.remaining_years,
            remaining_years_rounded: result.remaining_years_ceiling,
        }
    }
}

impl GridPayload {
    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Gender", self.gender.clone()),
            ("Reference year", self.reference_year.to_string()),
            ("Age in reference year", self.age_in_reference_year.to_string()),
            ("Residual life expectancy (years)", format!("{:.1}", self.remaining_years)),
            ("Residual life expectancy (rounded)", self.remaining_years_rounded.to_string()),
        ]
    }
}

/// Render a two-column bordered grid
///
/// ```text
/// +------------------------------------+--------+
/// | Gender                             | female |
/// +------------------------------------+--------+
/// ...
/// ```
pub fn render_grid(result: &LifeExpectancyResult) -> String {
    let rows = GridPayload::from(result).rows();

    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);
    let border = format!("+{}+{}+", "-".repeat(label_width + 2), "-".repeat(value_width + 2));

    let mut lines = Vec::with_capacity(rows.len() * 2 + 1);
    lines.push(border.clone());
    for (label, value) in &rows {
        lines.push(format!("| {label:<label_width$} | {value:>value_width$} |"));
        lines.push(border.clone());
    }

    lines.join("\n")
}
