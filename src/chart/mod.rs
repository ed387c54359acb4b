//! Inline SVG chart rendering.
//!
//! Produces doughnut and pie charts as self-contained SVG fragments with
//! a legend and per-slice tooltips, ready to embed in the HTML page.

pub mod figure;

pub use figure::render_chart;

use serde::Serialize;

/// Colors for the "Selected" / "Not Selected" doughnuts.
pub const DEFAULT_SELECTION_COLORS: [&str; 2] = ["#4CAF50", "#FF5252"];

/// Colors cycled across the country slices.
pub const DEFAULT_COUNTRY_COLORS: [&str; 4] = ["#2196F3", "#FF9800", "#9C27B0", "#009688"];

/// Shape of a circular chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Ring with a hollow centre.
    Doughnut,
    /// Solid disc.
    Pie,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub colors: Vec<String>,
    /// Country key per slice, for flag markup in the legend. Empty when the
    /// chart has no flags.
    pub flag_keys: Vec<Option<String>>,
}

impl ChartSpec {
    /// Color for the slice at `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return "#999999";
        }
        &self.colors[index % self.colors.len()]
    }

    /// Sum of all slice values.
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }
}

/// Where a chart lives on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartSlot {
    Junior,
    Senior,
    Country,
}

impl ChartSlot {
    /// Every slot, in page order.
    pub const ALL: [ChartSlot; 3] = [ChartSlot::Junior, ChartSlot::Senior, ChartSlot::Country];

    /// DOM id of the chart's container.
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartSlot::Junior => "juniorChart",
            ChartSlot::Senior => "seniorChart",
            ChartSlot::Country => "countryChart",
        }
    }
}

/// A rendered chart.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)] // slot and spec are kept for inspection of replaced charts
pub struct ChartHandle {
    pub slot: ChartSlot,
    pub spec: ChartSpec,
    pub markup: String,
    /// Increases each time the slot is re-rendered.
    pub generation: u32,
}

/// Build the doughnut spec for one category's selection tally.
pub fn selection_chart(
    title: impl Into<String>,
    selected: usize,
    not_selected: usize,
    colors: &[String],
) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        title: title.into(),
        labels: vec!["Selected".to_string(), "Not Selected".to_string()],
        values: vec![selected, not_selected],
        colors: colors.to_vec(),
        flag_keys: Vec::new(),
    }
}

/// Build the pie spec for country participation.
pub fn country_chart(
    title: impl Into<String>,
    countries: &crate::models::CountryTally,
    colors: &[String],
) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        title: title.into(),
        labels: countries.labels(),
        values: countries.values(),
        colors: colors.to_vec(),
        flag_keys: countries.keys(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryTally;

    fn palette(colors: &[&str]) -> Vec<String> {
        colors.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_color_cycles() {
        let mut countries = CountryTally::default();
        for c in ["A", "B", "C", "D", "E", "F"] {
            countries.record(Some(c));
        }
        let spec = country_chart("Countries", &countries, &palette(&DEFAULT_COUNTRY_COLORS));

        assert_eq!(spec.color(0), "#2196F3");
        assert_eq!(spec.color(4), "#2196F3");
        assert_eq!(spec.color(5), "#FF9800");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let spec = selection_chart("Junior", 1, 1, &[]);
        assert_eq!(spec.color(0), "#999999");
    }

    #[test]
    fn test_selection_chart_labels() {
        let spec = selection_chart("Junior", 3, 2, &palette(&DEFAULT_SELECTION_COLORS));

        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.labels, vec!["Selected", "Not Selected"]);
        assert_eq!(spec.values, vec![3, 2]);
        assert_eq!(spec.total(), 5);
    }

    #[test]
    fn test_slot_element_ids() {
        let ids: Vec<_> = ChartSlot::ALL.iter().map(|s| s.element_id()).collect();
        assert_eq!(ids, vec!["juniorChart", "seniorChart", "countryChart"]);
    }
}
