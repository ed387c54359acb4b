//! Owned session state.
//!
//! Holds the loaded documents and the charts rendered from them. The
//! session is passed explicitly to every render step.

use crate::chart::{
    country_chart, render_chart, selection_chart, ChartHandle, ChartSlot, ChartSpec,
};
use crate::config::ReportConfig;
use crate::models::{Category, FlagMap, StudentRecord, Tallies};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The loaded roster plus everything rendered from it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub students: Vec<StudentRecord>,
    pub flags: FlagMap,
    pub charts: ChartRegistry,
}

impl Session {
    pub fn new(students: Vec<StudentRecord>, flags: FlagMap) -> Self {
        Self {
            students,
            flags,
            charts: ChartRegistry::default(),
        }
    }

    /// Students in table order: alphabetical by name.
    ///
    /// The loaded order is left untouched so tallies keep first-seen order.
    pub fn sorted_students(&self) -> Vec<&StudentRecord> {
        let mut sorted: Vec<&StudentRecord> = self.students.iter().collect();
        sorted.sort_by(|a, b| compare_names(a.name.as_deref(), b.name.as_deref()));
        sorted
    }

    /// Flag markup for a country, if one was loaded.
    pub fn flag_for(&self, country: &str) -> Option<&str> {
        self.flags.get(country)
    }

    /// Render `spec` into `slot`, returning the chart it replaced.
    pub fn replace_chart(&mut self, slot: ChartSlot, spec: ChartSpec) -> Option<ChartHandle> {
        self.charts.replace(slot, spec, &self.flags)
    }

    /// Render the two selection doughnuts and the country pie from `tallies`.
    pub fn render_charts(&mut self, tallies: &Tallies, config: &ReportConfig) {
        for (slot, category) in [
            (ChartSlot::Junior, Category::Junior),
            (ChartSlot::Senior, Category::Senior),
        ] {
            let tally = tallies.for_category(category);
            let spec = selection_chart(
                format!("{} Selected vs Not Selected", category),
                tally.selected,
                tally.not_selected,
                &config.selection_colors,
            );
            self.replace_chart(slot, spec);
        }

        let spec = country_chart(
            "Country Participation",
            &tallies.countries,
            &config.country_colors,
        );
        self.replace_chart(ChartSlot::Country, spec);
    }
}

/// Name order ignoring case and accents, falling back to exact order.
/// Missing names first.
fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => collation_key(a)
            .cmp(&collation_key(b))
            .then_with(|| a.cmp(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Decompose, strip combining marks, and lowercase: "Émile" sorts as "emile".
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Rendered charts, one per slot.
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<ChartSlot, ChartHandle>,
}

impl ChartRegistry {
    /// Render a new chart for `slot` and hand back the previous one.
    pub fn replace(
        &mut self,
        slot: ChartSlot,
        spec: ChartSpec,
        flags: &FlagMap,
    ) -> Option<ChartHandle> {
        let generation = self
            .charts
            .get(&slot)
            .map(|previous| previous.generation + 1)
            .unwrap_or(0);
        let markup = render_chart(slot.element_id(), &spec, flags);

        debug!("Rendered {:?} chart (generation {})", slot, generation);

        self.charts.insert(
            slot,
            ChartHandle {
                slot,
                spec,
                markup,
                generation,
            },
        )
    }

    #[allow(dead_code)] // Lookup helper, used by tests
    pub fn get(&self, slot: ChartSlot) -> Option<&ChartHandle> {
        self.charts.get(&slot)
    }

    /// Charts in page order.
    pub fn iter(&self) -> impl Iterator<Item = &ChartHandle> {
        self.charts.values()
    }

    #[allow(dead_code)] // Pairs with is_empty()
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
