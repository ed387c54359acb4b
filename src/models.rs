//! Data models for the roster board.
//!
//! This module contains the records loaded from the source documents
//! and the tallies derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Competition tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Junior,
    Senior,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 2] = [Category::Junior, Category::Senior];

    /// Parse the exact label used in the student document.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Junior" => Some(Category::Junior),
            "Senior" => Some(Category::Senior),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Junior => write!(f, "Junior"),
            Category::Senior => write!(f, "Senior"),
        }
    }
}

/// Whether a student was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Yes,
    No,
}

impl Selection {
    /// Parse the exact label used in the student document.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(Selection::Yes),
            "No" => Some(Selection::No),
            _ => None,
        }
    }
}

/// A single participant as it appears in the student document.
///
/// Every field is optional: a missing or malformed value is kept as `None`
/// rather than rejecting the record, and simply fails to match later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub selected: Option<String>,
}

impl StudentRecord {
    /// The record's category, if it is one of the known tiers.
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_label)
    }

    /// The record's selection status, if it is exactly "Yes" or "No".
    pub fn selection(&self) -> Option<Selection> {
        self.selected.as_deref().and_then(Selection::from_label)
    }

    /// True when the record is marked as selected.
    pub fn is_selected(&self) -> bool {
        self.selection() == Some(Selection::Yes)
    }
}

/// Accept strings as-is and scalars in their textual form; drop anything else.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Country name to flag markup (an SVG or HTML fragment).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagMap(HashMap<String, String>);

impl FlagMap {
    /// Look up the markup for a country.
    pub fn get(&self, country: &str) -> Option<&str> {
        self.0.get(country).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for FlagMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Non-string entries are skipped; a missing flag just omits the icon.
        let raw: HashMap<String, Value> = HashMap::deserialize(deserializer)?;
        Ok(FlagMap(
            raw.into_iter()
                .filter_map(|(country, markup)| match markup {
                    Value::String(s) => Some((country, s)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlagMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FlagMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Selected / not-selected counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub selected: usize,
    pub not_selected: usize,
}

impl CategoryTally {
    /// Records counted in either bucket.
    pub fn total(&self) -> usize {
        self.selected + self.not_selected
    }
}

/// Display label for participants whose record carries no country.
pub const UNKNOWN_COUNTRY_LABEL: &str = "Unknown";

/// Label for a country key; `None` is shown as [`UNKNOWN_COUNTRY_LABEL`].
pub fn country_label(country: Option<&str>) -> &str {
    country.unwrap_or(UNKNOWN_COUNTRY_LABEL)
}

/// Participants per country, in first-seen order.
///
/// Records without a country are kept under their own `None` key, apart
/// from any real country that happens to be named "Unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTally {
    entries: Vec<(Option<String>, usize)>,
}

impl CountryTally {
    /// Count one more participant for `country`.
    pub fn record(&mut self, country: Option<&str>) {
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| name.as_deref() == country)
        {
            Some((_, count)) => *count += 1,
            None => self.entries.push((country.map(String::from), 1)),
        }
    }

    #[allow(dead_code)] // Lookup helper, used by tests
    pub fn get(&self, country: Option<&str>) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_deref() == country)
            .map(|(_, count)| *count)
    }

    /// Country keys in first-seen order.
    pub fn keys(&self) -> Vec<Option<String>> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Display labels in first-seen order.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, _)| country_label(name.as_deref()).to_string())
            .collect()
    }

    pub fn values(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn sorted_by_count(&self) -> Vec<(Option<String>, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        sorted
    }
}

/// Everything the charts and summaries need, derived from the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tallies {
    pub junior: CategoryTally,
    pub senior: CategoryTally,
    pub countries: CountryTally,
    /// Number of records aggregated.
    pub total: usize,
}

impl Tallies {
    pub fn for_category(&self, category: Category) -> &CategoryTally {
        match category {
            Category::Junior => &self.junior,
            Category::Senior => &self.senior,
        }
    }

    pub(crate) fn for_category_mut(&mut self, category: Category) -> &mut CategoryTally {
        match category {
            Category::Junior => &mut self.junior,
            Category::Senior => &mut self.senior,
        }
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Page title.
    pub title: String,
    /// Where the student document was read from.
    pub students_source: String,
    /// Where the flag document was read from.
    pub flags_source: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of student records loaded.
    pub student_count: usize,
    /// Number of flags loaded.
    pub flag_count: usize,
}

/// The machine-readable roster report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterReport {
    pub metadata: ReportMetadata,
    pub tallies: Tallies,
}
