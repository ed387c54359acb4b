//! Roster aggregation and statistics.
//!
//! Turns the flat list of student records into the counts the charts and
//! summaries are drawn from. Records that do not match a tally's predicate
//! are skipped silently; nothing here can fail.

use crate::models::{CategoryTally, Selection, StudentRecord, Tallies};
use tracing::debug;

/// Aggregate the records into per-category and per-country tallies.
pub fn aggregate(records: &[StudentRecord]) -> Tallies {
    let mut tallies = Tallies {
        total: records.len(),
        ..Tallies::default()
    };
    let mut skipped = 0usize;

    for record in records {
        match (record.category(), record.selection()) {
            (Some(category), Some(Selection::Yes)) => {
                tallies.for_category_mut(category).selected += 1
            }
            (Some(category), Some(Selection::No)) => {
                tallies.for_category_mut(category).not_selected += 1
            }
            _ => skipped += 1,
        }

        tallies.countries.record(record.country.as_deref());
    }

    if skipped > 0 {
        debug!("{} records left out of the category tallies", skipped);
    }

    tallies
}

/// Share of selected participants in a tally, as a percentage.
pub fn selection_rate(tally: &CategoryTally) -> Option<f64> {
    match tally.total() {
        0 => None,
        total => Some(tally.selected as f64 / total as f64 * 100.0),
    }
}

/// Number of records marked selected, across all categories.
pub fn total_selected(tallies: &Tallies) -> usize {
    tallies.junior.selected + tallies.senior.selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn student(category: &str, selected: &str, country: &str) -> StudentRecord {
        StudentRecord {
            category: Some(category.to_string()),
            selected: Some(selected.to_string()),
            country: Some(country.to_string()),
            ..StudentRecord::default()
        }
    }

    fn mixed_roster() -> Vec<StudentRecord> {
        vec![
            student("Junior", "Yes", "Peru"),
            student("Senior", "No", "Kenya"),
            student("Junior", "No", "Peru"),
            student("Open", "Yes", "Chile"),
            student("Senior", "Maybe", "Kenya"),
            StudentRecord::default(),
            student("Senior", "Yes", "Peru"),
        ]
    }

    #[test]
    fn test_basic_category_scenario() {
        let records = vec![
            student("Junior", "Yes", "Peru"),
            student("Junior", "No", "Peru"),
            student("Senior", "Yes", "Kenya"),
        ];

        let tallies = aggregate(&records);

        assert_eq!(
            tallies.junior,
            CategoryTally {
                selected: 1,
                not_selected: 1
            }
        );
        assert_eq!(
            tallies.senior,
            CategoryTally {
                selected: 1,
                not_selected: 0
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let tallies = aggregate(&[]);

        assert_eq!(tallies.junior, CategoryTally::default());
        assert_eq!(tallies.senior, CategoryTally::default());
        assert!(tallies.countries.is_empty());
        assert_eq!(tallies.total, 0);
    }

    #[test]
    fn test_unmatched_values_are_skipped() {
        let tallies = aggregate(&mixed_roster());

        assert_eq!(tallies.junior.total(), 2);
        // "Maybe" matches neither bucket.
        assert_eq!(tallies.senior.total(), 2);
        assert_eq!(tallies.total, 7);
    }

    #[test]
    fn test_category_sums_match_record_counts() {
        let records = vec![
            student("Junior", "Yes", "Peru"),
            student("Junior", "No", "Peru"),
            student("Junior", "No", "Chile"),
            student("Senior", "Yes", "Kenya"),
            student("Senior", "Yes", "Chile"),
        ];
        let tallies = aggregate(&records);

        for category in Category::ALL {
            let expected = records
                .iter()
                .filter(|r| r.category() == Some(category))
                .count();
            assert_eq!(tallies.for_category(category).total(), expected);
        }
    }

    #[test]
    fn test_country_counts_sum_to_total() {
        let records = mixed_roster();
        let tallies = aggregate(&records);

        assert_eq!(tallies.countries.total(), records.len());
        assert_eq!(tallies.countries.get(None), Some(1));
        assert_eq!(
            tallies.countries.labels(),
            vec!["Peru", "Kenya", "Chile", "Unknown"]
        );
    }

    #[test]
    fn test_missing_country_not_merged_with_named_unknown() {
        let records = vec![
            student("Junior", "Yes", "Unknown"),
            StudentRecord::default(),
        ];
        let tallies = aggregate(&records);

        assert_eq!(tallies.countries.len(), 2);
        assert_eq!(tallies.countries.values(), vec![1, 1]);
        assert_eq!(tallies.countries.get(Some("Unknown")), Some(1));
        assert_eq!(tallies.countries.get(None), Some(1));
        assert_eq!(tallies.countries.total(), records.len());
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = mixed_roster();
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn test_selection_rate() {
        let tally = CategoryTally {
            selected: 1,
            not_selected: 3,
        };
        assert_eq!(selection_rate(&tally), Some(25.0));
        assert_eq!(selection_rate(&CategoryTally::default()), None);
    }

    #[test]
    fn test_total_selected() {
        let tallies = aggregate(&mixed_roster());
        assert_eq!(total_selected(&tallies), 2);
    }
}
