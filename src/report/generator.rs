//! Markdown and JSON summary generation.
//!
//! These outputs carry the tallies only; the roster table lives in the
//! HTML page.

use crate::analysis::{selection_rate, total_selected};
use crate::models::{
    country_label, Category, CountryTally, ReportMetadata, RosterReport, Tallies,
};
use anyhow::Result;

/// Generate a Markdown summary.
pub fn generate_markdown_report(report: &RosterReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", single_line(&report.metadata.title)));
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_selection_section(&report.tallies));
    output.push_str(&generate_country_section(&report.tallies.countries));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Students:** {}\n",
        single_line(&metadata.students_source)
    ));
    section.push_str(&format!(
        "- **Flags:** {}\n",
        single_line(&metadata.flags_source)
    ));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Participants:** {}\n", metadata.student_count));
    section.push_str(&format!("- **Flags Loaded:** {}\n", metadata.flag_count));
    section.push('\n');

    section
}

/// Generate the per-category selection table.
fn generate_selection_section(tallies: &Tallies) -> String {
    let mut section = String::new();

    section.push_str("## Selection by Category\n\n");
    section.push_str("| Category | Selected | Not Selected | Rate |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for category in Category::ALL {
        let tally = tallies.for_category(category);
        let rate = selection_rate(tally)
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "-".to_string());
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            category, tally.selected, tally.not_selected, rate
        ));
    }

    section.push_str(&format!(
        "\n**Total selected:** {} of {}\n\n",
        total_selected(tallies),
        tallies.total
    ));

    section
}

/// Generate the per-country participation table.
fn generate_country_section(countries: &CountryTally) -> String {
    let mut section = String::new();

    section.push_str("## Participation by Country\n\n");

    if countries.is_empty() {
        section.push_str("No participants.\n\n");
        return section;
    }

    section.push_str("| Country | Participants |\n");
    section.push_str("|:---|:---:|\n");
    for (country, count) in countries.sorted_by_count() {
        section.push_str(&format!(
            "| {} | {} |\n",
            table_cell(country_label(country.as_deref())),
            count
        ));
    }
    section.push('\n');

    section
}

/// Collapse line breaks so the text stays on one Markdown line.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Text that is safe inside a Markdown table cell.
fn table_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by rosterboard*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &RosterReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryTally;
    use chrono::Utc;

    fn create_test_report() -> RosterReport {
        let mut countries = CountryTally::default();
        for country in ["Peru", "Kenya", "Kenya"] {
            countries.record(Some(country));
        }

        RosterReport {
            metadata: ReportMetadata {
                title: "Math Olympiad".to_string(),
                students_source: "students.json".to_string(),
                flags_source: "flag.json".to_string(),
                generated_at: Utc::now(),
                student_count: 3,
                flag_count: 2,
            },
            tallies: Tallies {
                junior: CategoryTally {
                    selected: 1,
                    not_selected: 1,
                },
                senior: CategoryTally::default(),
                countries,
                total: 3,
            },
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Math Olympiad"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("| Junior | 1 | 1 | 50.0% |"));
        assert!(markdown.contains("| Senior | 0 | 0 | - |"));
        assert!(markdown.contains("**Total selected:** 1 of 3"));
    }

    #[test]
    fn test_country_section_sorted_by_count() {
        let markdown = generate_markdown_report(&create_test_report());

        let kenya = markdown.find("| Kenya | 2 |").unwrap();
        let peru = markdown.find("| Peru | 1 |").unwrap();
        assert!(kenya < peru);
    }

    #[test]
    fn test_country_cells_are_escaped() {
        let mut countries = CountryTally::default();
        countries.record(Some("Trinidad | Tobago"));
        countries.record(Some("North\nland"));
        countries.record(None);

        let section = generate_country_section(&countries);

        assert!(section.contains("| Trinidad \\| Tobago | 1 |"));
        assert!(section.contains("| North land | 1 |"));
        assert!(section.contains("| Unknown | 1 |"));
        // Header, separator, and one line per country.
        let rows = section.lines().filter(|l| l.starts_with('|')).count();
        assert_eq!(rows, 5);
    }

    #[test]
    fn test_title_kept_on_one_line() {
        let mut report = create_test_report();
        report.metadata.title = "Math\r\nOlympiad".to_string();

        let markdown = generate_markdown_report(&report);
        assert!(markdown.starts_with("# Math Olympiad\n"));
    }

    #[test]
    fn test_empty_country_section() {
        let section = generate_country_section(&CountryTally::default());
        assert!(section.contains("No participants."));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.contains("\"students_source\""));
        assert!(json.contains("\"junior\""));
        assert!(json.contains("\"countries\""));
        assert!(json.contains("\"Kenya\""));
    }
}
