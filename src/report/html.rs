//! HTML page rendering.
//!
//! Builds a single self-contained page: the roster table followed by the
//! charts already rendered into the session.

use super::escape_html;
use crate::models::ReportMetadata;
use crate::session::Session;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
h1 { margin-bottom: 0.25rem; }
.muted { color: #777; font-size: 0.9rem; }
table { border-collapse: collapse; width: 100%; margin: 1.5rem 0; }
th, td { border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f4f4f4; }
tr.selected-yes { background: #e8f5e9; }
.flag-icon { display: inline-block; width: 1.5em; vertical-align: middle; margin-right: 0.3em; }
.flag-icon svg { width: 100%; height: auto; }
.charts { display: flex; flex-wrap: wrap; gap: 2rem; }
.chart { margin: 0; width: 280px; }
.chart figcaption { font-weight: 600; margin-bottom: 0.5rem; }
.chart svg { width: 100%; height: auto; }
.chart-legend { list-style: none; padding: 0; }
.chart-legend li { margin: 0.2rem 0; }
.swatch { display: inline-block; width: 0.9em; height: 0.9em; margin-right: 0.4em; vertical-align: middle; }
"#;

/// Render the full page.
pub fn render_page(session: &Session, metadata: &ReportMetadata) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(&metadata.title),
        STYLE
    ));
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&metadata.title)));
    out.push_str(&format!(
        "<p class=\"muted\">{} participants &middot; generated {}</p>\n",
        metadata.student_count,
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str(&render_table(session));

    if !session.charts.is_empty() {
        out.push_str("<section class=\"charts\">\n");
        for chart in session.charts.iter() {
            out.push_str(&chart.markup);
            out.push('\n');
        }
        out.push_str("</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Render the roster table, sorted by name.
pub fn render_table(session: &Session) -> String {
    let mut table = String::new();

    table.push_str("<table id=\"student-table\">\n<thead><tr>");
    for heading in ["ID", "Category", "Name", "School", "Country", "Selected"] {
        table.push_str(&format!("<th>{}</th>", heading));
    }
    table.push_str("</tr></thead>\n<tbody>\n");

    for student in session.sorted_students() {
        if student.is_selected() {
            table.push_str("<tr class=\"selected-yes\">");
        } else {
            table.push_str("<tr>");
        }

        table.push_str(&text_cell(student.id.as_deref()));
        table.push_str(&text_cell(student.category.as_deref()));
        table.push_str(&text_cell(student.name.as_deref()));
        table.push_str(&text_cell(student.school.as_deref()));
        table.push_str(&country_cell(session, student.country.as_deref()));
        table.push_str(&text_cell(student.selected.as_deref()));

        table.push_str("</tr>\n");
    }

    table.push_str("</tbody>\n</table>\n");
    table
}

fn text_cell(value: Option<&str>) -> String {
    format!("<td>{}</td>", escape_html(value.unwrap_or_default()))
}

/// The country column shows only the flag, with the name as its tooltip.
fn country_cell(session: &Session, country: Option<&str>) -> String {
    match country.and_then(|c| session.flag_for(c).map(|flag| (c, flag))) {
        Some((country, flag)) => format!(
            "<td><span class=\"flag-icon\" title=\"{}\">{}</span></td>",
            escape_html(country),
            flag
        ),
        None => "<td></td>".to_string(),
    }
}
