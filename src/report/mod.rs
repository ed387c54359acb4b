//! Report generation.
//!
//! The HTML page is the primary output; JSON and Markdown summaries are
//! available for scripting and quick reading.

pub mod generator;
pub mod html;

pub use generator::{generate_json_report, generate_markdown_report};
pub use html::render_page;

/// Escape text for use in HTML content or attribute values.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#x27;Neil &amp; co&lt;/a&gt;"
        );
    }
}
