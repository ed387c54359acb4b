//! Doughnut and pie figures built from stroked circles.
//!
//! Each slice is a circle whose dash pattern covers its share of the
//! circumference, so a single slice covering 100% needs no special case.

use super::{ChartKind, ChartSpec};
use crate::models::FlagMap;
use crate::report::escape_html;
use std::f64::consts::PI;

const VIEWBOX: f64 = 200.0;
const CENTER: f64 = VIEWBOX / 2.0;

/// Radius and stroke width for a chart kind.
///
/// The stroke is centred on the radius, so a pie uses a stroke as wide as
/// the full disc to fill it in.
fn ring_geometry(kind: ChartKind) -> (f64, f64) {
    match kind {
        ChartKind::Doughnut => (70.0, 40.0),
        ChartKind::Pie => (45.0, 90.0),
    }
}

/// Render a chart as a `<figure>` holding the SVG and its legend.
pub fn render_chart(id: &str, spec: &ChartSpec, flags: &FlagMap) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<figure class=\"chart chart-{}\" id=\"{}\">",
        kind_class(spec.kind),
        escape_html(id)
    ));
    out.push_str(&format!(
        "<figcaption>{}</figcaption>",
        escape_html(&spec.title)
    ));
    out.push_str(&render_svg(spec));
    out.push_str(&render_legend(spec, flags));
    out.push_str("</figure>");

    out
}

fn kind_class(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Doughnut => "doughnut",
        ChartKind::Pie => "pie",
    }
}

/// Render just the SVG disc or ring.
fn render_svg(spec: &ChartSpec) -> String {
    let (radius, width) = ring_geometry(spec.kind);
    let circumference = 2.0 * PI * radius;
    let total = spec.total();

    let mut svg = format!(
        "<svg viewBox=\"0 0 {v} {v}\" role=\"img\" aria-label=\"{label}\">",
        v = VIEWBOX,
        label = escape_html(&spec.title)
    );

    if total == 0 {
        svg.push_str(&format!(
            "<circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"none\" stroke=\"#E0E0E0\" stroke-width=\"{w}\"/>",
            c = CENTER,
            r = radius,
            w = width
        ));
        svg.push_str(&format!(
            "<text x=\"{c}\" y=\"{c}\" text-anchor=\"middle\" dominant-baseline=\"middle\">No data</text>",
            c = CENTER
        ));
        svg.push_str("</svg>");
        return svg;
    }

    let mut offset = 0.0;
    for (index, (label, &value)) in spec.labels.iter().zip(&spec.values).enumerate() {
        if value == 0 {
            continue;
        }

        let length = circumference * value as f64 / total as f64;
        svg.push_str(&format!(
            "<circle class=\"slice\" cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{w}\" \
             stroke-dasharray=\"{len:.3} {circ:.3}\" stroke-dashoffset=\"{off:.3}\" transform=\"rotate(-90 {c} {c})\">",
            c = CENTER,
            r = radius,
            w = width,
            color = escape_html(spec.color(index)),
            len = length,
            circ = circumference,
            off = -offset,
        ));
        svg.push_str(&format!(
            "<title>{}</title></circle>",
            escape_html(&tooltip(label, value))
        ));
        offset += length;
    }

    svg.push_str("</svg>");
    svg
}

/// Tooltip text for one slice.
pub fn tooltip(label: &str, value: usize) -> String {
    format!("{}: {}", label, value)
}

fn render_legend(spec: &ChartSpec, flags: &FlagMap) -> String {
    let mut legend = String::from("<ul class=\"chart-legend\">");

    for (index, label) in spec.labels.iter().enumerate() {
        let flag = spec
            .flag_keys
            .get(index)
            .and_then(|key| key.as_deref())
            .and_then(|country| flags.get(country))
            .map(|markup| format!("<span class=\"flag-icon\">{}</span>", markup))
            .unwrap_or_default();

        legend.push_str(&format!(
            "<li><span class=\"swatch\" style=\"background:{}\"></span>{}{}</li>",
            escape_html(spec.color(index)),
            flag,
            escape_html(label)
        ));
    }

    legend.push_str("</ul>");
    legend
}
