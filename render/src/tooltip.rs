//! Tooltip overlay for the hovered cell.
//!
//! A dark label box with two rows, `Date` and `User Count`, drawn in canvas
//! coordinates on top of the plot.  Pointer events pass through it.

use std::fmt::Write as _;

use heatmap_common::scene::escape_xml;
use heatmap_common::InteractionData;

const ROW_HEIGHT: f64 = 18.0;
const PADDING: f64 = 8.0;
/// Rough advance of one 12px sans-serif glyph.
const CHAR_WIDTH: f64 = 7.0;

/// The two `(label, value)` rows shown in the box.
pub fn rows(data: &InteractionData) -> [(&'static str, String); 2] {
    [
        ("Date", data.label.clone()),
        ("User Count", data.count.to_string()),
    ]
}

/// SVG markup for the tooltip, or an empty string when nothing is hovered.
pub fn overlay(data: Option<&InteractionData>, width: f64, height: f64) -> String {
    let Some(data) = data else {
        return String::new();
    };

    let rows = rows(data);
    let longest = rows
        .iter()
        .map(|(label, value)| label.len() + 2 + value.chars().count())
        .max()
        .unwrap_or(0);
    let box_width = longest as f64 * CHAR_WIDTH + 2.0 * PADDING;
    let box_height = rows.len() as f64 * ROW_HEIGHT + PADDING;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"  <svg x="0" y="0" width="{width}" height="{height}" overflow="visible" pointer-events="none">"#
    );
    let _ = writeln!(
        out,
        r#"    <g class="tooltip" transform="translate({},{})">"#,
        data.x_pos, data.y_pos
    );
    let _ = writeln!(
        out,
        r#"      <rect width="{box_width}" height="{box_height}" rx="4" fill="rgba(0,0,0,0.8)"/>"#
    );
    for (i, (label, value)) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"      <text x="{PADDING}" y="{}" font-size="12" fill="white"><tspan font-weight="bold">{label}</tspan>: {}</text>"#,
            PADDING + ROW_HEIGHT * (i as f64 + 0.5),
            escape_xml(value)
        );
    }
    out.push_str("    </g>\n  </svg>\n");
    out
}
