use std::fmt::Write;

use crate::stroke::Stroke;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serialize a stroke log as a standalone SVG document.
///
/// The document is `width` x `height` pixels with a white background and one
/// `<path>` per stroke, in log order so later strokes paint over earlier ones.
/// Every point of every stroke is written; nothing is simplified.
pub fn encode(strokes: &[Stroke], width: u32, height: u32) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg width="{width}" height="{height}" xmlns="{SVG_NAMESPACE}">"#
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    svg.push('\n');

    for stroke in strokes {
        let _ = writeln!(
            svg,
            r#"<path d="{}" stroke="{}" stroke-width="{}" fill="none" stroke-linecap="round" stroke-linejoin="round"/>"#,
            stroke_path_data(stroke),
            escape_xml(stroke.color().as_str()),
            stroke.width(),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// `M x,y L x,y ...` for every point of the stroke.
///
/// `f32` formatting is the shortest text that parses back to the same value,
/// which is what keeps save/load lossless.
pub fn stroke_path_data(stroke: &Stroke) -> String {
    let mut d = String::new();
    for (i, point) in stroke.points().iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{},{}", command, point.x, point.y);
    }
    d
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            // Raw whitespace in an attribute is normalised to a space on read
            '\t' => s.push_str("&#9;"),
            '\n' => s.push_str("&#10;"),
            '\r' => s.push_str("&#13;"),
            _ => s.push(ch),
        }
    }
    s
}
