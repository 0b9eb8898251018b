use crate::error::{DecodeError, PathError};
use crate::stroke::{DEFAULT_LINE_WIDTH, MIN_STROKE_POINTS, Stroke, StrokeColor, Tool, sanitize_width};

use super::path_data::parse_path_data;

/// A path that was dropped or cut short while decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct PathIssue {
    /// Position of the `<path>` among all paths in the document
    pub index: usize,
    pub error: PathError,
    /// Whether a stroke was still recovered from the points read before the problem
    pub kept: bool,
}

/// Result of decoding a board document.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// Strokes in document order, oldest first
    pub strokes: Vec<Stroke>,
    /// Canvas size from the root element, when it carries pixel dimensions
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub issues: Vec<PathIssue>,
}

/// Rebuild a stroke log from an SVG document.
///
/// Every `<path>` becomes a pen stroke in document order. Paths that cannot
/// be read are skipped (or truncated to their readable prefix) and listed in
/// [`Decoded::issues`]; only a document that is not SVG at all is an error.
pub fn decode(document: &str) -> Result<Decoded, DecodeError> {
    let doc = roxmltree::Document::parse(document)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(DecodeError::NotSvg(root.tag_name().name().to_owned()));
    }

    let mut decoded = Decoded {
        width: root.attribute("width").and_then(parse_dimension),
        height: root.attribute("height").and_then(parse_dimension),
        ..Default::default()
    };

    let paths = root
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "path");

    for (index, node) in paths.enumerate() {
        let Some(data) = node.attribute("d") else {
            decoded.issues.push(PathIssue {
                index,
                error: PathError::MissingData,
                kept: false,
            });
            continue;
        };

        let parsed = parse_path_data(data);
        let point_count = parsed.points.len();
        let color = node
            .attribute("stroke")
            .map(StrokeColor::parse)
            .unwrap_or_default();
        let width = node
            .attribute("stroke-width")
            .and_then(parse_length)
            .map(sanitize_width)
            .unwrap_or(DEFAULT_LINE_WIDTH);

        let stroke = Stroke::new(Tool::Pen, color, width, parsed.points);
        let kept = stroke.is_some();
        if let Some(stroke) = stroke {
            decoded.strokes.push(stroke);
        }

        let error = match parsed.stopped {
            Some(error) => Some(error),
            None if point_count < MIN_STROKE_POINTS => Some(PathError::TooFewPoints(point_count)),
            None => None,
        };
        if let Some(error) = error {
            decoded.issues.push(PathIssue { index, error, kept });
        }
    }

    for issue in &decoded.issues {
        if issue.kept {
            log::warn!("Path {} truncated while decoding: {}", issue.index, issue.error);
        } else {
            log::warn!("Path {} skipped while decoding: {}", issue.index, issue.error);
        }
    }
    log::debug!(
        "Decoded {} stroke(s), {} path issue(s)",
        decoded.strokes.len(),
        decoded.issues.len()
    );

    Ok(decoded)
}

/// Parse an SVG length such as `2`, `2.5px`. Other units are not understood.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.trim().parse::<f32>().ok()
}

fn parse_dimension(value: &str) -> Option<u32> {
    let length = parse_length(value)?;
    if length.is_finite() && length >= 1.0 && length <= u32::MAX as f32 {
        Some(length.round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_width_defaults_to_two() {
        let decoded = decode(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0 L5,5" stroke="black"/></svg>"#,
        )
        .unwrap();
        assert_eq!(decoded.strokes.len(), 1);
        assert_eq!(decoded.strokes[0].width(), 2.0);
        assert_eq!(decoded.width, None);
    }

    #[test]
    fn test_unparsable_width_defaults_to_two() {
        let decoded = decode(
            r#"<svg width="300px" height="200"><path d="M0,0 L5,5" stroke-width="thick"/></svg>"#,
        )
        .unwrap();
        assert_eq!(decoded.strokes[0].width(), 2.0);
        assert_eq!(decoded.strokes[0].color(), &StrokeColor::Black);
        assert_eq!(decoded.width, Some(300));
        assert_eq!(decoded.height, Some(200));
    }

    #[test]
    fn test_short_path_is_dropped() {
        let decoded = decode(r#"<svg><path d="M3,3" stroke="white"/></svg>"#).unwrap();
        assert!(decoded.strokes.is_empty());
        assert_eq!(
            decoded.issues,
            vec![PathIssue {
                index: 0,
                error: PathError::TooFewPoints(1),
                kept: false,
            }]
        );
    }

    #[test]
    fn test_missing_data_is_reported() {
        let decoded = decode(r#"<svg><path stroke="black"/><path d="M0,0 L1,1"/></svg>"#).unwrap();
        assert_eq!(decoded.strokes.len(), 1);
        assert_eq!(decoded.issues[0].error, PathError::MissingData);
    }

    #[test]
    fn test_nested_paths_are_found_in_order() {
        let decoded = decode(
            r#"<svg><g><path d="M0,0 L1,1" stroke="black"/></g><path d="M2,2 L3,3" stroke="white"/></svg>"#,
        )
        .unwrap();
        assert_eq!(decoded.strokes.len(), 2);
        assert_eq!(decoded.strokes[0].points()[0], pos2(0.0, 0.0));
        assert_eq!(decoded.strokes[1].color(), &StrokeColor::White);
    }

    #[test]
    fn test_truncated_path_keeps_prefix() {
        let decoded = decode(r#"<svg><path d="M0,0 L4,4 Q5,5 6,6"/></svg>"#).unwrap();
        assert_eq!(decoded.strokes.len(), 1);
        assert_eq!(decoded.strokes[0].points().len(), 2);
        assert!(decoded.issues[0].kept);
    }

    #[test]
    fn test_not_svg() {
        assert!(matches!(decode("<html/>"), Err(DecodeError::NotSvg(name)) if name == "html"));
        assert!(matches!(decode("<svg><path"), Err(DecodeError::Xml(_))));
    }
}
