//! Reader for the `d` attribute of board paths.
//!
//! Only absolute move-to (`M`) and line-to (`L`) are understood. Reading stops
//! at the first segment outside that subset, at a second move-to, or at a
//! syntax error; the points read so far are kept.

use egui::{Pos2, pos2};
use svgtypes::{PathParser, PathSegment};

use crate::error::PathError;

/// Points read from one path, plus the reason reading stopped early (if it did).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathPoints {
    pub points: Vec<Pos2>,
    pub stopped: Option<PathError>,
}

/// Read the points of a path's `d` attribute.
pub fn parse_path_data(data: &str) -> PathPoints {
    let mut points = Vec::new();
    let mut stopped = None;
    let mut seen_move = false;

    for segment in PathParser::from(data) {
        let segment = match segment {
            Ok(segment) => segment,
            Err(err) => {
                stopped = Some(PathError::Syntax(err.to_string()));
                break;
            }
        };

        let (x, y) = match segment {
            PathSegment::MoveTo { abs: true, .. } if seen_move => {
                stopped = Some(PathError::MultipleSubpaths);
                break;
            }
            PathSegment::MoveTo { abs: true, x, y } => {
                seen_move = true;
                (x, y)
            }
            PathSegment::LineTo { abs: true, x, y } => (x, y),
            other => {
                stopped = Some(PathError::UnsupportedCommand(command_letter(&other)));
                break;
            }
        };

        match to_point(x, y) {
            Some(point) => points.push(point),
            None => {
                let bad = if (x as f32).is_finite() { y } else { x };
                stopped = Some(PathError::InvalidNumber(format!("{:e}", bad)));
                break;
            }
        }
    }

    PathPoints { points, stopped }
}

// Board coordinates are f32; values that overflow it are rejected.
fn to_point(x: f64, y: f64) -> Option<Pos2> {
    let point = pos2(x as f32, y as f32);
    (point.x.is_finite() && point.y.is_finite()).then_some(point)
}

fn command_letter(segment: &PathSegment) -> char {
    let (letter, abs) = match *segment {
        PathSegment::MoveTo { abs, .. } => ('M', abs),
        PathSegment::LineTo { abs, .. } => ('L', abs),
        PathSegment::HorizontalLineTo { abs, .. } => ('H', abs),
        PathSegment::VerticalLineTo { abs, .. } => ('V', abs),
        PathSegment::CurveTo { abs, .. } => ('C', abs),
        PathSegment::SmoothCurveTo { abs, .. } => ('S', abs),
        PathSegment::Quadratic { abs, .. } => ('Q', abs),
        PathSegment::SmoothQuadratic { abs, .. } => ('T', abs),
        PathSegment::EllipticalArc { abs, .. } => ('A', abs),
        PathSegment::ClosePath { abs } => ('Z', abs),
    };
    if abs { letter } else { letter.to_ascii_lowercase() }
}
