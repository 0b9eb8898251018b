use egui::{Color32, Pos2};
use std::fmt;

/// Width used when a stroke is created or decoded without a usable width.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Fewest points a stroke needs before it can enter the history.
pub const MIN_STROKE_POINTS: usize = 2;

/// Geometry tag of a stroke. Only freehand polylines exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeKind {
    #[default]
    Path,
}

impl StrokeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeKind::Path => "path",
        }
    }
}

/// The drawing tool that produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

/// Foreground colour of a stroke.
///
/// The board palette is monochrome. `Other` keeps colours read from SVG
/// files that were not written by this board, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StrokeColor {
    #[default]
    Black,
    White,
    Other(String),
}

impl StrokeColor {
    /// Colour painted by the eraser: the board background.
    pub const ERASER: StrokeColor = StrokeColor::White;

    /// Parse an SVG `stroke` attribute value. Matching is exact so that
    /// foreign values survive a save/load cycle unchanged.
    pub fn parse(value: &str) -> Self {
        match value {
            "black" => StrokeColor::Black,
            "white" => StrokeColor::White,
            other => StrokeColor::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StrokeColor::Black => "black",
            StrokeColor::White => "white",
            StrokeColor::Other(value) => value,
        }
    }

    /// Resolve to a paintable colour. Understands the palette names and
    /// `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa` hex; anything else paints black.
    pub fn to_color32(&self) -> Color32 {
        match self {
            StrokeColor::Black => Color32::BLACK,
            StrokeColor::White => Color32::WHITE,
            StrokeColor::Other(value) => {
                let hex = value.trim();
                // Hex digits are ASCII; this keeps the parser off multi-byte input
                let parsed = hex.is_ascii().then(|| Color32::from_hex(hex).ok()).flatten();
                parsed.unwrap_or_else(|| {
                    log::debug!("Unknown stroke colour {:?}, painting black", value);
                    Color32::BLACK
                })
            }
        }
    }
}

impl fmt::Display for StrokeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace widths that cannot be drawn with the default.
pub fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_LINE_WIDTH
    }
}

fn is_finite_point(point: Pos2) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// A committed freehand stroke. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    kind: StrokeKind,
    tool: Tool,
    color: StrokeColor,
    width: f32,
    points: Vec<Pos2>,
}

impl Stroke {
    /// Build a committed stroke directly. Returns `None` when fewer than
    /// two finite points remain after filtering.
    pub fn new(tool: Tool, color: StrokeColor, width: f32, points: Vec<Pos2>) -> Option<Self> {
        let points: Vec<Pos2> = points.into_iter().filter(|p| is_finite_point(*p)).collect();
        if points.len() < MIN_STROKE_POINTS {
            return None;
        }
        Some(Self {
            kind: StrokeKind::Path,
            tool,
            color,
            width: sanitize_width(width),
            points,
        })
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &StrokeColor {
        &self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}

/// The stroke being drawn while the pointer is down.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    tool: Tool,
    color: StrokeColor,
    width: f32,
    points: Vec<Pos2>,
}

impl StrokeBuilder {
    /// Start accumulating a stroke at `origin`.
    ///
    /// Eraser strokes always paint the background colour.
    pub fn begin(origin: Pos2, tool: Tool, color: StrokeColor, width: f32) -> Self {
        let color = match tool {
            Tool::Pen => color,
            Tool::Eraser => StrokeColor::ERASER,
        };
        let mut builder = Self {
            tool,
            color,
            width: sanitize_width(width),
            points: Vec::new(),
        };
        builder.extend(origin);
        builder
    }

    /// Add a point to the stroke. Points with non-finite coordinates are
    /// dropped.
    pub fn extend(&mut self, point: Pos2) {
        if is_finite_point(point) {
            self.points.push(point);
        }
    }

    /// Finalize the stroke. Degenerate strokes are discarded.
    pub fn commit(self) -> Option<Stroke> {
        if self.points.len() < MIN_STROKE_POINTS {
            log::debug!("Discarding stroke with {} point(s)", self.points.len());
            return None;
        }
        Some(Stroke {
            kind: StrokeKind::Path,
            tool: self.tool,
            color: self.color,
            width: self.width,
            points: self.points,
        })
    }

    // Get a reference to the points for preview
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &StrokeColor {
        &self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}
