//! Replays a stroke log onto a drawing surface.
//!
//! Rendering is a pure function of the log and the surface size: the canvas
//! is cleared and every stroke is drawn again, oldest first. History
//! operations therefore never track damage, they just render again.

use std::io::Cursor;

use egui::{Color32, Painter, Pos2, Rect, Vec2};
use image::{ImageFormat, RgbaImage};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use crate::error::{BoardError, BoardResult};
use crate::stroke::{Stroke, StrokeBuilder};

/// Colour the board is cleared to before strokes are replayed.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Something strokes can be drawn on.
pub trait Surface {
    /// Size of the drawable area in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with one colour
    fn clear(&mut self, color: Color32);

    /// Draw a connected polyline with round caps and joins
    fn stroke_polyline(&mut self, points: &[Pos2], color: Color32, width: f32);
}

/// Clear `surface` and draw `strokes` onto it in log order.
pub fn render<S: Surface + ?Sized>(strokes: &[Stroke], surface: &mut S) {
    surface.clear(BACKGROUND);
    for stroke in strokes {
        surface.stroke_polyline(stroke.points(), stroke.color().to_color32(), stroke.width());
    }
}

/// Draw the stroke that is still being drawn on top of a rendered log.
pub fn render_preview<S: Surface + ?Sized>(builder: &StrokeBuilder, surface: &mut S) {
    surface.stroke_polyline(builder.points(), builder.color().to_color32(), builder.width());
}

/// Render a log offscreen and encode the result as PNG.
pub fn render_png(strokes: &[Stroke], width: u32, height: u32) -> BoardResult<Vec<u8>> {
    let mut surface = RasterSurface::new(width, height)?;
    render(strokes, &mut surface);
    surface.to_png()
}

/// Offscreen raster surface backed by a tiny-skia pixmap.
///
/// Anti-aliased and deterministic: the same log always yields the same pixels.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> BoardResult<Self> {
        Pixmap::new(width, height)
            .map(|pixmap| Self { pixmap })
            .ok_or(BoardError::EmptyCanvas { width, height })
    }

    /// Colour of one pixel, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Raw premultiplied RGBA bytes, row by row
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn to_image(&self) -> RgbaImage {
        let (width, height) = self.size();
        let mut image = RgbaImage::new(width, height);
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    pub fn to_png(&self) -> BoardResult<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.to_image().write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self, color: Color32) {
        self.pixmap.fill(to_skia(color));
    }

    fn stroke_polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        if rest.is_empty() {
            // A lone point still leaves a round dot
            pb.line_to(first.x, first.y);
        }
        for point in rest {
            pb.line_to(point.x, point.y);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(to_skia(color));
        paint.anti_alias = true;
        let stroke = tiny_skia::Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn to_skia(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// The live canvas: an egui painter clipped to the board rectangle.
///
/// Board coordinates are relative to the top-left corner of `rect`.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        point + self.rect.min.to_vec2()
    }

    /// Convert a screen position to board coordinates
    pub fn to_board(&self, screen: Pos2) -> Pos2 {
        (screen - self.rect.min).to_pos2()
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> (u32, u32) {
        let size: Vec2 = self.rect.size();
        (size.x.max(0.0) as u32, size.y.max(0.0) as u32)
    }

    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        if points.is_empty() {
            return;
        }
        let screen: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();

        // egui lines have butt caps; round the ends off by hand
        let radius = width / 2.0;
        if let (Some(first), Some(last)) = (screen.first(), screen.last()) {
            self.painter.circle_filled(*first, radius, color);
            self.painter.circle_filled(*last, radius, color);
        }
        if screen.len() >= 2 {
            self.painter
                .add(egui::Shape::line(screen, egui::Stroke::new(width, color)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{StrokeColor, Tool};
    use egui::pos2;

    fn diagonal(color: StrokeColor, width: f32) -> Stroke {
        Stroke::new(Tool::Pen, color, width, vec![pos2(0.0, 0.0), pos2(63.0, 63.0)]).unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let log = vec![
            diagonal(StrokeColor::Black, 4.0),
            Stroke::new(
                Tool::Pen,
                StrokeColor::Black,
                2.0,
                vec![pos2(10.0, 50.0), pos2(50.0, 10.0), pos2(60.0, 40.0)],
            )
            .unwrap(),
        ];

        let mut first = RasterSurface::new(64, 64).unwrap();
        let mut second = RasterSurface::new(64, 64).unwrap();
        render(&log, &mut first);
        render(&log, &mut second);
        assert_eq!(first.data(), second.data());

        // Rendering again onto a used surface gives the same pixels too
        render(&log, &mut first);
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_strokes_paint_over_background() {
        let mut surface = RasterSurface::new(64, 64).unwrap();
        render(&[diagonal(StrokeColor::Black, 6.0)], &mut surface);

        assert_eq!(surface.pixel(32, 32), Some(Color32::BLACK));
        assert_eq!(surface.pixel(60, 5), Some(Color32::WHITE));
        assert_eq!(surface.pixel(64, 0), None);
    }

    #[test]
    fn test_later_strokes_paint_over_earlier() {
        let mut surface = RasterSurface::new(64, 64).unwrap();
        let log = vec![
            diagonal(StrokeColor::Black, 6.0),
            diagonal(StrokeColor::White, 10.0),
        ];
        render(&log, &mut surface);
        assert_eq!(surface.pixel(32, 32), Some(Color32::WHITE));
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(BoardError::EmptyCanvas { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_render_png_signature() {
        let png = render_png(&[diagonal(StrokeColor::Black, 2.0)], 16, 16).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_painter_surface_coordinates() {
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(200.0, 80.0));
        let painter = Painter::new(ctx, egui::LayerId::background(), rect);
        let mut surface = PainterSurface::new(&painter, rect);

        assert_eq!(surface.size(), (200, 80));
        assert_eq!(surface.to_board(pos2(110.0, 60.0)), pos2(10.0, 10.0));
        render(&[diagonal(StrokeColor::Black, 2.0)], &mut surface);
    }
}
