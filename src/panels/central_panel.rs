use crate::BoardApp;
use crate::renderer::{self, PainterSurface};

/// The drawing canvas. Strokes are recorded in board coordinates, relative to
/// the canvas' top-left corner.
pub fn central_panel(app: &mut BoardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            app.board_mut()
                .set_canvas_size(rect.width().round() as u32, rect.height().round() as u32);

            let mut surface = PainterSurface::new(&painter, rect);
            handle_input(app, ctx, &response, &surface);

            renderer::render(app.board().document().strokes(), &mut surface);
            if let Some(active) = app.board().active_stroke() {
                renderer::render_preview(active, &mut surface);
            }
        });
}

fn handle_input(
    app: &mut BoardApp,
    ctx: &egui::Context,
    response: &egui::Response,
    surface: &PainterSurface<'_>,
) {
    if response.drag_started() {
        // The drag only starts after a small movement; begin at the press point
        let start = ctx
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(start) = start {
            app.board_mut().pointer_down(surface.to_board(start));
        }
    }

    if app.board().active_stroke().is_none() {
        return;
    }

    let inside = ctx
        .input(|i| i.pointer.hover_pos())
        .is_some_and(|pos| response.rect.contains(pos));
    if !response.dragged() || !inside {
        // Released, or the pointer left the canvas
        if app.board_mut().pointer_up() {
            log::debug!("Stroke committed");
        }
        return;
    }

    // Repaints during a drag must not repeat the last point
    if response.drag_delta() != egui::Vec2::ZERO {
        if let Some(pos) = response.interact_pointer_pos() {
            app.board_mut().pointer_move(surface.to_board(pos));
        }
    }
}
