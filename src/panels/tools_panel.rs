use crate::BoardApp;
use crate::command::ActionId;
use crate::notify::{Toast, ToastKind};
use crate::stroke::{StrokeColor, Tool};

pub fn tools_panel(app: &mut BoardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            // Colour and eraser
            let pen = app.board().pen().clone();
            for color in [StrokeColor::Black, StrokeColor::White] {
                let selected = pen.tool == Tool::Pen && pen.color == color;
                let swatch = egui::Button::new(egui::RichText::new("⏺").color(color.to_color32()))
                    .fill(egui::Color32::from_gray(200))
                    .selected(selected);
                if ui.add(swatch).on_hover_text(color.as_str()).clicked() {
                    app.board_mut().set_color(color);
                }
            }
            let erasing = pen.tool == Tool::Eraser;
            if ui.selectable_label(erasing, "Eraser").clicked() {
                let tool = app.board_mut().toggle_eraser();
                log::info!("Tool selected from UI: {:?}", tool);
            }

            let mut width = pen.width;
            if ui
                .add(egui::Slider::new(&mut width, 1.0..=24.0).text("Width"))
                .changed()
            {
                app.board_mut().set_line_width(width);
            }

            ui.separator();

            let can_undo = app.board().can_undo();
            let can_redo = app.board().can_redo();
            if ui
                .add_enabled(can_undo, egui::Button::new(ActionId::Undo.label()))
                .clicked()
            {
                app.trigger(ActionId::Undo);
            }
            if ui
                .add_enabled(can_redo, egui::Button::new(ActionId::Redo.label()))
                .clicked()
            {
                app.trigger(ActionId::Redo);
            }

            ui.separator();

            let mut name = app.board().document().name().to_owned();
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(180.0))
                .changed()
            {
                app.board_mut().set_name(name);
            }

            for id in [ActionId::Save, ActionId::Export] {
                if ui.button(id.label()).clicked() {
                    app.trigger(id);
                }
            }
            if ui.button("Export PNG").clicked() {
                app.export_png();
            }
            if ui.button("Browse").clicked() {
                app.trigger(ActionId::Open);
            }
        });
    });
}

/// Draw one toast. Returns true if the user dismissed it.
pub fn toast_frame(ui: &mut egui::Ui, toast: &Toast) -> bool {
    let fill = match toast.kind {
        ToastKind::Success => egui::Color32::from_rgb(46, 125, 50),
        ToastKind::Error => egui::Color32::from_rgb(198, 40, 40),
        ToastKind::Info => egui::Color32::from_rgb(21, 101, 192),
    };

    let mut dismissed = false;
    egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
            dismissed = ui.small_button("✕").clicked();
        });
    });
    dismissed
}
