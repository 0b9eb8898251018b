use crate::BoardApp;
use crate::command::{Action, ActionId};
use crate::state::{WhiteboardId, WhiteboardMeta, filter_by_name, format_modified_local};

/// State of the "Open Whiteboard" window
#[derive(Debug, Default)]
pub struct FileBrowser {
    pub open: bool,
    pub search: String,
    /// Last listing from the store, newest first
    pub boards: Vec<WhiteboardMeta>,
    /// Board being renamed and the name typed so far
    pub renaming: Option<(WhiteboardId, String)>,
    /// Board waiting for delete confirmation
    pub confirm_delete: Option<WhiteboardMeta>,
}

pub fn file_browser(app: &mut BoardApp, ctx: &egui::Context) {
    if !app.browser().open {
        return;
    }

    let mut open = true;
    let mut pending: Option<Action> = None;
    let current = app.board().document().id().cloned();
    let browser = app.browser_mut();

    egui::Window::new("Open Whiteboard")
        .open(&mut open)
        .collapsible(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search");
                ui.text_edit_singleline(&mut browser.search);
                if ui.button(ActionId::New.label()).clicked() {
                    pending = Some(Action::New);
                }
            });
            ui.separator();

            let found = filter_by_name(&browser.boards, &browser.search);
            if found.is_empty() {
                ui.label(if browser.boards.is_empty() {
                    "No saved whiteboards yet"
                } else {
                    "No whiteboards match your search"
                });
            }

            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                egui::Grid::new("whiteboard_grid")
                    .num_columns(3)
                    .spacing([16.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for meta in found {
                            let is_current = current.as_ref() == Some(&meta.id);
                            let label = egui::RichText::new(&meta.name);
                            ui.label(if is_current { label.strong() } else { label });
                            ui.label(format_modified_local(&meta.modified));

                            ui.horizontal(|ui| {
                                if ui.button(ActionId::Open.label()).clicked() {
                                    pending = Some(Action::Open(meta.id.clone()));
                                }
                                if ui.button(ActionId::Rename.label()).clicked() {
                                    browser.renaming = Some((meta.id.clone(), meta.name.clone()));
                                }
                                if ui.button(ActionId::Duplicate.label()).clicked() {
                                    pending = Some(Action::Duplicate(meta.id.clone()));
                                }
                                if ui.button(ActionId::Delete.label()).clicked() {
                                    browser.confirm_delete = Some(meta.clone());
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        });

    if let Some(action) = rename_prompt(ctx, browser) {
        pending = Some(action);
    }
    if let Some(action) = delete_prompt(ctx, browser) {
        pending = Some(action);
    }

    if !open {
        browser.open = false;
    }
    if let Some(action) = pending {
        if matches!(action, Action::Open(_) | Action::New) {
            browser.open = false;
        }
        app.run(action);
    }
}

fn rename_prompt(ctx: &egui::Context, browser: &mut FileBrowser) -> Option<Action> {
    let (id, name) = browser.renaming.as_mut()?;
    let mut action = None;
    let mut close = false;

    egui::Window::new("Rename Whiteboard")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let edit = ui.text_edit_singleline(name);
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.horizontal(|ui| {
                if ui.button("Rename").clicked() || submitted {
                    let trimmed = name.trim();
                    if !trimmed.is_empty() {
                        action = Some(Action::Rename {
                            id: id.clone(),
                            name: trimmed.to_owned(),
                        });
                    }
                    close = true;
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

    if close {
        browser.renaming = None;
    }
    action
}

fn delete_prompt(ctx: &egui::Context, browser: &mut FileBrowser) -> Option<Action> {
    let meta = browser.confirm_delete.as_ref()?;
    let mut action = None;
    let mut close = false;

    egui::Window::new("Delete Whiteboard")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!(
                "Are you sure you want to delete \"{}\"? This cannot be undone.",
                meta.name
            ));
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    action = Some(Action::Delete(meta.id.clone()));
                    close = true;
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

    if close {
        browser.confirm_delete = None;
    }
    action
}
