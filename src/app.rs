use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use futures::executor::block_on;

use crate::command::{Action, ActionId, KeyBinding, Outcome, default_key_bindings};
use crate::config::Config;
use crate::error::BoardError;
use crate::notify::{Notifier, Toasts};
use crate::panels::{self, FileBrowser};
use crate::state::{BoardContext, DirStore, WhiteboardId};

/// What survives a restart. Boards themselves live in the store.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct Persisted {
    last_board: Option<WhiteboardId>,
    line_width: Option<f32>,
}

/// The desktop whiteboard
pub struct BoardApp {
    board: BoardContext<DirStore, Toasts>,
    config: Config,
    key_bindings: Vec<KeyBinding>,
    browser: FileBrowser,
}

impl BoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, import: Option<PathBuf>) -> Self {
        let persisted: Persisted = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut app = Self::with_config(config);
        if let Some(width) = persisted.line_width {
            app.board.set_line_width(width);
        }

        match import {
            Some(path) => app.import(&path),
            None => {
                if let Some(id) = persisted.last_board {
                    app.reopen(id);
                }
            }
        }
        app
    }

    /// An app without an eframe context, on a fresh board
    pub fn with_config(config: Config) -> Self {
        let store = DirStore::new(config.storage_dir.clone());
        Self {
            board: BoardContext::new(store, Toasts::new(), &config),
            config,
            key_bindings: default_key_bindings(),
            browser: FileBrowser::default(),
        }
    }

    pub fn board(&self) -> &BoardContext<DirStore, Toasts> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut BoardContext<DirStore, Toasts> {
        &mut self.board
    }

    pub fn browser(&self) -> &FileBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut FileBrowser {
        &mut self.browser
    }

    /// Run an action and follow up on its outcome
    pub fn run(&mut self, action: Action) {
        // Failures are already reported as toasts by the board context
        let Ok(outcome) = block_on(self.board.dispatch(action)) else {
            return;
        };

        match outcome {
            Outcome::Exported { file_name, svg } => {
                let path = self.config.export_dir.join(&file_name);
                match fs::write(&path, svg) {
                    Ok(()) => {
                        log::info!("Exported {}", path.display());
                        self.board
                            .notifier_mut()
                            .success(format!("Exported {}", file_name));
                    }
                    Err(err) => self.report(BoardError::Export(err)),
                }
            }
            Outcome::BoardsChanged | Outcome::Saved(_) => {
                if self.browser.open {
                    self.refresh_boards();
                }
            }
            Outcome::Redraw | Outcome::Unchanged => {}
        }
    }

    /// Run the action bound to a key or toolbar button that needs no arguments
    pub fn trigger(&mut self, id: ActionId) {
        match id {
            ActionId::Undo => self.run(Action::Undo),
            ActionId::Redo => self.run(Action::Redo),
            ActionId::Save => self.run(Action::Save),
            ActionId::Export => self.run(Action::Export),
            ActionId::New => self.run(Action::New),
            ActionId::Open => self.open_browser(),
            ActionId::Rename | ActionId::Duplicate | ActionId::Delete => {
                log::debug!("{:?} needs a board; use the file browser", id);
            }
        }
    }

    pub fn export_png(&mut self) {
        let file_name = format!("{}.png", self.board.export_stem());
        let path = self.config.export_dir.join(&file_name);
        let written = self
            .board
            .export_png()
            .and_then(|png| fs::write(&path, png).map_err(BoardError::Export));
        match written {
            Ok(()) => {
                log::info!("Exported {}", path.display());
                self.board
                    .notifier_mut()
                    .success(format!("Exported {}", file_name));
            }
            Err(err) => self.report(err),
        }
    }

    pub fn open_browser(&mut self) {
        self.browser.open = true;
        self.refresh_boards();
    }

    pub fn refresh_boards(&mut self) {
        match block_on(self.board.list_whiteboards()) {
            Ok(boards) => self.browser.boards = boards,
            Err(err) => self.report(err.into()),
        }
    }

    fn import(&mut self, path: &std::path::Path) {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.config.default_name)
            .to_owned();
        let imported = fs::read_to_string(path)
            .map_err(|source| BoardError::Import {
                path: path.display().to_string(),
                source,
            })
            .and_then(|content| Ok(self.board.import_svg(&name, &content)?));
        match imported {
            Ok(issues) if issues.is_empty() => self
                .board
                .notifier_mut()
                .success(format!("Imported {}", path.display())),
            Ok(issues) => self.board.notifier_mut().info(format!(
                "Imported {}; {} path(s) could not be read fully",
                path.display(),
                issues.len()
            )),
            Err(err) => self.report(err),
        }
    }

    fn reopen(&mut self, id: WhiteboardId) {
        if let Err(err) = block_on(self.board.load(&id)) {
            // The board may have been deleted since last run; start fresh quietly
            log::warn!("Could not reopen whiteboard {}: {}", id, err);
        }
    }

    // Toasts log what they show
    fn report(&mut self, err: BoardError) {
        self.board.notifier_mut().error(err.to_string());
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let bindings = self.key_bindings.clone();
        for binding in bindings {
            if ctx.input_mut(|i| i.consume_shortcut(&binding.shortcut)) {
                self.trigger(binding.action);
            }
        }
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        let toasts = self.board.notifier_mut();
        toasts.prune(Instant::now());
        if toasts.is_empty() {
            return;
        }

        let mut dismissed = Vec::new();
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for toast in toasts.iter() {
                    if panels::toast_frame(ui, toast) {
                        dismissed.push(toast.id);
                    }
                }
            });
        for id in dismissed {
            toasts.remove(id);
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl eframe::App for BoardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = Persisted {
            last_board: self.board.document().id().cloned(),
            line_width: Some(self.board.pen().width),
        };
        eframe::set_value(storage, eframe::APP_KEY, &persisted);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::file_browser(self, ctx);

        self.show_toasts(ctx);
    }
}
