//! The application context of a board session.
//!
//! `BoardContext` owns everything one board session needs: the open
//! [`Document`], the whiteboard store, the notifier used to talk to the user,
//! the current pen settings and the stroke being drawn. Nothing is global; the
//! UI constructs one context and passes it wherever it is needed.
//!
//! # Example
//!
//! ```
//! use monoboard::{BoardContext, Config, LogNotifier, MemoryStore};
//! use egui::pos2;
//!
//! let mut board = BoardContext::new(MemoryStore::new(), LogNotifier, &Config::default());
//!
//! board.pointer_down(pos2(0.0, 0.0));
//! board.pointer_move(pos2(40.0, 25.0));
//! assert!(board.pointer_up());
//!
//! let id = futures::executor::block_on(board.save()).unwrap();
//! assert_eq!(board.document().id(), Some(&id));
//! ```

use egui::Pos2;

use crate::command::{Action, Outcome};
use crate::config::Config;
use crate::document::Document;
use crate::error::{BoardError, BoardResult, DecodeError, StorageError};
use crate::notify::Notifier;
use crate::renderer;
use crate::stroke::{StrokeBuilder, StrokeColor, Tool, sanitize_width};
use crate::svg::{self, PathIssue};

use super::persistence::{StorageResult, WhiteboardId, WhiteboardMeta, WhiteboardStore};

/// Tool, colour and width used for the next stroke
#[derive(Debug, Clone, PartialEq)]
pub struct PenSettings {
    pub tool: Tool,
    pub color: StrokeColor,
    pub width: f32,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: StrokeColor::Black,
            width: crate::stroke::DEFAULT_LINE_WIDTH,
        }
    }
}

/// The main context of a board session.
#[derive(Debug)]
pub struct BoardContext<S, N> {
    document: Document,
    store: S,
    notifier: N,
    pen: PenSettings,
    /// The stroke being drawn while the pointer is down
    active: Option<StrokeBuilder>,
    default_name: String,
}

impl<S: WhiteboardStore, N: Notifier> BoardContext<S, N> {
    pub fn new(store: S, notifier: N, config: &Config) -> Self {
        Self {
            document: Document::new(
                config.default_name.clone(),
                (config.canvas_width, config.canvas_height),
            ),
            store,
            notifier,
            pen: PenSettings {
                width: sanitize_width(config.line_width),
                ..Default::default()
            },
            active: None,
            default_name: config.default_name.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn pen(&self) -> &PenSettings {
        &self.pen
    }

    /// Pick a palette colour. Picking a colour also leaves the eraser.
    pub fn set_color(&mut self, color: StrokeColor) {
        log::debug!("Color set to: {}", color);
        self.pen.color = color;
        self.pen.tool = Tool::Pen;
    }

    /// Switch between pen and eraser, returning the new tool
    pub fn toggle_eraser(&mut self) -> Tool {
        self.pen.tool = match self.pen.tool {
            Tool::Pen => Tool::Eraser,
            Tool::Eraser => Tool::Pen,
        };
        self.pen.tool
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.pen.width = sanitize_width(width);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.document.set_name(name);
    }

    /// Record the canvas size the board is being drawn at
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.document.set_canvas_size((width, height));
    }

    // --- Drawing -----------------------------------------------------------

    /// Pointer pressed on the canvas: start a stroke
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.active.is_some() {
            log::debug!("Pointer down while a stroke is active, dropping the old stroke");
        }
        self.active = Some(StrokeBuilder::begin(
            pos,
            self.pen.tool,
            self.pen.color.clone(),
            self.pen.width,
        ));
    }

    /// Pointer moved; only extends a stroke while the pointer is down
    pub fn pointer_move(&mut self, pos: Pos2) {
        if let Some(builder) = &mut self.active {
            builder.extend(pos);
        }
    }

    /// Pointer released or left the canvas. Returns true if a stroke was committed.
    pub fn pointer_up(&mut self) -> bool {
        match self.active.take().and_then(StrokeBuilder::commit) {
            Some(stroke) => {
                self.document.history_mut().append(stroke);
                true
            }
            None => false,
        }
    }

    /// The stroke being drawn, for previews
    pub fn active_stroke(&self) -> Option<&StrokeBuilder> {
        self.active.as_ref()
    }

    pub fn undo(&mut self) -> bool {
        self.document.history_mut().undo()
    }

    pub fn redo(&mut self) -> bool {
        self.document.history_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.document.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.history().can_redo()
    }

    // --- Boards ------------------------------------------------------------

    /// Show a board whose content was fetched elsewhere.
    ///
    /// The canvas takes the document's size when it records one. The
    /// document is decoded first; if it cannot be read at all the current
    /// board is left exactly as it was. Paths that could not be read are
    /// returned so the caller can mention them.
    pub fn open_whiteboard(
        &mut self,
        id: Option<WhiteboardId>,
        content: &str,
        name: &str,
    ) -> Result<Vec<PathIssue>, DecodeError> {
        let decoded = svg::decode(content)?;
        self.active = None;
        if let (Some(width), Some(height)) = (decoded.width, decoded.height) {
            self.document.set_canvas_size((width, height));
        }
        self.document.open(id, name, decoded.strokes);
        log::info!(
            "Opened whiteboard \"{}\" with {} stroke(s)",
            name,
            self.document.strokes().len()
        );
        Ok(decoded.issues)
    }

    /// Open an SVG file that is not in the store yet. It gets an id on first save.
    pub fn import_svg(&mut self, name: &str, content: &str) -> Result<Vec<PathIssue>, DecodeError> {
        self.open_whiteboard(None, content, name)
    }

    /// Start an empty, unsaved board. Saved boards are not touched.
    pub fn create_new_whiteboard(&mut self) {
        self.active = None;
        self.document.reset(self.default_name.clone());
        log::info!("Created new whiteboard");
    }

    /// Fetch a board from the store and open it
    pub async fn load(&mut self, id: &WhiteboardId) -> BoardResult<Vec<PathIssue>> {
        let record = self.store.load(id).await?;
        let issues = self.open_whiteboard(Some(record.meta.id), &record.content, &record.meta.name)?;
        Ok(issues)
    }

    /// Save the open board, creating a store record on first save.
    pub async fn save(&mut self) -> StorageResult<WhiteboardId> {
        // Snapshot before the first await; edits made while saving stay out of it
        let content = self.document.to_svg();
        let name = self.document.name().to_owned();
        let id = self.document.id().cloned();

        let saved = self.store.save(&name, &content, id.as_ref()).await?;
        log::info!("Whiteboard \"{}\" saved with ID: {}", name, saved);
        self.document.set_id(saved.clone());
        Ok(saved)
    }

    /// SVG text of the open board
    pub fn export_svg(&self) -> String {
        self.document.to_svg()
    }

    /// PNG rendering of the open board at its canvas size
    pub fn export_png(&self) -> BoardResult<Vec<u8>> {
        let (width, height) = self.document.canvas_size();
        renderer::render_png(self.document.strokes(), width, height)
    }

    /// File name for exports of the open board, without extension
    pub fn export_stem(&self) -> String {
        export_stem(self.document.name())
    }

    pub async fn list_whiteboards(&self) -> StorageResult<Vec<WhiteboardMeta>> {
        self.store.list().await
    }

    pub async fn rename_whiteboard(&mut self, id: &WhiteboardId, name: &str) -> StorageResult<()> {
        self.store.rename(id, name).await?;
        if self.document.id() == Some(id) {
            self.document.set_name(name);
        }
        log::info!("Whiteboard {} renamed to \"{}\"", id, name);
        Ok(())
    }

    /// Save a copy of a stored board as a new record named `Copy of <name>`
    pub async fn duplicate_whiteboard(&mut self, id: &WhiteboardId) -> StorageResult<WhiteboardId> {
        let record = self.store.load(id).await?;
        let name = format!("Copy of {}", record.meta.name);
        let copy = self.store.save(&name, &record.content, None).await?;
        log::info!("Whiteboard {} duplicated as {}", id, copy);
        Ok(copy)
    }

    /// Delete a stored board. If it is the open board, the drawing stays on
    /// screen but will be saved as a new record.
    pub async fn delete_whiteboard(&mut self, id: &WhiteboardId) -> StorageResult<()> {
        self.store.delete(id).await?;
        if self.document.id() == Some(id) {
            self.document.clear_id();
        }
        log::info!("Whiteboard with ID {} deleted", id);
        Ok(())
    }

    // --- Dispatch ----------------------------------------------------------

    /// Run an action and tell the user how it went.
    ///
    /// Failures are reported once, through the notifier, and also returned.
    pub async fn dispatch(&mut self, action: Action) -> BoardResult<Outcome> {
        let id = action.id();
        let result = self.run(action).await;
        match &result {
            Ok(outcome) => log::debug!("{:?} -> {:?}", id, outcome),
            Err(err) => {
                // The notifier logs the message; keep the cause for debugging
                log::debug!("{:?} failed: {}", id, err);
                self.notifier.error(failure_message(id.label(), err));
            }
        }
        result
    }

    async fn run(&mut self, action: Action) -> BoardResult<Outcome> {
        let outcome = match action {
            Action::Undo => changed(self.undo()),
            Action::Redo => changed(self.redo()),
            Action::Save => {
                let id = self.save().await?;
                self.notifier
                    .success(format!("Whiteboard \"{}\" saved", self.document.name()));
                Outcome::Saved(id)
            }
            Action::Export => Outcome::Exported {
                file_name: format!("{}.svg", self.export_stem()),
                svg: self.export_svg(),
            },
            Action::Open(id) => {
                let issues = self.load(&id).await?;
                if issues.is_empty() {
                    self.notifier
                        .success(format!("Opened \"{}\"", self.document.name()));
                } else {
                    self.notifier.info(format!(
                        "Opened \"{}\"; {} path(s) could not be read fully",
                        self.document.name(),
                        issues.len()
                    ));
                }
                Outcome::Redraw
            }
            Action::New => {
                self.create_new_whiteboard();
                Outcome::Redraw
            }
            Action::Rename { id, name } => {
                self.rename_whiteboard(&id, &name).await?;
                Outcome::BoardsChanged
            }
            Action::Duplicate(id) => {
                self.duplicate_whiteboard(&id).await?;
                self.notifier.success("Whiteboard duplicated");
                Outcome::BoardsChanged
            }
            Action::Delete(id) => {
                self.delete_whiteboard(&id).await?;
                self.notifier.success("Whiteboard deleted");
                Outcome::BoardsChanged
            }
        };
        Ok(outcome)
    }
}

fn changed(did_change: bool) -> Outcome {
    if did_change {
        Outcome::Redraw
    } else {
        Outcome::Unchanged
    }
}

fn failure_message(action: &str, err: &BoardError) -> String {
    match err {
        BoardError::Storage(StorageError::NotFound(_)) => {
            format!("{} failed: the whiteboard no longer exists.", action)
        }
        BoardError::Decode(_) => format!("{} failed: the file is not a readable whiteboard.", action),
        _ => format!("{} failed. Please try again.", action),
    }
}

/// A file-system friendly version of a board name
pub fn export_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "whiteboard".to_owned()
    } else {
        stem
    }
}
