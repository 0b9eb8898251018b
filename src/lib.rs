#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod notify;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod svg;

pub use app::BoardApp;
pub use command::{Action, ActionId, History, Outcome};
pub use config::Config;
pub use document::Document;
pub use error::{BoardError, BoardResult, DecodeError, PathError, StorageError};
pub use notify::{LogNotifier, Notifier, ToastKind, Toasts};
pub use renderer::{RasterSurface, Surface};
pub use state::{BoardContext, DirStore, MemoryStore, WhiteboardId, WhiteboardMeta, WhiteboardStore};
pub use stroke::{Stroke, StrokeBuilder, StrokeColor, Tool};
