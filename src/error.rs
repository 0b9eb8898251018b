use std::path::PathBuf;

use thiserror::Error;

use crate::state::persistence::WhiteboardId;

/// Errors that stop a whole SVG document from being read
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Root element is <{0}>, expected <svg>")]
    NotSvg(String),
}

/// Why a single `<path>` element was skipped or cut short while decoding.
///
/// These never abort a document; the decoder keeps going with the next path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path has no `d` attribute")]
    MissingData,

    #[error("unsupported path command `{0}`")]
    UnsupportedCommand(char),

    #[error("number `{0}` in path data does not fit a coordinate")]
    InvalidNumber(String),

    #[error("malformed path data: {0}")]
    Syntax(String),

    #[error("second move-to starts a subpath, which is not supported")]
    MultipleSubpaths,

    #[error("path has {0} point(s), at least 2 are required")]
    TooFewPoints(usize),
}

/// Errors reported by a whiteboard store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Whiteboard {0} not found")]
    NotFound(WhiteboardId),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize whiteboard metadata: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend failed: {0}")]
    Backend(String),
}

/// Errors reading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors surfaced by board-level operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to encode PNG: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to write export file: {0}")]
    Export(std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Import {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot export an empty {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
