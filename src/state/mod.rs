pub mod context;
pub mod persistence;

pub use context::{BoardContext, PenSettings, export_stem};
pub use persistence::{
    DirStore,
    MemoryStore,
    StorageResult,
    WhiteboardId,
    WhiteboardMeta,
    WhiteboardRecord,
    WhiteboardStore,
    filter_by_name,
    format_modified,
    format_modified_local,
};
