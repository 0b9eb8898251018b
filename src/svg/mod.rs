//! SVG board files.
//!
//! A board is stored as a plain SVG document: a white background followed by
//! one stroked `<path>` per history entry. [`encode`] and [`decode`] are
//! inverses for every log this board can produce.

mod decode;
mod encode;
pub mod path_data;

pub use decode::{Decoded, PathIssue, decode};
pub use encode::{SVG_NAMESPACE, encode, stroke_path_data};
