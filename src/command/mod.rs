pub mod dispatch;
mod history;

pub use dispatch::{Action, ActionId, KeyBinding, Outcome, default_key_bindings};
pub use history::History;
