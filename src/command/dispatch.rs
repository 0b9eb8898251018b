use egui::{Key, KeyboardShortcut, Modifiers};

use crate::state::persistence::WhiteboardId;

/// Logical actions the UI can bind buttons, menu items and keys to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Undo,
    Redo,
    Save,
    Export,
    Open,
    New,
    Rename,
    Duplicate,
    Delete,
}

impl ActionId {
    pub fn label(self) -> &'static str {
        match self {
            ActionId::Undo => "Undo",
            ActionId::Redo => "Redo",
            ActionId::Save => "Save",
            ActionId::Export => "Export SVG",
            ActionId::Open => "Open",
            ActionId::New => "New Whiteboard",
            ActionId::Rename => "Rename",
            ActionId::Duplicate => "Duplicate",
            ActionId::Delete => "Delete",
        }
    }
}

/// An action together with the data its handler needs
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Undo,
    Redo,
    Save,
    Export,
    Open(WhiteboardId),
    New,
    Rename { id: WhiteboardId, name: String },
    Duplicate(WhiteboardId),
    Delete(WhiteboardId),
}

impl Action {
    pub fn id(&self) -> ActionId {
        match self {
            Action::Undo => ActionId::Undo,
            Action::Redo => ActionId::Redo,
            Action::Save => ActionId::Save,
            Action::Export => ActionId::Export,
            Action::Open(_) => ActionId::Open,
            Action::New => ActionId::New,
            Action::Rename { .. } => ActionId::Rename,
            Action::Duplicate(_) => ActionId::Duplicate,
            Action::Delete(_) => ActionId::Delete,
        }
    }
}

/// What a dispatched action did, so the UI knows what to refresh
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The drawing changed and must be rendered again
    Redraw,
    /// Nothing to do (e.g. undo with an empty log)
    Unchanged,
    Saved(WhiteboardId),
    Exported { file_name: String, svg: String },
    /// The list of saved boards changed
    BoardsChanged,
}

/// A keyboard shortcut bound to an action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBinding {
    pub shortcut: KeyboardShortcut,
    pub action: ActionId,
}

/// The default keyboard map.
///
/// Ordered so that more specific shortcuts come first: Ctrl+Shift+Z must be
/// consumed as redo before Ctrl+Z gets a chance to see it.
pub fn default_key_bindings() -> Vec<KeyBinding> {
    let bind = |modifiers, key, action| KeyBinding {
        shortcut: KeyboardShortcut::new(modifiers, key),
        action,
    };
    vec![
        bind(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z, ActionId::Redo),
        bind(Modifiers::COMMAND, Key::Z, ActionId::Undo),
        bind(Modifiers::COMMAND, Key::Y, ActionId::Redo),
        bind(Modifiers::COMMAND, Key::S, ActionId::Save),
        bind(Modifiers::COMMAND, Key::O, ActionId::Open),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_ids() {
        assert_eq!(Action::Undo.id(), ActionId::Undo);
        assert_eq!(Action::Open(WhiteboardId::from("a")).id(), ActionId::Open);
        assert_eq!(
            Action::Rename {
                id: WhiteboardId::from("a"),
                name: "b".to_owned()
            }
            .id(),
            ActionId::Rename
        );
    }

    #[test]
    fn test_default_key_bindings() {
        let bindings = default_key_bindings();
        let lookup = |modifiers: Modifiers, key| {
            bindings
                .iter()
                .find(|b| b.shortcut.logical_key == key && modifiers.matches_exact(b.shortcut.modifiers))
                .map(|b| b.action)
        };

        assert_eq!(lookup(Modifiers::COMMAND, Key::Z), Some(ActionId::Undo));
        assert_eq!(lookup(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z), Some(ActionId::Redo));
        assert_eq!(lookup(Modifiers::COMMAND, Key::Y), Some(ActionId::Redo));
        assert_eq!(lookup(Modifiers::COMMAND, Key::S), Some(ActionId::Save));
        assert_eq!(lookup(Modifiers::COMMAND, Key::O), Some(ActionId::Open));
        assert_eq!(lookup(Modifiers::NONE, Key::Z), None);
    }

    #[test]
    fn test_shift_z_is_bound_before_z() {
        let bindings = default_key_bindings();
        let redo = bindings
            .iter()
            .position(|b| b.shortcut.modifiers.shift && b.shortcut.logical_key == Key::Z);
        let undo = bindings
            .iter()
            .position(|b| !b.shortcut.modifiers.shift && b.shortcut.logical_key == Key::Z);
        assert!(redo < undo);
    }
}
