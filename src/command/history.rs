use crate::stroke::Stroke;

/// Undo/redo history of committed strokes.
///
/// The log is what gets drawn and saved. Undo moves the newest stroke onto
/// the redo stack; any new append throws the redo stack away.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Committed strokes, oldest first
    log: Vec<Stroke>,
    /// Undone strokes, last undone at the end
    redo: Vec<Stroke>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed stroke and invalidate the redo stack.
    pub fn append(&mut self, stroke: Stroke) {
        self.log.push(stroke);
        self.redo.clear(); // Clear redo stack when a new stroke is committed
    }

    /// Undo the newest stroke. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.log.pop() {
            Some(stroke) => {
                self.redo.push(stroke);
                log::debug!("Undo: {} in log, {} redoable", self.log.len(), self.redo.len());
                true
            }
            None => false,
        }
    }

    /// Redo the last undone stroke. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(stroke) => {
                self.log.push(stroke);
                log::debug!("Redo: {} in log, {} redoable", self.log.len(), self.redo.len());
                true
            }
            None => false,
        }
    }

    /// Clear the log and the redo stack
    pub fn reset(&mut self) {
        self.log.clear();
        self.redo.clear();
    }

    /// Replace the whole log in one step, as when a board is loaded.
    pub fn replace(&mut self, strokes: Vec<Stroke>) {
        self.log = strokes;
        self.redo.clear();
    }

    /// The current log, oldest stroke first.
    pub fn snapshot(&self) -> &[Stroke] {
        &self.log
    }

    /// Strokes waiting to be redone; the last entry is redone first.
    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.log.is_empty()
    }

    /// Returns true if there are strokes that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
