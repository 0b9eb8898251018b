use crate::command::History;
use crate::state::persistence::WhiteboardId;
use crate::stroke::Stroke;
use crate::svg;

/// The board currently open in memory.
///
/// `id` stays `None` until the board is saved for the first time.
#[derive(Debug, Clone)]
pub struct Document {
    id: Option<WhiteboardId>,
    name: String,
    history: History,
    canvas_size: (u32, u32),
}

impl Document {
    pub fn new(name: impl Into<String>, canvas_size: (u32, u32)) -> Self {
        Self {
            id: None,
            name: name.into(),
            history: History::new(),
            canvas_size,
        }
    }

    pub fn id(&self) -> Option<&WhiteboardId> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: WhiteboardId) {
        self.id = Some(id);
    }

    /// Forget the storage id; the next save creates a new record
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.history.snapshot()
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: (u32, u32)) {
        self.canvas_size = size;
    }

    /// Start over with an empty, unsaved board. Storage is not touched.
    pub fn reset(&mut self, name: impl Into<String>) {
        self.id = None;
        self.name = name.into();
        self.history.reset();
    }

    /// Take over a loaded board in one step
    pub fn open(&mut self, id: Option<WhiteboardId>, name: impl Into<String>, strokes: Vec<Stroke>) {
        self.id = id;
        self.name = name.into();
        self.history.replace(strokes);
    }

    /// SVG text of the current log, sized to the canvas
    pub fn to_svg(&self) -> String {
        let (width, height) = self.canvas_size;
        svg::encode(self.strokes(), width, height)
    }
}
