/// Whether a panel edit is still in progress or has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPhase {
    /// Value is changing (slider being dragged).
    Change,
    /// User finished editing (slider released, color picker closed).
    Finish,
}

/// An edit reported by the host parameter panel.
/// Sliders use `values[0]`; colors carry r, g, b in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInput {
    pub kind: u32,
    pub values: [f32; 3],
    pub phase: ParamPhase,
}

impl ParamInput {
    pub fn change(kind: u32, values: [f32; 3]) -> Self {
        Self { kind, values, phase: ParamPhase::Change }
    }

    pub fn finish(kind: u32, values: [f32; 3]) -> Self {
        Self { kind, values, phase: ParamPhase::Finish }
    }
}

/// Input event types the engine understands.
/// Generic — no scene-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A parameter panel edit.
    Param(ParamInput),
    /// A custom event from the UI layer (buttons, keyboard shortcuts, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Iterate over pending panel edits only.
    pub fn params(&self) -> impl Iterator<Item = &ParamInput> {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Param(p) => Some(p),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
