// extensions/panel.rs
//
// Parameter panel registry — declares tweakable controls and the actions the
// app wants when the host panel reports a change or a finished edit.
//
// Usage:
//   let mut panel = ParamPanel::new();
//   panel.add(ParamControl::slider(KIND_COUNT, "count", "Count", SliderSpec::new(100.0, 100000.0, 100.0)));
//   panel.on_finish_change(KIND_COUNT, Action::RebuildStars);
//   for action in panel.dispatch(&input) { ... }

use serde::Serialize;

use crate::input::queue::{ParamInput, ParamPhase};

/// Numeric slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderSpec {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]`. Non-finite input falls back to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.min
        }
    }

    /// Clamp into `[min, max]` and snap to the nearest step counted from `min`.
    /// Non-finite input falls back to `min`.
    pub fn apply(&self, value: f32) -> f32 {
        let clamped = self.clamp(value);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// Widget type of a control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlKind {
    Slider(SliderSpec),
    /// RGB color picker; values arrive as three channels in [0, 1].
    Color,
}

/// One control shown by the host panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamControl {
    /// Numeric id the host sends back with every edit.
    pub kind: u32,
    /// Machine name (matches the config key).
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Optional folder grouping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<&'static str>,
    pub control: ControlKind,
}

impl ParamControl {
    pub fn slider(kind: u32, name: &'static str, label: &'static str, spec: SliderSpec) -> Self {
        Self { kind, name, label, folder: None, control: ControlKind::Slider(spec) }
    }

    pub fn color(kind: u32, name: &'static str, label: &'static str) -> Self {
        Self { kind, name, label, folder: None, control: ControlKind::Color }
    }

    pub fn in_folder(mut self, folder: &'static str) -> Self {
        self.folder = Some(folder);
        self
    }

    /// Normalize raw host values: sliders are clamped/snapped into `values[0]`,
    /// colors have every channel clamped to [0, 1].
    pub fn sanitize(&self, values: [f32; 3]) -> [f32; 3] {
        match self.control {
            ControlKind::Slider(spec) => [spec.apply(values[0]), 0.0, 0.0],
            ControlKind::Color => clamp_channels(values),
        }
    }

    /// Like `sanitize`, but sliders are only clamped, not snapped to a step.
    pub fn clamp(&self, values: [f32; 3]) -> [f32; 3] {
        match self.control {
            ControlKind::Slider(spec) => [spec.clamp(values[0]), 0.0, 0.0],
            ControlKind::Color => clamp_channels(values),
        }
    }
}

fn clamp_channels(values: [f32; 3]) -> [f32; 3] {
    values.map(|c| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 })
}

/// A sanitized edit, paired with the action registered for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamUpdate<A> {
    pub kind: u32,
    pub values: [f32; 3],
    pub action: A,
}

#[derive(Debug, Clone)]
struct Listener<A> {
    kind: u32,
    phase: ParamPhase,
    action: A,
}

/// Ordered set of controls plus explicit change / finish-change listeners.
#[derive(Debug, Clone)]
pub struct ParamPanel<A> {
    controls: Vec<ParamControl>,
    listeners: Vec<Listener<A>>,
}

impl<A: Copy> ParamPanel<A> {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Add a control. A control with the same `kind` is replaced.
    pub fn add(&mut self, control: ParamControl) {
        match self.controls.iter_mut().find(|c| c.kind == control.kind) {
            Some(existing) => *existing = control,
            None => self.controls.push(control),
        }
    }

    /// Fire `action` on every live edit of `kind` (while dragging).
    pub fn on_change(&mut self, kind: u32, action: A) {
        self.listen(kind, ParamPhase::Change, action);
    }

    /// Fire `action` once the user finishes editing `kind` (slider released, picker closed).
    pub fn on_finish_change(&mut self, kind: u32, action: A) {
        self.listen(kind, ParamPhase::Finish, action);
    }

    fn listen(&mut self, kind: u32, phase: ParamPhase, action: A) {
        self.listeners.push(Listener { kind, phase, action });
    }

    pub fn control(&self, kind: u32) -> Option<&ParamControl> {
        self.controls.iter().find(|c| c.kind == kind)
    }

    pub fn controls(&self) -> &[ParamControl] {
        &self.controls
    }

    /// Sanitize an edit and return one update per matching listener, in registration order.
    /// Edits for unknown controls yield nothing.
    pub fn dispatch(&self, input: &ParamInput) -> Vec<ParamUpdate<A>> {
        let Some(control) = self.control(input.kind) else {
            log::warn!("panel: edit for unknown control {}", input.kind);
            return Vec::new();
        };
        let values = control.sanitize(input.values);
        self.listeners
            .iter()
            .filter(|l| l.kind == input.kind && l.phase == input.phase)
            .map(|l| ParamUpdate { kind: input.kind, values, action: l.action })
            .collect()
    }

    /// JSON description of all controls, for the host to build its widget panel.
    pub fn describe(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.controls)
    }
}

impl<A: Copy> Default for ParamPanel<A> {
    fn default() -> Self {
        Self::new()
    }
}
