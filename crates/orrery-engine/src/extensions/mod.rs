// extensions/mod.rs
//
// Optional extension modules.
// Decoupled from core Node/Scene — apps opt in by creating these systems.

pub mod panel;
pub mod transform;

pub use panel::{ControlKind, ParamControl, ParamPanel, ParamUpdate, SliderSpec};
pub use transform::{LocalTransform, TransformGraph};
