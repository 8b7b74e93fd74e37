pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::app::{SceneApp, EngineConfig, EngineContext, FrameTime};
pub use api::types::{NodeId, SceneEvent};
pub use components::node::{Node, NodeKind};
pub use components::mesh::{MeshComponent, MeshShape, Material, MaterialKind};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use renderer::instance::{NodeInstance, NodeBuffer};
pub use input::queue::{InputEvent, InputQueue, ParamInput, ParamPhase};
pub use bridge::protocol::ProtocolLayout;
pub use systems::color::{Color, ColorParseError};
pub use systems::lighting::{PointLight, AmbientLight, LightState};
pub use systems::render::build_node_buffer;
pub use systems::rng::Rng;
pub use systems::starfield::{
    generate, Blending, PointCloud, PointsMaterial, Starfield, StarfieldError, StarfieldParams,
};

// Extensions — decoupled optional systems
pub use extensions::{
    TransformGraph, LocalTransform,
    ParamPanel, ParamControl, ParamUpdate, ControlKind, SliderSpec,
};
