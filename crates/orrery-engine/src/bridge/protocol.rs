//! Shared memory contract between the engine and the host page.
//! Must stay in sync with the TypeScript `protocol.ts`.
//!
//! Every section is exported through its own pointer (all values f32 / 4 bytes):
//! ```text
//! header: 16 floats
//! nodes:  node_count × 24 floats   (room for max_nodes)
//! lights: light_count × 12 floats  (room for max_lights)
//! events: event_count × 4 floats   (room for max_events)
//! stars:  star_count × 3 floats, positions and colors separately
//! ```
//! The header carries the live counts, so the host re-reads it every frame
//! before building views over the other sections.

use crate::api::app::EngineConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_NODES: usize = 3;
pub const HEADER_NODE_COUNT: usize = 4;
pub const HEADER_MAX_LIGHTS: usize = 5;
pub const HEADER_LIGHT_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_STAR_COUNT: usize = 9;
pub const HEADER_STAR_GENERATION: usize = 10;
pub const HEADER_STAR_SIZE: usize = 11;
pub const HEADER_AMBIENT_R: usize = 12;
pub const HEADER_AMBIENT_G: usize = 13;
pub const HEADER_AMBIENT_B: usize = 14;
pub const HEADER_ELAPSED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per node instance (wire format — never changes).
pub const NODE_FLOATS: usize = 24;

/// Floats per point light (wire format — never changes).
pub const LIGHT_FLOATS: usize = 12;

/// Floats per scene event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

/// Per-section capacities computed from the engine config.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_nodes: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Largest node section, in floats.
    pub node_data_floats: usize,
    /// Largest light section, in floats.
    pub light_data_floats: usize,
    /// Largest event section, in floats.
    pub event_data_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_nodes: usize, max_lights: usize, max_events: usize) -> Self {
        Self {
            max_nodes,
            max_lights,
            max_events,
            node_data_floats: max_nodes * NODE_FLOATS,
            light_data_floats: max_lights * LIGHT_FLOATS,
            event_data_floats: max_events * EVENT_FLOATS,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_nodes, config.max_lights, config.max_events)
    }

    /// Write the static header fields (version and capacities).
    pub fn write_capacities(&self, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_NODES] = self.max_nodes as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
    }
}
