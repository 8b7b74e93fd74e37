use bytemuck::{Pod, Zeroable};

/// Shape code for the starfield anchor (mesh shapes use 0 and 1).
pub const SHAPE_POINTS: f32 = 2.0;

/// Per-node render data read by the host renderer.
/// 24 floats = 96 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct NodeInstance {
    /// Column-major world matrix.
    pub world: [f32; 16],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 0 sphere, 1 box, 2 points.
    pub shape: f32,
    /// 0 standard (lit), 1 basic (unlit).
    pub material: f32,
    /// Bit 0 casts shadows, bit 1 receives shadows.
    pub flags: f32,
    /// Node id, so the host can keep one GPU object per node.
    pub node_id: f32,
    pub _pad: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of node instances rebuilt every frame.
pub struct NodeBuffer {
    instances: Vec<NodeInstance>,
    capacity: usize,
}

impl NodeBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Instances beyond capacity are dropped with a warning.
    pub fn push(&mut self, instance: NodeInstance) {
        if self.instances.len() >= self.capacity {
            log::warn!("node buffer full ({}), dropping node {}", self.capacity, instance.node_id);
            return;
        }
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[NodeInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for NodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}
