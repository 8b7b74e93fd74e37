use crate::systems::color::Color;

/// Mesh geometry primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// UV sphere with the given radius and segment count.
    Sphere { radius: f32, segments: u32 },
    /// Axis-aligned box.
    Box { width: f32, height: f32, depth: f32 },
}

impl MeshShape {
    /// Wire code for the instance buffer.
    pub fn code(&self) -> f32 {
        match self {
            MeshShape::Sphere { .. } => 0.0,
            MeshShape::Box { .. } => 1.0,
        }
    }
}

/// Shading model requested from the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Lit by scene lights.
    #[default]
    Standard,
    /// Unlit flat color.
    Basic,
}

impl MaterialKind {
    pub fn code(&self) -> f32 {
        match self {
            MaterialKind::Standard => 0.0,
            MaterialKind::Basic => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub kind: MaterialKind,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self { color, kind: MaterialKind::Standard }
    }

    pub fn basic(color: Color) -> Self {
        Self { color, kind: MaterialKind::Basic }
    }
}

/// Component for meshes drawn by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshComponent {
    pub fn new(shape: MeshShape, material: Material) -> Self {
        Self {
            shape,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn sphere(radius: f32, segments: u32, material: Material) -> Self {
        Self::new(MeshShape::Sphere { radius, segments }, material)
    }

    pub fn cuboid(width: f32, height: f32, depth: f32, material: Material) -> Self {
        Self::new(MeshShape::Box { width, height, depth }, material)
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    /// Bit 0: casts shadows, bit 1: receives shadows.
    pub fn shadow_flags(&self) -> f32 {
        (self.cast_shadow as u32 | (self.receive_shadow as u32) << 1) as f32
    }
}
