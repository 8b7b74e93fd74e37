use glam::{Mat4, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// What a node contributes to the rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Transform-only grouping node.
    Group,
    /// Draws its `mesh`.
    Mesh,
    /// Anchor for the starfield point cloud.
    Points,
    /// Anchor for a point light.
    Light,
}

/// Fat node — a single struct with optional components.
/// Designed for small scene graphs (dozens of nodes).
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    pub kind: NodeKind,
    /// Hidden nodes still propagate transforms but are not drawn.
    pub visible: bool,
    /// World transform, written by `TransformGraph::propagate`.
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
}

impl Node {
    /// Create a group node with the identity transform.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            kind: NodeKind::Group,
            visible: true,
            world: Mat4::IDENTITY,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self.kind = NodeKind::Mesh;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// World-space position (translation of `world`).
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::Material;
    use crate::systems::color::Color;

    #[test]
    fn with_mesh_marks_mesh_kind() {
        let node = Node::new(NodeId(3))
            .with_tag("sun")
            .with_mesh(MeshComponent::sphere(1.0, 16, Material::standard(Color::WHITE)));
        assert_eq!(node.kind, NodeKind::Mesh);
        assert_eq!(node.tag, "sun");
        assert_eq!(node.world_position(), Vec3::ZERO);
    }
}
