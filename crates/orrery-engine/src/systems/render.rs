use crate::components::node::{Node, NodeKind};
use crate::renderer::instance::{NodeBuffer, NodeInstance, SHAPE_POINTS};

/// Build the node instance buffer from visible mesh and point-cloud nodes.
/// Groups and light anchors only contribute through their children / the light buffer.
pub fn build_node_buffer<'a>(nodes: impl Iterator<Item = &'a Node>, buffer: &mut NodeBuffer) {
    buffer.clear();
    for node in nodes {
        if !node.visible {
            continue;
        }
        let instance = match (node.kind, &node.mesh) {
            (NodeKind::Mesh, Some(mesh)) => NodeInstance {
                world: node.world.to_cols_array(),
                r: mesh.material.color.r,
                g: mesh.material.color.g,
                b: mesh.material.color.b,
                shape: mesh.shape.code(),
                material: mesh.material.kind.code(),
                flags: mesh.shadow_flags(),
                node_id: node.id.0 as f32,
                _pad: 0.0,
            },
            (NodeKind::Points, _) => NodeInstance {
                world: node.world.to_cols_array(),
                shape: SHAPE_POINTS,
                node_id: node.id.0 as f32,
                ..Default::default()
            },
            _ => continue,
        };
        buffer.push(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NodeId;
    use crate::components::mesh::{Material, MeshComponent};
    use crate::systems::color::Color;
    use glam::{Mat4, Vec3};

    #[test]
    fn meshes_and_points_are_emitted() {
        let mut earth = Node::new(NodeId(1)).with_mesh(
            MeshComponent::sphere(1.0, 16, Material::standard(Color::new(0.0, 0.0, 1.0)))
                .with_shadows(true, true),
        );
        earth.world = Mat4::from_translation(Vec3::new(6.0, 0.0, 0.0));
        let group = Node::new(NodeId(2));
        let stars = Node::new(NodeId(3)).with_kind(NodeKind::Points);
        let hidden = Node::new(NodeId(4))
            .with_mesh(MeshComponent::cuboid(3.0, 1.0, 1.0, Material::basic(Color::WHITE)))
            .with_visible(false);

        let nodes = vec![earth, group, stars, hidden];
        let mut buffer = NodeBuffer::new();
        build_node_buffer(nodes.iter(), &mut buffer);

        let out = buffer.instances();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].world[12], 6.0);
        assert_eq!(out[0].b, 1.0);
        assert_eq!(out[0].shape, 0.0);
        assert_eq!(out[0].flags, 3.0);
        assert_eq!(out[1].shape, SHAPE_POINTS);
        assert_eq!(out[1].node_id, 3.0);
    }
}
