//! Renderable mesh placed in the world
//!
//! The visual half of a physics object: geometry, material and a transform.
//! The transform is only as fresh as the last time the owner copied the
//! rigid body pose into it.

use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::render::{Material, Mesh};

/// Mesh plus material positioned in world space
#[derive(Debug, Clone)]
pub struct MeshInstance {
    /// Geometry
    pub mesh: Mesh,

    /// Surface material
    pub material: Material,

    /// World transform
    pub transform: Transform,

    /// Whether this mesh casts shadows
    pub cast_shadow: bool,

    /// Whether this mesh receives shadows
    pub receive_shadow: bool,

    /// Whether this mesh is drawn at all
    pub visible: bool,
}

impl MeshInstance {
    /// Create a visible, shadowed instance at `position`
    pub fn new(mesh: Mesh, material: Material, position: Vec3) -> Self {
        Self {
            mesh,
            material,
            transform: Transform::from_position(position),
            cast_shadow: true,
            receive_shadow: true,
            visible: true,
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Model matrix for the current transform
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn test_new_instance_defaults() {
        let instance = MeshInstance::new(
            Mesh::cuboid(Vec3::new(0.5, 0.5, 0.5)),
            Material::from_color(Color::default()),
            Vec3::new(1.0, 2.0, 3.0),
        );

        assert!(instance.cast_shadow);
        assert!(instance.receive_shadow);
        assert!(instance.visible);
        assert_eq!(instance.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(instance.model_matrix()[(1, 3)], 2.0);
    }
}
