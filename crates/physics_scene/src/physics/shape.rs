//! Shape selection shared by the collider and the mesh
//!
//! [`ShapeConfiguration`] is the single source of dimensions for both halves
//! of a physics object: the collision shape handed to rapier and the mesh
//! generator on the render side read the same numbers.

use std::fmt;
use std::str::FromStr;

use rapier3d::dynamics::MassProperties;
use rapier3d::math::{Point, Rotation};
use rapier3d::geometry::SharedShape;

use super::PhysicsError;
use crate::foundation::math::{vec3_from_array, Vec3};
use crate::render::Mesh;

/// Names accepted for shapes in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// `"box"`
    Box,
    /// `"sphere"`
    Sphere,
    /// `"cylinder"`
    Cylinder,
}

impl ShapeKind {
    /// Every supported kind
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Box, ShapeKind::Sphere, ShapeKind::Cylinder];

    /// Name used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PhysicsError::UnsupportedShapeKind(s.to_string()))
    }
}

/// Geometry of a physics object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeConfiguration {
    /// Axis-aligned box
    Box {
        /// Half size along each axis
        half_extents: Vec3,
    },
    /// Sphere centered on the body origin
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Cylinder aligned with the local Y axis
    Cylinder {
        /// Half of the cylinder height
        half_height: f32,
        /// Cylinder radius
        radius: f32,
    },
}

impl ShapeConfiguration {
    /// Box from half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        ShapeConfiguration::Box { half_extents }
    }

    /// Sphere from a radius
    pub fn sphere(radius: f32) -> Self {
        ShapeConfiguration::Sphere { radius }
    }

    /// Cylinder from half height and radius
    pub fn cylinder(half_height: f32, radius: f32) -> Self {
        ShapeConfiguration::Cylinder { half_height, radius }
    }

    /// Derive dimensions from a single `[x, y, z]` size
    ///
    /// Box: full size, so half extents are `size / 2`. Sphere: radius is
    /// `size[0]`. Cylinder: radius is `size[0]`, height is `size[1]`.
    pub fn from_size(kind: ShapeKind, size: [f32; 3]) -> Self {
        match kind {
            ShapeKind::Box => Self::cuboid(vec3_from_array(size) * 0.5),
            ShapeKind::Sphere => Self::sphere(size[0]),
            ShapeKind::Cylinder => Self::cylinder(size[1] * 0.5, size[0]),
        }
    }

    /// Kind of this configuration
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeConfiguration::Box { .. } => ShapeKind::Box,
            ShapeConfiguration::Sphere { .. } => ShapeKind::Sphere,
            ShapeConfiguration::Cylinder { .. } => ShapeKind::Cylinder,
        }
    }

    /// Check that every dimension is finite and strictly positive
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let invalid = |details: String| PhysicsError::InvalidShapeDimensions {
            shape: self.kind().as_str(),
            details,
        };
        let positive = |v: f32| v.is_finite() && v > 0.0;

        match *self {
            ShapeConfiguration::Box { half_extents } => {
                if !half_extents.iter().all(|&h| positive(h)) {
                    return Err(invalid(format!(
                        "half extents must be positive, got [{}, {}, {}]",
                        half_extents.x, half_extents.y, half_extents.z
                    )));
                }
            }
            ShapeConfiguration::Sphere { radius } => {
                if !positive(radius) {
                    return Err(invalid(format!("radius must be positive, got {radius}")));
                }
            }
            ShapeConfiguration::Cylinder { half_height, radius } => {
                if !positive(half_height) || !positive(radius) {
                    return Err(invalid(format!(
                        "half height and radius must be positive, got {half_height} and {radius}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Collision shape for the physics engine
    pub fn collision_shape(&self) -> SharedShape {
        match *self {
            ShapeConfiguration::Box { half_extents } => {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ShapeConfiguration::Sphere { radius } => SharedShape::ball(radius),
            ShapeConfiguration::Cylinder { half_height, radius } => {
                SharedShape::cylinder(half_height, radius)
            }
        }
    }

    /// Render mesh with the same dimensions as the collision shape
    pub fn build_mesh(&self) -> Mesh {
        match *self {
            ShapeConfiguration::Box { half_extents } => Mesh::cuboid(half_extents),
            ShapeConfiguration::Sphere { radius } => {
                Mesh::uv_sphere(radius, Mesh::SPHERE_SEGMENTS, Mesh::SPHERE_RINGS)
            }
            ShapeConfiguration::Cylinder { half_height, radius } => {
                Mesh::cylinder(half_height, radius, Mesh::CYLINDER_SEGMENTS)
            }
        }
    }

    /// Engine mass properties for a body of exactly `mass`
    ///
    /// Inertia is the unit-density inertia per unit of mass scaled by
    /// `mass`, which stays finite for any finite mass. Zero mass gives zero
    /// inertia.
    pub fn mass_properties(&self, mass: f32) -> MassProperties {
        let unit = self.collision_shape().mass_properties(1.0);
        let inertia_per_mass = unit.principal_inertia() / unit.mass();
        MassProperties::with_principal_inertia_frame(
            Point::origin(),
            mass,
            inertia_per_mass * mass,
            Rotation::identity(),
        )
    }

    /// Principal local inertia for `mass`; zero for a zero mass
    pub fn local_inertia(&self, mass: f32) -> Vec3 {
        self.mass_properties(mass).principal_inertia()
    }
}
