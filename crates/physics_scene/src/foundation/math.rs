//! Math utilities and types
//!
//! Provides the fundamental math types shared by the render description and
//! the physics engine. Both sides use the same `nalgebra` release, so a
//! `Vec3` here is the same type as rapier's `Vector<Real>`.

pub use nalgebra::{
    Vector3,
    Matrix4,
    Quaternion,
    Unit,
    Isometry3,
    Translation3,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid transform (rotation + translation) as used by the physics engine
pub type Isometry = Isometry3<f32>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a unit-scale transform from a rigid-body pose
    pub fn from_isometry(pose: &Isometry) -> Self {
        Self::from_position_rotation(pose.translation.vector, pose.rotation)
    }

    /// Rigid part of this transform; scale is dropped
    pub fn to_isometry(&self) -> Isometry {
        Isometry::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// Copy translation and rotation from a rigid-body pose, keeping scale
    pub fn set_pose(&mut self, pose: &Isometry) {
        self.position = pose.translation.vector;
        self.rotation = pose.rotation;
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
}

/// Convert a `[x, y, z]` array (the configuration file layout) into a vector
pub fn vec3_from_array(values: [f32; 3]) -> Vec3 {
    Vec3::new(values[0], values[1], values[2])
}

/// True when every component is finite
pub fn is_finite_vec3(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
