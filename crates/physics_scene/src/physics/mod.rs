//! Physics module: world and object factories on top of rapier
//!
//! Collision detection, broad phase, constraint solving and integration are
//! all rapier's. This module only builds the world, pairs meshes with rigid
//! bodies, and keeps the two consistent at creation time.

pub mod error;
pub mod shape;
pub mod world;
pub mod object;

pub use error::PhysicsError;
pub use shape::{ShapeConfiguration, ShapeKind};
pub use world::{create_world, create_world_with, SimulationWorld};
pub use object::{create_object, create_object_from_config, PhysicsObject};

pub use rapier3d::dynamics::RigidBodyHandle;
pub use rapier3d::geometry::ColliderHandle;
