//! # Physics Scene
//!
//! Glue between a render-side mesh description and the `rapier3d` rigid-body
//! engine.
//!
//! ## Features
//!
//! - **World Factory**: one call builds a ready-to-step simulation world
//! - **Object Factory**: a mesh and a matching rigid body, registered and
//!   positioned identically
//! - **Scene Files**: TOML / RON descriptions of a world and its objects
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use physics_scene::prelude::*;
//!
//! fn main() -> Result<(), PhysicsError> {
//!     let mut world = create_world()?;
//!     let mut ball = create_object(
//!         ShapeConfiguration::sphere(0.5),
//!         1.0,
//!         Vec3::new(0.0, 5.0, 0.0),
//!         Color::from_hex(0xff0000),
//!         &mut world,
//!     )?;
//!
//!     // The caller keeps mesh and body in sync every step
//!     world.step();
//!     ball.sync_mesh(&world)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::{ObjectConfig, WorldConfig},
        foundation::math::{Transform, Vec3},
        physics::{
            create_object, create_object_from_config, create_world, create_world_with,
            PhysicsError, PhysicsObject, ShapeConfiguration, ShapeKind, SimulationWorld,
        },
        render::{Color, Material, Mesh, MeshInstance},
        scene::{Scene, SceneConfig, SceneError},
    };
}
