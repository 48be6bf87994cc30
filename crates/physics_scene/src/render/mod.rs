//! Render-side description of physics objects
//!
//! Meshes, materials and placed mesh instances. This is pure data; drawing
//! it is the job of whichever renderer consumes it.

pub mod primitives;
pub mod material;
pub mod mesh_instance;

pub use primitives::{Mesh, MeshGeometry, Vertex};
pub use material::{Color, Material, StandardMaterialParams};
pub use mesh_instance::MeshInstance;
