//! File-described scenes
//!
//! A [`SceneConfig`] names a world configuration and a list of objects by
//! shape kind. Building it runs the world factory once and the object
//! factory per entry. [`Scene`] then owns the world together with its
//! objects and performs the per-step mesh synchronization for them.

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::core::{ObjectConfig, WorldConfig};
use crate::physics::{
    create_object_from_config, create_world_with, PhysicsError, PhysicsObject, SimulationWorld,
};
use crate::render::MeshInstance;

/// Scene loading and building errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read or parsed
    #[error("Scene configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The world could not be created
    #[error("Scene world error: {0}")]
    Physics(#[from] PhysicsError),

    /// One object entry was rejected
    #[error("Scene object {index} ({kind}): {source}")]
    Object {
        /// Position in the object list
        index: usize,
        /// Shape kind as written in the file
        kind: String,
        /// Underlying factory error
        #[source]
        source: PhysicsError,
    },
}

/// One object entry of a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Shape kind name (`box`, `sphere`, `cylinder`)
    pub kind: String,
    /// Mass, size, position and color, written inline next to `kind`;
    /// omitted fields take their defaults
    #[serde(flatten)]
    pub options: ObjectConfig,
}

impl SceneObject {
    /// Create an entry
    pub fn new(kind: impl Into<String>, options: ObjectConfig) -> Self {
        Self {
            kind: kind.into(),
            options,
        }
    }
}

/// Serializable scene description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World tuning
    pub world: WorldConfig,
    /// Objects to spawn, in order
    pub objects: Vec<SceneObject>,
}

impl SceneConfig {
    /// Append an object entry
    pub fn with_object(mut self, kind: impl Into<String>, options: ObjectConfig) -> Self {
        self.objects.push(SceneObject::new(kind, options));
        self
    }

    /// Create the world and spawn every object into it
    pub fn build(&self) -> Result<Scene, SceneError> {
        let mut world = create_world_with(&self.world)?;
        let mut objects = Vec::with_capacity(self.objects.len());

        for (index, entry) in self.objects.iter().enumerate() {
            let object = create_object_from_config(&entry.kind, &entry.options, &mut world)
                .map_err(|source| SceneError::Object {
                    index,
                    kind: entry.kind.clone(),
                    source,
                })?;
            objects.push(object);
        }

        log::info!("Built scene with {} objects", objects.len());
        Ok(Scene { world, objects })
    }
}

impl Config for SceneConfig {}

/// A world and the objects spawned into it
#[derive(Debug)]
pub struct Scene {
    world: SimulationWorld,
    objects: Vec<PhysicsObject>,
}

impl Scene {
    /// Load a scene file and build it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        log::info!("Loading scene from {}", path.display());
        SceneConfig::load_from_file(path)?.build()
    }

    /// The simulation world
    pub fn world(&self) -> &SimulationWorld {
        &self.world
    }

    /// Spawned objects in file order
    pub fn objects(&self) -> &[PhysicsObject] {
        &self.objects
    }

    /// Spawn one more object into the scene
    pub fn spawn(&mut self, kind: &str, options: &ObjectConfig) -> Result<&PhysicsObject, PhysicsError> {
        let object = create_object_from_config(kind, options, &mut self.world)?;
        self.objects.push(object);
        Ok(&self.objects[self.objects.len() - 1])
    }

    /// Step the world once and copy every body pose into its mesh
    pub fn step(&mut self) -> Result<(), PhysicsError> {
        self.world.step();
        self.world.sync_meshes(self.objects.iter_mut())
    }

    /// Meshes ready for drawing
    pub fn meshes(&self) -> impl Iterator<Item = &MeshInstance> {
        self.objects.iter().map(|object| &object.mesh)
    }
}
