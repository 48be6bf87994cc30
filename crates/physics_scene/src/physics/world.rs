//! Simulation world factory
//!
//! [`SimulationWorld`] bundles every rapier structure a simulation needs:
//! the narrow phase (contact dispatch and collision configuration), the
//! broad phase pair cache, and the constraint solver driven by the physics
//! pipeline and its integration parameters. All of them are owned by value,
//! so they live and die together and cannot be paired with a foreign
//! dispatcher or configuration.

use rapier3d::dynamics::{
    CCDSolver, ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet,
    RigidBody, RigidBodyHandle, RigidBodySet,
};
use rapier3d::geometry::{BroadPhase, Collider, ColliderHandle, ColliderSet, NarrowPhase};
use rapier3d::pipeline::{PhysicsPipeline, QueryPipeline};

use super::PhysicsError;
use crate::core::WorldConfig;
use crate::foundation::math::{Isometry, Vec3};

/// Create a world with the default configuration
pub fn create_world() -> Result<SimulationWorld, PhysicsError> {
    create_world_with(&WorldConfig::default())
}

/// Create a world from explicit solver and broadphase tuning
pub fn create_world_with(config: &WorldConfig) -> Result<SimulationWorld, PhysicsError> {
    SimulationWorld::new(config)
}

/// A rigid-body simulation session
///
/// Bodies registered here are owned by the world. Every mutating call takes
/// `&mut self`, so a world is only ever stepped and populated from one place
/// at a time; hosts that spawn objects from another thread must hand the
/// request over to the thread that owns the world.
pub struct SimulationWorld {
    gravity: Vec3,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    step_count: u64,
}

impl SimulationWorld {
    /// Build a world from `config`
    ///
    /// An invalid configuration is reported as
    /// [`PhysicsError::EngineInitializationFailure`].
    pub fn new(config: &WorldConfig) -> Result<Self, PhysicsError> {
        config.validate().map_err(|reason| {
            log::error!("Refusing to build simulation world: {}", reason);
            PhysicsError::EngineInitializationFailure(reason)
        })?;

        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;
        integration_parameters.max_velocity_iterations = config.solver_iterations;
        integration_parameters.max_velocity_friction_iterations = config.friction_iterations;
        integration_parameters.max_stabilization_iterations = config.stabilization_iterations;
        integration_parameters.max_ccd_substeps = config.ccd_substeps;

        log::info!(
            "Creating simulation world: gravity {:?}, dt {:.4}s, {} solver iterations",
            config.gravity,
            config.timestep,
            config.solver_iterations
        );

        Ok(Self {
            gravity: config.gravity_vector(),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            step_count: 0,
        })
    }

    /// Advance the simulation by one fixed timestep
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.step_count += 1;
        log::trace!("Simulation step {} complete", self.step_count);
    }

    /// Advance the simulation by `steps` fixed timesteps
    pub fn step_n(&mut self, steps: u32) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Number of registered rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Steps taken since creation
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Fixed timestep length in seconds
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Simulated time since creation in seconds
    pub fn elapsed(&self) -> f64 {
        self.step_count as f64 * f64::from(self.integration_parameters.dt)
    }

    /// World gravity
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Whether `handle` refers to a body registered here
    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Borrow a registered rigid body
    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Mutably borrow a registered rigid body, e.g. to apply impulses
    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Borrow a registered collider
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Current pose of a registered rigid body
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<&Isometry> {
        self.bodies.get(handle).map(RigidBody::position)
    }

    /// Register a body together with its collider
    pub(crate) fn insert(&mut self, body: RigidBody, collider: Collider) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = self.bodies.insert(body);
        let collider_handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);
        (body_handle, collider_handle)
    }

    /// Deregister a body, its colliders and joints
    ///
    /// The body is detached from the island manager, broad phase and joint
    /// sets before it is freed.
    pub(crate) fn remove(&mut self, handle: RigidBodyHandle) -> Result<RigidBody, PhysicsError> {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .ok_or(PhysicsError::UnknownBody)
    }
}

impl Drop for SimulationWorld {
    fn drop(&mut self) {
        let handles: Vec<RigidBodyHandle> = self.bodies.iter().map(|(handle, _)| handle).collect();
        log::debug!("Tearing down simulation world with {} bodies", handles.len());

        for handle in handles {
            // Handles were just collected from this set
            let _ = self.remove(handle);
        }
    }
}

impl std::fmt::Debug for SimulationWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationWorld")
            .field("gravity", &self.gravity)
            .field("timestep", &self.integration_parameters.dt)
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.colliders.len())
            .field("step_count", &self.step_count)
            .finish()
    }
}
