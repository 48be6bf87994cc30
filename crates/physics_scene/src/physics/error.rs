//! Physics factory errors

use thiserror::Error;

/// Errors raised while building worlds and physics objects
///
/// Every variant is raised before the world is mutated, so a failed call
/// never leaves a half-registered body behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Shape kind string did not name a supported shape
    #[error("Unsupported shape kind: {0:?}")]
    UnsupportedShapeKind(String),

    /// The physics engine could not be set up with the given configuration
    #[error("Physics engine initialization failed: {0}")]
    EngineInitializationFailure(String),

    /// Mass was negative, NaN or infinite
    #[error("Invalid mass {0}: must be finite and non-negative")]
    InvalidMass(f32),

    /// A shape dimension was zero, negative or non-finite
    #[error("Invalid {shape} dimensions: {details}")]
    InvalidShapeDimensions {
        /// Shape kind name
        shape: &'static str,
        /// What was wrong
        details: String,
    },

    /// Position was not finite
    #[error("Invalid position {0:?}: components must be finite")]
    InvalidPosition([f32; 3]),

    /// The world does not hold the body this object refers to
    #[error("Rigid body is not registered in this world")]
    UnknownBody,
}
