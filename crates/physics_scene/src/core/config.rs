//! # World and Object Configuration
//!
//! Tuning for the simulation world and the per-object description consumed
//! by the object factory. Both are serde-serializable so they can live in
//! scene files, and both expose builder-style setters plus `validate()`.

use serde::{Serialize, Deserialize};

use crate::foundation::math::{vec3_from_array, Vec3};
use crate::render::Color;

/// # World Configuration
///
/// Gravity, fixed timestep and solver tuning handed to the physics engine
/// when the world is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity acceleration in world space
    pub gravity: [f32; 3],
    /// Fixed step length in seconds
    pub timestep: f32,
    /// Velocity iterations of the constraint solver
    pub solver_iterations: usize,
    /// Friction iterations per velocity iteration
    pub friction_iterations: usize,
    /// Position stabilization iterations
    pub stabilization_iterations: usize,
    /// Maximum continuous collision detection substeps
    pub ccd_substeps: usize,
}

impl WorldConfig {
    /// Create a new world configuration with earth gravity at 60 Hz
    pub fn new() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 1.0 / 60.0,
            solver_iterations: 4,
            friction_iterations: 8,
            stabilization_iterations: 1,
            ccd_substeps: 1,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = [gravity.x, gravity.y, gravity.z];
        self
    }

    /// Set the fixed timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set solver velocity iterations
    pub fn with_solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    /// Gravity as a vector
    pub fn gravity_vector(&self) -> Vec3 {
        vec3_from_array(self.gravity)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(format!("Gravity must be finite, got {:?}", self.gravity));
        }

        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(format!("Timestep must be positive, got {}", self.timestep));
        }

        if self.solver_iterations == 0 {
            return Err("Solver iterations must be at least 1".to_string());
        }

        if self.ccd_substeps == 0 {
            return Err("CCD substeps must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Object Configuration
///
/// The loosely-typed description of one physics object. Omitted fields take
/// the defaults `mass = 1`, `size = [1, 1, 1]`, `position = [0, 0, 0]` and
/// `color = 0x00ff00`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    /// Mass in kilograms; zero makes the body static
    pub mass: f32,
    /// Overall size, interpreted per shape kind
    pub size: [f32; 3],
    /// Initial world-space position
    pub position: [f32; 3],
    /// Material color as `0xRRGGBB`
    pub color: u32,
}

impl ObjectConfig {
    /// Create an object configuration with the default values
    pub fn new() -> Self {
        Self {
            mass: 1.0,
            size: [1.0, 1.0, 1.0],
            position: [0.0, 0.0, 0.0],
            color: 0x00ff00,
        }
    }

    /// Set mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set size
    pub fn with_size(mut self, size: [f32; 3]) -> Self {
        self.size = size;
        self
    }

    /// Set position
    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Position as a vector
    pub fn position_vector(&self) -> Vec3 {
        vec3_from_array(self.position)
    }

    /// Color as a material color
    pub fn material_color(&self) -> Color {
        Color::from_hex(self.color)
    }
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_defaults() {
        let config = ObjectConfig::default();
        assert_eq!(config.mass, 1.0);
        assert_eq!(config.size, [1.0, 1.0, 1.0]);
        assert_eq!(config.position, [0.0, 0.0, 0.0]);
        assert_eq!(config.color, 0x00ff00);
    }

    #[test]
    fn test_partial_object_fills_defaults() {
        let config: ObjectConfig = toml::from_str("mass = 0.0\nposition = [0.0, 3.0, 0.0]").unwrap();
        assert_eq!(config.mass, 0.0);
        assert_eq!(config.position, [0.0, 3.0, 0.0]);
        assert_eq!(config.size, [1.0, 1.0, 1.0]);
        assert_eq!(config.color, 0x00ff00);
    }

    #[test]
    fn test_world_validation() {
        assert!(WorldConfig::default().validate().is_ok());
        assert!(WorldConfig::default().with_timestep(0.0).validate().is_err());
        assert!(WorldConfig::default().with_timestep(f32::NAN).validate().is_err());
        assert!(WorldConfig::default().with_solver_iterations(0).validate().is_err());
        assert!(WorldConfig::default()
            .with_gravity(Vec3::new(0.0, f32::INFINITY, 0.0))
            .validate()
            .is_err());
    }
}
