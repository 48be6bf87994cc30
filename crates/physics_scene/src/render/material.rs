//! Materials for physics object meshes
//!
//! Objects get a standard lit material whose base color comes from the
//! 24-bit integer color in their configuration. Color never reaches the
//! simulation.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

/// RGB color with normalized components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red in `[0, 1]`
    pub r: f32,
    /// Green in `[0, 1]`
    pub g: f32,
    /// Blue in `[0, 1]`
    pub b: f32,
}

impl Color {
    /// Pure green, the default object color
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0 };

    /// Create a color from normalized components
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` integer; bits above 24 are ignored
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f32::from(((hex >> shift) & 0xff) as u8) / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Pack back into `0xRRGGBB`
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| u32::from((c.clamp(0.0, 1.0) * 255.0).round() as u8);
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Color as a vector, the layout material parameters use
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREEN
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Standard material parameters for lit rendering
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterialParams {
    /// Base color (albedo) - RGB values
    pub base_color: Vec3,
    /// Alpha transparency value
    pub alpha: f32,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Emission color for self-illuminated materials
    pub emission: Vec3,
}

impl Default for StandardMaterialParams {
    fn default() -> Self {
        Self {
            base_color: Vec3::new(1.0, 1.0, 1.0),
            alpha: 1.0,
            metallic: 0.0,
            roughness: 1.0,
            emission: Vec3::zeros(),
        }
    }
}

/// Material resource attached to a mesh instance
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Lighting parameters
    pub params: StandardMaterialParams,
    /// Optional name for debugging
    pub name: Option<String>,
}

impl Material {
    /// Create a standard material from explicit parameters
    pub fn standard(params: StandardMaterialParams) -> Self {
        Self { params, name: None }
    }

    /// Create a standard material with the given base color and default lighting terms
    pub fn from_color(color: Color) -> Self {
        Self::standard(StandardMaterialParams {
            base_color: color.to_vec3(),
            ..Default::default()
        })
    }

    /// Set the material name for debugging
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Base color as an RGBA array for uniform upload
    pub fn base_color_rgba(&self) -> [f32; 4] {
        let c = &self.params.base_color;
        [c.x, c.y, c.z, self.params.alpha]
    }

    /// Base color packed as `0xRRGGBB`
    pub fn base_color_hex(&self) -> u32 {
        let c = &self.params.base_color;
        Color::new(c.x, c.y, c.z).to_hex()
    }
}
