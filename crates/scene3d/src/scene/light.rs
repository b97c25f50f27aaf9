//! Light payload for scene nodes
//!
//! Pure data, consumed by whatever renderer sits on top of the scene graph.

use crate::foundation::math::Vec3;

/// Kind-specific light parameters
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Directional light (sun-style), direction in world space
    Directional {
        /// Direction the light travels, normalized by the constructor
        direction: Vec3,
    },
    /// Point light with distance attenuation
    Point {
        /// Constant, linear, and quadratic attenuation factors
        attenuation: (f32, f32, f32),
    },
}

/// Light source attached to a scene node
///
/// A point light's position comes from its node; a directional light ignores
/// the node position.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// RGB color, each channel in [0, 1]
    pub color: Vec3,
    /// Brightness multiplier
    pub intensity: f32,
    /// Directional or point parameters
    pub kind: LightKind,
}

impl Light {
    /// Create a white directional light
    pub fn directional(direction: Vec3) -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            kind: LightKind::Directional {
                direction: direction.normalize(),
            },
        }
    }

    /// Create a white point light with the given attenuation factors
    pub fn point(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            kind: LightKind::Point {
                attenuation: (constant, linear, quadratic),
            },
        }
    }

    /// Builder: set the light color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Builder: set the light intensity
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}
