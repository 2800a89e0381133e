//! Surface material for Blinn-Phong shading.

use crate::error::MaterialError;
use lume_math::Vec3;

/// Color type alias (RGB, linear, unclamped until the final image write)
pub type Color = Vec3;

/// Lighting properties of a surface.
///
/// Materials are shared read-only between shapes (see [`crate::Shape`]),
/// so they are plain values wrapped in an `Arc` by whoever builds the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub emission: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Blinn-Phong exponent; must be positive
    pub shininess: f64,
}

impl Material {
    /// Create a material with no ambient or emission term.
    pub fn new(diffuse: Color, specular: Color, shininess: f64) -> Self {
        Self {
            ambient: Color::ZERO,
            emission: Color::ZERO,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Set the ambient term.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the emission term.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// The color a surface contributes regardless of lighting.
    #[inline]
    pub fn base_color(&self) -> Color {
        self.ambient + self.emission
    }

    /// Check that the shininess is positive and every term is finite.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !(self.shininess > 0.0 && self.shininess.is_finite()) {
            return Err(MaterialError::InvalidShininess(self.shininess));
        }
        let terms = [
            ("ambient", self.ambient),
            ("emission", self.emission),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
        ];
        for (name, term) in terms {
            if !term.is_finite() {
                return Err(MaterialError::NonFinite {
                    term: name,
                    value: term.to_array(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5), Color::ZERO, 1.0)
    }
}
