//! Light sources: point and directional.

use crate::{error::LightError, Color};
use lume_math::Vec3;

/// Distance falloff `constant + linear * d + quadratic * d^2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

impl Attenuation {
    /// No falloff.
    pub const NONE: Attenuation = Attenuation::new(1.0, 0.0, 0.0);

    pub const fn new(constant: f64, linear: f64, quadratic: f64) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Divisor applied to the light's intensity at distance `d`.
    #[inline]
    pub fn at(&self, d: f64) -> f64 {
        self.constant + self.linear * d + self.quadratic * d * d
    }

    fn validate(&self) -> Result<(), LightError> {
        let coeffs = [self.constant, self.linear, self.quadratic];
        let valid = coeffs.iter().all(|c| c.is_finite() && *c >= 0.0)
            && coeffs.iter().any(|c| *c > 0.0);
        if valid {
            Ok(())
        } else {
            Err(LightError::InvalidAttenuation(coeffs))
        }
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light at a position, falling off with distance.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    color: Color,
    position: Vec3,
    attenuation: Attenuation,
}

impl PointLight {
    pub fn new(color: Color, position: Vec3, attenuation: Attenuation) -> Result<Self, LightError> {
        attenuation.validate()?;
        Ok(Self {
            color,
            position,
            attenuation,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// A light infinitely far away, shining along a fixed direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    color: Color,
    /// Direction from any surface point towards the light
    direction: Vec3,
}

impl DirectionalLight {
    /// `direction` points towards the light. It is stored as given.
    pub fn new(color: Color, direction: Vec3) -> Result<Self, LightError> {
        if direction.try_normalize().is_none() {
            return Err(LightError::ZeroDirection);
        }
        Ok(Self { color, direction })
    }
}

/// A light source in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

impl Light {
    /// Un-normalized direction from `point` to the light.
    ///
    /// For point lights the magnitude is the distance to the light; for
    /// directional lights it is the constant stored direction.
    pub fn offset_from(&self, point: Vec3) -> Vec3 {
        match self {
            Light::Point(l) => l.position - point,
            Light::Directional(l) => l.direction,
        }
    }

    /// How far a shadow ray must travel before an occluder no longer
    /// blocks this light.
    pub fn occlusion_distance(&self, offset: Vec3) -> f64 {
        match self {
            Light::Point(_) => offset.magnitude(),
            // The offset is the stored direction, not a distance; any hit
            // along it is in front of a light at infinity
            Light::Directional(_) => f64::INFINITY,
        }
    }

    /// Attenuation divisor at distance `d`.
    pub fn attenuation_at(&self, d: f64) -> f64 {
        match self {
            Light::Point(l) => l.attenuation.at(d),
            Light::Directional(_) => 1.0,
        }
    }

    /// Light intensity.
    pub fn color(&self) -> Color {
        match self {
            Light::Point(l) => l.color,
            Light::Directional(l) => l.color,
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_light_offset_and_attenuation() {
        let light: Light = PointLight::new(
            Color::ONE,
            Vec3::new(0.0, 5.0, 0.0),
            Attenuation::new(1.0, 0.5, 0.25),
        )
        .unwrap()
        .into();

        let offset = light.offset_from(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(offset, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(light.occlusion_distance(offset), 4.0);
        assert_eq!(light.attenuation_at(2.0), 1.0 + 1.0 + 1.0);
        assert_eq!(light.color(), Color::ONE);
    }

    #[test]
    fn test_directional_light_is_constant() {
        let dir = Vec3::new(0.0, 0.0, 2.0);
        let light: Light = DirectionalLight::new(Color::splat(0.5), dir).unwrap().into();

        assert_eq!(light.offset_from(Vec3::ZERO), dir);
        assert_eq!(light.offset_from(Vec3::new(100.0, -3.0, 7.0)), dir);
        assert_eq!(light.attenuation_at(1e6), 1.0);
        assert_eq!(light.occlusion_distance(dir), f64::INFINITY);
    }

    #[test]
    fn test_invalid_lights_fail() {
        assert!(matches!(
            PointLight::new(Color::ONE, Vec3::ZERO, Attenuation::new(0.0, 0.0, 0.0)),
            Err(LightError::InvalidAttenuation(_))
        ));
        assert!(PointLight::new(Color::ONE, Vec3::ZERO, Attenuation::new(1.0, -0.1, 0.0)).is_err());
        assert!(PointLight::new(Color::ONE, Vec3::ZERO, Attenuation::new(0.0, 0.0, 1.0)).is_ok());
        assert_eq!(
            DirectionalLight::new(Color::ONE, Vec3::ZERO),
            Err(LightError::ZeroDirection)
        );
    }
}
