//! Serializable scene description.
//!
//! This is the on-disk form of a scene: plain arrays for vectors, materials
//! referenced by name, and every shape or light as a tagged object. Nothing
//! here is validated; see [`SceneDescription::build`].

use std::collections::BTreeMap;

use lume_renderer::RenderConfig;
use serde::{Deserialize, Serialize};

/// A 3-vector as it appears in the file.
pub type Triple = [f64; 3];

/// A complete scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,
    #[serde(default)]
    pub shapes: Vec<ShapeDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDescription {
    pub eye: Triple,
    pub look_at: Triple,
    #[serde(default = "default_up")]
    pub up: Triple,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_y: f64,
}

fn default_up() -> Triple {
    [0.0, 1.0, 0.0]
}

/// Optional overrides of the engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_shadow_rays: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_factor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_reflection_rays: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_reflection_rays: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_jitter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection_jitter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ray_epsilon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_size: Option<u32>,
}

impl RenderSettings {
    /// `base` with every present field replaced.
    pub fn apply(&self, base: RenderConfig) -> RenderConfig {
        RenderConfig {
            max_depth: self.max_depth.unwrap_or(base.max_depth),
            num_shadow_rays: self.num_shadow_rays.unwrap_or(base.num_shadow_rays),
            sampling_factor: self.sampling_factor.unwrap_or(base.sampling_factor),
            primary_reflection_rays: self
                .primary_reflection_rays
                .unwrap_or(base.primary_reflection_rays),
            secondary_reflection_rays: self
                .secondary_reflection_rays
                .unwrap_or(base.secondary_reflection_rays),
            shadow_jitter: self.shadow_jitter.unwrap_or(base.shadow_jitter),
            reflection_jitter: self.reflection_jitter.unwrap_or(base.reflection_jitter),
            ray_epsilon: self.ray_epsilon.unwrap_or(base.ray_epsilon),
            seed: self.seed.unwrap_or(base.seed),
            bucket_size: self.bucket_size.unwrap_or(base.bucket_size),
        }
    }
}

/// Missing color terms default to black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDescription {
    #[serde(default)]
    pub ambient: Triple,
    #[serde(default)]
    pub emission: Triple,
    #[serde(default)]
    pub diffuse: Triple,
    #[serde(default)]
    pub specular: Triple,
    pub shininess: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationDescription {
    pub axis: Triple,
    pub degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ShapeDescription {
    /// Unit sphere placed by `translate(center) * rotate * scale(radius * scale)`
    Sphere {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        material: String,
        #[serde(default)]
        center: Triple,
        #[serde(default = "unit")]
        radius: f64,
        #[serde(default = "unit_scale")]
        scale: Triple,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation: Option<RotationDescription>,
    },
    /// Corners in boundary order A, B, C, D
    Quad {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        material: String,
        corners: [Triple; 4],
    },
}

impl ShapeDescription {
    pub fn name(&self) -> Option<&str> {
        match self {
            ShapeDescription::Sphere { name, .. } | ShapeDescription::Quad { name, .. } => name.as_deref(),
        }
    }

    pub fn material(&self) -> &str {
        match self {
            ShapeDescription::Sphere { material, .. } | ShapeDescription::Quad { material, .. } => material,
        }
    }
}

fn unit() -> f64 {
    1.0
}

fn unit_scale() -> Triple {
    [1.0; 3]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum LightDescription {
    Point {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        color: Triple,
        position: Triple,
        /// Constant, linear and quadratic falloff
        #[serde(default = "no_falloff")]
        attenuation: Triple,
    },
    Directional {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        color: Triple,
        /// Points towards the light
        direction: Triple,
    },
}

impl LightDescription {
    pub fn name(&self) -> Option<&str> {
        match self {
            LightDescription::Point { name, .. } | LightDescription::Directional { name, .. } => {
                name.as_deref()
            }
        }
    }
}

fn no_falloff() -> Triple {
    [1.0, 0.0, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_defaults() {
        let shape: ShapeDescription =
            serde_json::from_str(r#"{"type": "sphere", "material": "red"}"#).unwrap();
        assert_eq!(
            shape,
            ShapeDescription::Sphere {
                name: None,
                material: "red".into(),
                center: [0.0; 3],
                radius: 1.0,
                scale: [1.0; 3],
                rotation: None,
            }
        );
        assert_eq!(shape.material(), "red");
    }

    #[test]
    fn test_light_defaults() {
        let light: LightDescription = serde_json::from_str(
            r#"{"type": "point", "name": "key", "color": [1, 1, 1], "position": [0, 5, 3]}"#,
        )
        .unwrap();
        assert_eq!(light.name(), Some("key"));
        match light {
            LightDescription::Point { attenuation, .. } => assert_eq!(attenuation, [1.0, 0.0, 0.0]),
            other => panic!("expected a point light, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let quad = r#"{"type": "quad", "material": "m",
            "corners": [[0, 0, 0], [1, 0, 0], [1, 0, -1], [0, 0, -1]]"#;
        assert!(serde_json::from_str::<ShapeDescription>(&format!("{quad}}}")).is_ok());

        // Complete apart from one extra key
        let extra = format!(r#"{quad}, "colour": 1}}"#);
        let err = serde_json::from_str::<ShapeDescription>(&extra).unwrap_err();
        assert!(err.to_string().contains("colour"), "{err}");

        let unknown_type = r#"{"type": "torus", "material": "m"}"#;
        assert!(serde_json::from_str::<ShapeDescription>(unknown_type).is_err());
    }

    #[test]
    fn test_render_settings_override_only_present_fields() {
        let settings: RenderSettings = serde_json::from_str(r#"{"max_depth": 5, "seed": 9}"#).unwrap();
        let config = settings.apply(RenderConfig::default());
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.seed, 9);
        assert_eq!(config.num_shadow_rays, RenderConfig::default().num_shadow_rays);
    }
}
