//! Scene loading and validation.
//!
//! Parsing a file only checks its shape; [`SceneDescription::build`] then
//! constructs every material, shape and light, stopping at the first one
//! that is invalid so that nothing is rendered from a broken scene.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use lume_math::{Mat4, Vec3};
use lume_renderer::{
    Attenuation, Camera, Color, DirectionalLight, Light, Material, PointLight, Quad, RenderConfig,
    Scene, Shape, Sphere,
};

use crate::description::{LightDescription, MaterialDescription, SceneDescription, ShapeDescription};
use crate::error::{SceneError, SceneResult};

/// Everything the renderer needs, validated.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub camera: Camera,
    pub config: RenderConfig,
    pub scene: Scene,
}

/// Load a scene description from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!("Read scene file {}", path.display());
    load_scene_from_str(&text)
}

/// Parse a scene description from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<SceneDescription> {
    Ok(serde_json::from_str(json)?)
}

fn vec3(t: [f64; 3]) -> Vec3 {
    Vec3::from_array(t)
}

impl SceneDescription {
    /// Build the camera, engine configuration and scene.
    ///
    /// Errors name the failing material, shape or light.
    pub fn build(&self) -> SceneResult<LoadedScene> {
        let camera = Camera::new()
            .with_resolution(self.camera.width, self.camera.height)
            .with_position(
                vec3(self.camera.eye),
                vec3(self.camera.look_at),
                vec3(self.camera.up),
            )
            .with_fov(self.camera.fov_y);
        camera.projection()?;

        let config = self.render.apply(RenderConfig::default());
        config.validate()?;

        let materials = self.build_materials()?;

        let mut scene = Scene::new();
        for (index, desc) in self.shapes.iter().enumerate() {
            let shape = build_shape(index, desc, &materials)?;
            debug!("Built shape #{index} {:?}", desc.name().unwrap_or("<unnamed>"));
            scene.add_shape(shape);
        }
        for (index, desc) in self.lights.iter().enumerate() {
            let light = build_light(desc).map_err(|source| SceneError::Light {
                index,
                name: desc.name().map(str::to_owned),
                source,
            })?;
            debug!("Built light #{index} {:?}", desc.name().unwrap_or("<unnamed>"));
            scene.add_light(light);
        }

        info!(
            "Loaded scene: {} materials, {} shapes, {} lights",
            materials.len(),
            scene.len(),
            scene.lights().len()
        );

        Ok(LoadedScene {
            camera,
            config,
            scene,
        })
    }

    fn build_materials(&self) -> SceneResult<HashMap<&str, Arc<Material>>> {
        self.materials
            .iter()
            .map(|(name, desc)| {
                let material = build_material(desc);
                match material.validate() {
                    Ok(()) => Ok((name.as_str(), Arc::new(material))),
                    Err(source) => Err(SceneError::Material {
                        name: name.clone(),
                        source,
                    }),
                }
            })
            .collect()
    }
}

fn build_material(desc: &MaterialDescription) -> Material {
    Material::new(Color::from_array(desc.diffuse), Color::from_array(desc.specular), desc.shininess)
        .with_ambient(Color::from_array(desc.ambient))
        .with_emission(Color::from_array(desc.emission))
}

fn build_shape(
    index: usize,
    desc: &ShapeDescription,
    materials: &HashMap<&str, Arc<Material>>,
) -> SceneResult<Shape> {
    let name = || desc.name().map(str::to_owned);

    let material = materials
        .get(desc.material())
        .cloned()
        .ok_or_else(|| SceneError::UnknownMaterial {
            index,
            name: name(),
            material: desc.material().to_owned(),
        })?;

    let shape = match desc {
        ShapeDescription::Sphere {
            center,
            radius,
            scale,
            rotation,
            ..
        } => {
            let rotate = match rotation {
                Some(r) => Mat4::rotation(vec3(r.axis), r.degrees).map_err(|source| {
                    SceneError::Rotation {
                        index,
                        name: name(),
                        source,
                    }
                })?,
                None => Mat4::IDENTITY,
            };
            let transform =
                Mat4::translation(vec3(*center)) * rotate * Mat4::scaling(vec3(*scale).scale(*radius));
            Sphere::new(transform, material).map(Shape::from)
        }
        ShapeDescription::Quad { corners, .. } => {
            let [a, b, c, d] = corners.map(vec3);
            Quad::new(a, b, c, d, material).map(Shape::from)
        }
    };

    shape.map_err(|source| SceneError::Shape {
        index,
        name: name(),
        source,
    })
}

fn build_light(desc: &LightDescription) -> Result<Light, lume_renderer::LightError> {
    match desc {
        LightDescription::Point {
            color,
            position,
            attenuation: [constant, linear, quadratic],
            ..
        } => PointLight::new(
            Color::from_array(*color),
            vec3(*position),
            Attenuation::new(*constant, *linear, *quadratic),
        )
        .map(Light::from),
        LightDescription::Directional {
            color, direction, ..
        } => DirectionalLight::new(Color::from_array(*color), vec3(*direction)).map(Light::from),
    }
}
