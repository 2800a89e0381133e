//! Built-in demo scene.

use std::collections::BTreeMap;

use crate::description::{
    CameraDescription, LightDescription, MaterialDescription, RenderSettings, SceneDescription,
    ShapeDescription,
};

const GRID: usize = 5;

/// A 5x5 grid of small green spheres above a red floor, lit by two point
/// lights.
pub fn sample_scene() -> SceneDescription {
    let mut materials = BTreeMap::new();
    materials.insert(
        "green".to_owned(),
        MaterialDescription {
            ambient: [0.3, 0.3, 0.3],
            emission: [0.0; 3],
            diffuse: [0.2, 0.4, 0.2],
            specular: [0.2, 0.35, 0.2],
            shininess: 15.0,
        },
    );
    materials.insert(
        "red".to_owned(),
        MaterialDescription {
            ambient: [0.4, 0.2, 0.2],
            emission: [0.0; 3],
            diffuse: [0.4, 0.2, 0.2],
            specular: [0.4, 0.2, 0.2],
            shininess: 5.0,
        },
    );

    let mut shapes = Vec::with_capacity(GRID * GRID + 1);
    for i in 0..GRID {
        for j in 0..GRID {
            shapes.push(ShapeDescription::Sphere {
                name: Some(format!("ball_{i}_{j}")),
                material: "green".to_owned(),
                center: [1.5 * (i as f64 - 2.0), -2.0, -2.0 * j as f64],
                radius: 0.5,
                scale: [1.0; 3],
                rotation: None,
            });
        }
    }
    shapes.push(ShapeDescription::Quad {
        name: Some("floor".to_owned()),
        material: "red".to_owned(),
        corners: [
            [-3.0, -4.0, 0.0],
            [4.0, -4.0, 0.0],
            [4.0, -4.0, -4.0],
            [-3.0, -4.0, -4.0],
        ],
    });

    let lights = vec![
        LightDescription::Point {
            name: Some("key".to_owned()),
            color: [0.2, 0.4, 0.2],
            position: [0.0, 5.0, 3.0],
            attenuation: [1.0, 0.0, 0.0],
        },
        LightDescription::Point {
            name: Some("fill".to_owned()),
            color: [0.4, 0.3, 0.3],
            position: [-6.0, 1.0, 3.0],
            attenuation: [1.0, 0.0, 0.0],
        },
    ];

    SceneDescription {
        camera: CameraDescription {
            eye: [0.0, 2.0, 6.0],
            look_at: [0.0; 3],
            up: [0.0, 1.0, 0.0],
            width: 400,
            height: 400,
            fov_y: 50.0,
        },
        render: RenderSettings::default(),
        materials,
        shapes,
        lights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_renderer::{Raytracer, Shape};

    #[test]
    fn test_sample_scene_builds() {
        let loaded = sample_scene().build().unwrap();
        assert_eq!(loaded.scene.len(), 26);
        assert_eq!(loaded.scene.lights().len(), 2);
        assert!(matches!(loaded.scene.shapes()[25], Shape::Quad(_)));
        assert_eq!(loaded.config.max_depth, 2);
        assert_eq!(loaded.config.num_shadow_rays, 1);
    }

    #[test]
    fn test_sample_scene_renders() {
        let mut loaded = sample_scene().build().unwrap();
        loaded.camera = loaded.camera.with_resolution(40, 40);
        let image = Raytracer::new(&loaded.camera, loaded.config).unwrap().draw(&loaded.scene);

        // Sky above the grid is empty, the middle of the frame is not
        assert_eq!(image.get(20, 0), [0, 0, 0]);
        assert!(image.pixels.iter().any(|p| *p != [0, 0, 0]));
    }
}
