//! Blinn-Phong local illumination.
//!
//! Computes the diffuse and specular contribution of a single light at a
//! surface point. Ambient and emission are not included here; the engine
//! adds them once per intersection.

use crate::{Color, Light, Material, Ray};
use lume_math::Vec3;

/// Color contributed by `light` at a point with unit `normal`.
///
/// `light_dir` is the unit direction towards the light, `ray` the ray that
/// hit the surface and `dist` the distance to the light used for
/// attenuation.
pub fn blinn_phong(
    light: &Light,
    light_dir: Vec3,
    normal: Vec3,
    ray: &Ray,
    material: &Material,
    dist: f64,
) -> Color {
    let attenuation = light.attenuation_at(dist);
    if !(attenuation > 0.0) {
        return Color::ZERO;
    }

    let n_dot_l = normal.dot(light_dir);
    let diffuse = if n_dot_l > 0.0 {
        material.diffuse.scale(n_dot_l)
    } else {
        Color::ZERO
    };

    // The half vector vanishes when the light sits exactly along the ray
    let specular = match (light_dir - ray.direction()).try_normalize() {
        Some(half) => {
            let n_dot_h = normal.dot(half);
            if n_dot_h > 0.0 {
                material.specular.scale(n_dot_h.powf(material.shininess))
            } else {
                Color::ZERO
            }
        }
        None => Color::ZERO,
    };

    light
        .color()
        .hadamard(diffuse + specular)
        .scale(1.0 / attenuation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attenuation, DirectionalLight, PointLight};

    fn material() -> Material {
        Material::new(Color::new(0.5, 0.25, 0.125), Color::new(0.25, 0.25, 0.25), 8.0)
            .with_ambient(Color::splat(0.1))
    }

    fn head_on_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z)
    }

    #[test]
    fn test_aligned_light_gives_full_diffuse_and_specular() {
        let light: Light = DirectionalLight::new(Color::ONE, Vec3::Z).unwrap().into();
        let color = blinn_phong(&light, Vec3::Z, Vec3::Z, &head_on_ray(), &material(), 1.0);

        // n.l = n.h = 1, so both terms come through unscaled
        let mat = material();
        assert_eq!(color, mat.diffuse + mat.specular);
    }

    #[test]
    fn test_diffuse_bounded_by_material_over_attenuation() {
        let light: Light = PointLight::new(
            Color::new(1.0, 0.5, 2.0),
            Vec3::new(0.0, 0.0, 4.0),
            Attenuation::new(1.0, 0.5, 0.0),
        )
        .unwrap()
        .into();

        let mat = Material::new(Color::new(0.5, 0.25, 0.125), Color::ZERO, 8.0);
        let dist = 4.0;
        let color = blinn_phong(&light, Vec3::Z, Vec3::Z, &head_on_ray(), &mat, dist);
        let bound = mat.diffuse.hadamard(light.color()).scale(1.0 / light.attenuation_at(dist));
        for i in 0..3 {
            assert!(color[i] <= bound[i] + 1e-12);
        }
        assert!((color - bound).magnitude() < 1e-12);

        // Tilting the light can only reduce the diffuse term
        let tilted = Vec3::new(0.6, 0.0, 0.8);
        let dimmer = blinn_phong(&light, tilted, Vec3::Z, &head_on_ray(), &mat, dist);
        assert!((dimmer - bound.scale(0.8)).magnitude() < 1e-12);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let light: Light = DirectionalLight::new(Color::ONE, -Vec3::Z).unwrap().into();
        let color = blinn_phong(&light, -Vec3::Z, Vec3::Z, &head_on_ray(), &material(), 1.0);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_grazing_specular_falls_off_with_shininess() {
        let light: Light = DirectionalLight::new(Color::ONE, Vec3::Z).unwrap().into();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -0.6, -0.8));
        let mat = Material::new(Color::ZERO, Color::ONE, 8.0);

        let color = blinn_phong(&light, Vec3::Z, Vec3::Z, &ray, &mat, 1.0);
        let half = (Vec3::Z - ray.direction()).normalize().unwrap();
        let expected = half.z.powf(8.0);
        assert!((color.x - expected).abs() < 1e-12);
        assert!(color.x < 1.0);
    }
}
