//! Recursive Whitted-style ray tracer.
//!
//! For every pixel an eye ray is traced into the scene. At the closest hit
//! the color accumulates:
//! - the material's ambient and emission terms
//! - Blinn-Phong shading from each light, averaged over jittered shadow
//!   rays for soft shadow edges
//! - mirror reflections traced recursively up to `max_depth`, slightly
//!   blurred by jittering the surface normal

use log::{debug, info};
use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::camera::Projection;
use crate::error::RenderError;
use crate::sampler::{jitter, pixel_rng};
use crate::shape::Intersection;
use crate::{blinn_phong, Camera, Color, ImageBuffer, Light, Material, Ray, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Maximum reflection depth; 0 disables reflections
    pub max_depth: u32,
    /// Shadow rays per light per intersection
    pub num_shadow_rays: u32,
    /// Reserved for supersampling; carried but not used yet
    pub sampling_factor: u32,
    /// Reflection rays cast from the primary intersection
    pub primary_reflection_rays: u32,
    /// Reflection rays cast from deeper intersections
    pub secondary_reflection_rays: u32,
    /// Scale of the random offset added to shadow ray directions
    pub shadow_jitter: f64,
    /// Scale of the random offset added to normals before reflecting
    pub reflection_jitter: f64,
    /// Distance secondary rays start away from the surface
    pub ray_epsilon: f64,
    /// Seed for all jitter; equal seeds give identical images
    pub seed: u64,
    /// Side length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            num_shadow_rays: 1,
            sampling_factor: 1,
            primary_reflection_rays: 4,
            secondary_reflection_rays: 1,
            shadow_jitter: 0.25,
            reflection_jitter: 0.001,
            ray_epsilon: 0.001,
            seed: 0,
            bucket_size: 64,
        }
    }
}

impl RenderConfig {
    /// Reject settings the tracer cannot work with.
    pub fn validate(&self) -> Result<(), RenderError> {
        let counts = [
            ("num_shadow_rays", self.num_shadow_rays),
            ("primary_reflection_rays", self.primary_reflection_rays),
            ("secondary_reflection_rays", self.secondary_reflection_rays),
            ("bucket_size", self.bucket_size),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(RenderError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }

        let scales = [
            ("shadow_jitter", self.shadow_jitter),
            ("reflection_jitter", self.reflection_jitter),
            ("ray_epsilon", self.ray_epsilon),
        ];
        for (name, value) in scales {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be finite and non-negative (got {value})"
                )));
            }
        }

        Ok(())
    }
}

/// The ray tracing engine: a validated configuration plus the camera
/// projection derived once per render.
#[derive(Debug, Clone)]
pub struct Raytracer {
    width: u32,
    height: u32,
    projection: Projection,
    config: RenderConfig,
}

impl Raytracer {
    /// Build an engine for `camera`, validating both inputs.
    pub fn new(camera: &Camera, config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let projection = camera.projection()?;

        Ok(Self {
            width: camera.image_width,
            height: camera.image_height,
            projection,
            config,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Primary ray through column `x`, row `y`.
    pub fn eye_ray(&self, x: u32, y: u32) -> Ray {
        self.projection.eye_ray(y as f64, x as f64)
    }

    /// Color seen along `ray`, `depth` reflections below the eye.
    ///
    /// The result is unclamped. Rays that hit nothing are black.
    pub fn find_color(&self, ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
        let Some((hit, shape)) = scene.closest_intersection(ray) else {
            return Color::ZERO;
        };
        let material = shape.material();

        let mut color = material.base_color();

        for light in scene.lights() {
            color += self.direct_light(light, &hit, ray, material, scene, rng);
        }

        if depth < self.config.max_depth {
            color += self.reflected_light(&hit, ray, material, scene, depth, rng);
        }

        color
    }

    /// Shading from one light, averaged over the unblocked shadow rays.
    fn direct_light(
        &self,
        light: &Light,
        hit: &Intersection,
        ray: &Ray,
        material: &Material,
        scene: &Scene,
        rng: &mut dyn RngCore,
    ) -> Color {
        let offset = light.offset_from(hit.point);
        let dist = offset.magnitude();
        let reach = light.occlusion_distance(offset);
        let weight = 1.0 / self.config.num_shadow_rays as f64;

        let mut color = Color::ZERO;
        for _ in 0..self.config.num_shadow_rays {
            let Some(dir) = (offset + jitter(rng, self.config.shadow_jitter)).try_normalize() else {
                continue;
            };
            let shadow_ray = Ray::new(hit.point + dir.scale(self.config.ray_epsilon), dir);

            let blocked = scene
                .closest_intersection(&shadow_ray)
                .is_some_and(|(occluder, _)| occluder.distance < reach);
            if !blocked {
                color += blinn_phong(light, dir, hit.normal, ray, material, dist).scale(weight);
            }
        }

        color
    }

    /// Mirror reflection, blurred over several rays at the primary hit.
    fn reflected_light(
        &self,
        hit: &Intersection,
        ray: &Ray,
        material: &Material,
        scene: &Scene,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let Some(incoming) = ray.direction().try_normalize() else {
            return Color::ZERO;
        };
        let num_rays = if depth == 0 {
            self.config.primary_reflection_rays
        } else {
            self.config.secondary_reflection_rays
        };
        let weight = material.specular.scale(1.0 / num_rays as f64);

        let mut color = Color::ZERO;
        for _ in 0..num_rays {
            let normal = (hit.normal + jitter(rng, self.config.reflection_jitter))
                .try_normalize()
                .unwrap_or(hit.normal);
            let Some(dir) = incoming.reflect(normal).try_normalize() else {
                continue;
            };
            let reflected = Ray::new(hit.point + dir.scale(self.config.ray_epsilon), dir);

            color += weight.hadamard(self.find_color(&reflected, scene, depth + 1, rng));
        }

        color
    }

    /// Trace the primary ray of one pixel with that pixel's own jitter
    /// stream.
    pub fn render_pixel(&self, scene: &Scene, x: u32, y: u32) -> Color {
        let index = y as u64 * self.width as u64 + x as u64;
        let mut rng = pixel_rng(self.config.seed, index);
        self.find_color(&self.eye_ray(x, y), scene, 0, &mut rng)
    }

    /// Render the whole image, buckets in parallel.
    pub fn draw(&self, scene: &Scene) -> ImageBuffer {
        let buckets = generate_buckets(self.width, self.height, self.config.bucket_size);
        info!(
            "Rendering {}x{}: {} shapes, {} lights, {} buckets",
            self.width,
            self.height,
            scene.len(),
            scene.lights().len(),
            buckets.len()
        );

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let result = render_bucket(bucket, self, scene);
                debug!("Bucket {} done ({} pixels)", bucket.index, bucket.pixel_count());
                result
            })
            .collect();

        let mut image = ImageBuffer::new(self.width, self.height);
        for result in &results {
            result.write_to(&mut image);
        }

        info!("Rendered {} pixels", image.pixels.len());
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color_to_rgb, DirectionalLight, PointLight, Attenuation, Sphere};
    use lume_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn shiny() -> Arc<Material> {
        Arc::new(
            Material::new(Color::splat(0.5), Color::splat(0.25), 10.0).with_ambient(Color::splat(0.125)),
        )
    }

    fn front_camera(size: u32) -> Camera {
        Camera::new()
            .with_resolution(size, size)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_fov(30.0)
    }

    fn sphere_scene(light_direction: Vec3) -> Scene {
        let mut scene = Scene::new();
        scene.add_shape(Sphere::with_center(Vec3::ZERO, 1.0, shiny()).unwrap());
        scene.add_light(DirectionalLight::new(Color::ONE, light_direction).unwrap());
        scene
    }

    fn exact_config() -> RenderConfig {
        RenderConfig {
            max_depth: 0,
            num_shadow_rays: 1,
            shadow_jitter: 0.0,
            reflection_jitter: 0.0,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let no_shadow_rays = RenderConfig {
            num_shadow_rays: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(no_shadow_rays.validate(), Err(RenderError::InvalidConfig(_))));

        let negative = RenderConfig {
            ray_epsilon: -1.0,
            ..RenderConfig::default()
        };
        assert!(negative.validate().is_err());

        let no_buckets = RenderConfig {
            bucket_size: 0,
            ..RenderConfig::default()
        };
        assert!(Raytracer::new(&front_camera(4), no_buckets).is_err());
    }

    #[test]
    fn test_lit_sphere_center_and_corner() {
        let tracer = Raytracer::new(&front_camera(10), exact_config()).unwrap();
        let image = tracer.draw(&sphere_scene(Vec3::Z));

        // Light, normal and half vector all align at the center:
        // ambient + diffuse + specular = 0.125 + 0.5 + 0.25
        assert_eq!(image.get(5, 5), color_to_rgb(Color::splat(0.875)));
        assert_eq!(image.get(5, 5), [224, 224, 224]);

        assert_eq!(image.get(0, 0), [0, 0, 0]);
        assert_eq!(image.get(9, 9), [0, 0, 0]);
    }

    #[test]
    fn test_surface_facing_away_gets_ambient_only() {
        let tracer = Raytracer::new(&front_camera(10), exact_config()).unwrap();
        let image = tracer.draw(&sphere_scene(-Vec3::Z));
        assert_eq!(image.get(5, 5), color_to_rgb(Color::splat(0.125)));
    }

    #[test]
    fn test_shadowed_point_gets_ambient_only() {
        let mut scene = sphere_scene(Vec3::Z);
        // Blocker between the lit sphere and the light at +Z
        scene.add_shape(Sphere::with_center(Vec3::new(0.0, 0.0, 3.0), 0.5, shiny()).unwrap());

        let tracer = Raytracer::new(&front_camera(10), exact_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);
        let color = tracer.find_color(&ray, &scene, 0, &mut rng);
        assert_eq!(color, Color::splat(0.125));
    }

    #[test]
    fn test_point_light_beyond_occluder_range() {
        // Light sits between the surface and the other sphere
        let mut scene = Scene::new();
        scene.add_shape(Sphere::with_center(Vec3::ZERO, 1.0, shiny()).unwrap());
        scene.add_shape(Sphere::with_center(Vec3::new(0.0, 0.0, 10.0), 1.0, shiny()).unwrap());
        scene.add_light(PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, 3.0), Attenuation::NONE).unwrap());

        let tracer = Raytracer::new(&front_camera(10), exact_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);
        let color = tracer.find_color(&ray, &scene, 0, &mut rng);
        assert!((color - Color::splat(0.875)).magnitude() < 1e-12);
    }

    #[test]
    fn test_unjittered_shadow_rays_average_to_one() {
        let mut scene = Scene::new();
        scene.add_shape(Sphere::with_center(Vec3::ZERO, 1.0, shiny()).unwrap());
        scene.add_light(PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, 3.0), Attenuation::NONE).unwrap());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);

        let single = Raytracer::new(&front_camera(4), exact_config()).unwrap();
        let many = Raytracer::new(
            &front_camera(4),
            RenderConfig {
                num_shadow_rays: 8,
                ..exact_config()
            },
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let one = single.find_color(&ray, &scene, 0, &mut rng);
        let eight = many.find_color(&ray, &scene, 0, &mut rng);
        assert!((one - Color::splat(0.875)).magnitude() < 1e-12, "{one:?}");
        assert!((eight - one).magnitude() < 1e-12, "{eight:?}");
    }

    #[test]
    fn test_partial_occlusion_gives_penumbra() {
        let mut scene = Scene::new();
        scene.add_shape(Sphere::with_center(Vec3::ZERO, 1.0, shiny()).unwrap());
        scene.add_light(PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, 5.0), Attenuation::NONE).unwrap());
        let mut blocked = scene.clone();
        // Small blocker halfway to the light covers part of the jitter cone
        blocked.add_shape(Sphere::with_center(Vec3::new(0.0, 0.0, 3.0), 0.3, shiny()).unwrap());

        let config = RenderConfig {
            num_shadow_rays: 64,
            shadow_jitter: 2.0,
            ..exact_config()
        };
        let tracer = Raytracer::new(&front_camera(4), config).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);

        // Same seed, so both scenes see the same jittered directions
        let lit = tracer.find_color(&ray, &scene, 0, &mut StdRng::seed_from_u64(11));
        let shaded = tracer.find_color(&ray, &blocked, 0, &mut StdRng::seed_from_u64(11));
        assert!(shaded.x > 0.125, "{shaded:?}");
        assert!(shaded.x < lit.x, "{shaded:?} vs {lit:?}");
    }

    #[test]
    fn test_miss_is_black() {
        let tracer = Raytracer::new(&front_camera(10), exact_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(tracer.find_color(&ray, &sphere_scene(Vec3::Z), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_reflection_adds_specular_weighted_color() {
        let mirror = Arc::new(Material::new(Color::ZERO, Color::splat(0.5), 1.0).with_ambient(Color::new(0.25, 0.0, 0.0)));
        let green = Arc::new(Material::new(Color::ZERO, Color::ZERO, 1.0).with_ambient(Color::new(0.0, 0.5, 0.0)));

        // The mirror faces the green sphere behind the ray origin
        let mut scene = Scene::new();
        scene.add_shape(Sphere::with_center(Vec3::ZERO, 1.0, mirror).unwrap());
        scene.add_shape(Sphere::with_center(Vec3::new(0.0, 0.0, 10.0), 1.0, green).unwrap());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);

        let flat = Raytracer::new(&front_camera(4), exact_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(flat.find_color(&ray, &scene, 0, &mut rng), Color::new(0.25, 0.0, 0.0));

        let config = RenderConfig {
            max_depth: 1,
            ..exact_config()
        };
        let mirrored = Raytracer::new(&front_camera(4), config).unwrap();
        let color = mirrored.find_color(&ray, &scene, 0, &mut rng);
        assert!((color - Color::new(0.25, 0.25, 0.0)).magnitude() < 1e-12, "{color:?}");
    }

    #[test]
    fn test_facing_mirrors_recurse_to_max_depth() {
        let red = Arc::new(Material::new(Color::ZERO, Color::splat(0.5), 1.0).with_ambient(Color::new(0.25, 0.0, 0.0)));
        let green = Arc::new(Material::new(Color::ZERO, Color::splat(0.5), 1.0).with_ambient(Color::new(0.0, 0.5, 0.0)));

        let mut scene = Scene::new();
        scene.add_shape(Sphere::with_center(Vec3::ZERO, 1.0, red).unwrap());
        scene.add_shape(Sphere::with_center(Vec3::new(0.0, 0.0, 10.0), 1.0, green).unwrap());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let tracer = |max_depth, secondary_reflection_rays| {
            let config = RenderConfig {
                max_depth,
                secondary_reflection_rays,
                ..exact_config()
            };
            Raytracer::new(&front_camera(4), config).unwrap()
        };
        let mut rng = StdRng::seed_from_u64(5);

        // red + 0.5 * (green + 0.5 * red)
        let two = tracer(2, 1).find_color(&ray, &scene, 0, &mut rng);
        assert!((two - Color::new(0.3125, 0.25, 0.0)).magnitude() < 1e-12, "{two:?}");

        // One more bounce adds 0.25 * 0.5 * green
        let three = tracer(3, 1).find_color(&ray, &scene, 0, &mut rng);
        assert!((three - Color::new(0.3125, 0.3125, 0.0)).magnitude() < 1e-12, "{three:?}");

        // Unjittered secondary rays all agree, so their count does not matter
        let spread = tracer(3, 3).find_color(&ray, &scene, 0, &mut rng);
        assert!((spread - three).magnitude() < 1e-12, "{spread:?}");
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut scene = sphere_scene(Vec3::new(1.0, 1.0, 1.0));
        scene.add_light(PointLight::new(Color::splat(0.5), Vec3::new(-3.0, 2.0, 4.0), Attenuation::NONE).unwrap());
        let config = RenderConfig {
            num_shadow_rays: 4,
            seed: 42,
            ..RenderConfig::default()
        };

        let tracer = Raytracer::new(&front_camera(24), config.clone()).unwrap();
        let first = tracer.draw(&scene);
        let second = tracer.draw(&scene);
        assert_eq!(first, second);

        // Tiling does not change which jitter a pixel sees
        let tiled = Raytracer::new(
            &front_camera(24),
            RenderConfig {
                bucket_size: 5,
                ..config
            },
        )
        .unwrap();
        assert_eq!(tiled.draw(&scene), first);
    }

    #[test]
    fn test_render_pixel_matches_draw() {
        let scene = sphere_scene(Vec3::Z);
        let tracer = Raytracer::new(&front_camera(10), RenderConfig::default()).unwrap();
        let image = tracer.draw(&scene);
        for (x, y) in [(5, 5), (4, 6), (0, 0)] {
            assert_eq!(image.get(x, y), color_to_rgb(tracer.render_pixel(&scene, x, y)));
        }
    }
}
