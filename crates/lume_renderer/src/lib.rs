//! Lume renderer - CPU recursive ray tracing
//!
//! A Whitted-style ray tracer: spheres, ellipsoids and bounded quads lit by
//! point and directional lights with Blinn-Phong shading, jittered soft
//! shadows and blurred mirror reflections. Images are rendered in parallel
//! buckets with a per-pixel seeded jitter source, so a fixed seed always
//! produces the same image.

mod bucket;
mod camera;
mod error;
mod light;
mod material;
mod quad;
mod raster;
mod ray;
mod renderer;
mod sampler;
mod scene;
mod shading;
mod shape;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, Projection};
pub use error::{LightError, MaterialError, RenderError, ShapeError};
pub use light::{Attenuation, DirectionalLight, Light, PointLight};
pub use material::{Color, Material};
pub use quad::{Quad, COPLANAR_EPSILON};
pub use raster::{color_to_rgb, ImageBuffer};
pub use ray::Ray;
pub use renderer::{RenderConfig, Raytracer};
pub use sampler::{jitter, pixel_rng, symmetric};
pub use scene::Scene;
pub use shading::blinn_phong;
pub use shape::{Intersection, Shape};
pub use sphere::Sphere;

/// Re-export the algebra types from lume_math
pub use lume_math::{Mat3, Mat4, MathError, Vec3, Vec4};
