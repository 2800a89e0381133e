//! Shape variants and the intersection record they produce.

use std::sync::Arc;

use crate::{Material, Quad, Ray, Sphere};
use lume_math::Vec3;

/// Record of a ray-shape intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the point (outward, not flipped towards the ray)
    pub normal: Vec3,
    /// How far along the ray `point` lies. Spheres report the world
    /// distance and quads the ray parameter `t`; the two agree only for
    /// unit-length ray directions.
    pub distance: f64,
}

/// A primitive in the scene.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Quad(Quad),
}

impl Shape {
    /// The material shared by the whole surface.
    pub fn material(&self) -> &Material {
        match self {
            Shape::Sphere(s) => s.material(),
            Shape::Quad(q) => q.material(),
        }
    }

    /// Shared handle to the material.
    pub fn material_arc(&self) -> &Arc<Material> {
        match self {
            Shape::Sphere(s) => &s.material,
            Shape::Quad(q) => &q.material,
        }
    }

    /// Closest intersection of `ray` with this shape, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Quad(q) => q.intersect(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Quad> for Shape {
    fn from(quad: Quad) -> Self {
        Shape::Quad(quad)
    }
}
