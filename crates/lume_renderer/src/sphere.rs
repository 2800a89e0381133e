//! Sphere and ellipsoid primitive.
//!
//! Every sphere is the unit sphere at the origin seen through an affine
//! transform. Rays are pulled into the sphere's local space with the inverse
//! transform, intersected there, and the hit is pushed back out: the point
//! through the forward transform, the normal through the inverse transpose.

use std::sync::Arc;

use crate::{error::ShapeError, shape::Intersection, Material, Ray};
use lume_math::{Mat4, Vec3};

/// A (possibly scaled, rotated and translated) sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    transform: Mat4,
    inverse: Mat4,
    inverse_transpose: Mat4,
    pub(crate) material: Arc<Material>,
}

impl Sphere {
    /// Create a sphere from the transform mapping the unit sphere into the
    /// world. Fails if the transform is not invertible or the material is
    /// invalid.
    pub fn new(transform: Mat4, material: Arc<Material>) -> Result<Self, ShapeError> {
        material.validate()?;
        let inverse = transform
            .inverse()
            .map_err(ShapeError::SingularTransform)?;

        Ok(Self {
            transform,
            inverse,
            inverse_transpose: inverse.transpose(),
            material,
        })
    }

    /// A round sphere of `radius` at `center`.
    pub fn with_center(center: Vec3, radius: f64, material: Arc<Material>) -> Result<Self, ShapeError> {
        Self::new(
            Mat4::translation(center) * Mat4::scaling(Vec3::splat(radius)),
            material,
        )
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Closest intersection at or beyond the ray origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let start = self.inverse.transform_point(ray.origin());
        let dir = self.inverse.transform_vector(ray.direction());

        // |start + t*dir|^2 = 1
        let a = dir.dot(dir);
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * dir.dot(start);
        let c = start.dot(start) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        };

        let local = start + t * dir;
        let point = self.transform.transform_point(local);
        let normal = self.inverse_transpose.transform_vector(local).try_normalize()?;

        // t is in local units, so measure the distance in the world
        Some(Intersection {
            point,
            normal,
            distance: point.distance(ray.origin()),
        })
    }
}
