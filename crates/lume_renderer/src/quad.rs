//! Bounded planar quadrilateral primitive.
//!
//! A quad is given by four coplanar corners A, B, C, D in boundary order.
//! Its plane is spanned by the unit edge directions `u = (B - A)/|B - A|`
//! and `v = (D - A)/|D - A|`. Points in the plane are described by their
//! coordinates `(p, q)` along `u` and `v` from A. A ray hit is found by
//! solving `A + p*u + q*v = origin + t*dir` as a 3x3 linear system, then
//! testing `(p, q)` against the four edges.

use std::sync::Arc;

use crate::{error::ShapeError, shape::Intersection, Material, Ray};
use lume_math::{Mat3, Vec3};

/// Relative tolerance for the coplanarity check of the fourth corner.
pub const COPLANAR_EPSILON: f64 = 1e-9;

/// A point in the quad's plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlanePoint {
    p: f64,
    q: f64,
}

impl PlanePoint {
    const ORIGIN: PlanePoint = PlanePoint { p: 0.0, q: 0.0 };

    fn sub(self, other: PlanePoint) -> PlanePoint {
        PlanePoint {
            p: self.p - other.p,
            q: self.q - other.q,
        }
    }

    /// z component of the 3D cross product; positive when `other` is
    /// counter-clockwise from `self`.
    fn cross(self, other: PlanePoint) -> f64 {
        self.p * other.q - self.q * other.p
    }
}

/// A convex planar quadrilateral.
#[derive(Debug, Clone)]
pub struct Quad {
    origin: Vec3,
    u: Vec3,
    v: Vec3,
    normal: Vec3,
    // Far corners in plane coordinates; A is the origin
    b: PlanePoint,
    c: PlanePoint,
    d: PlanePoint,
    pub(crate) material: Arc<Material>,
}

impl Quad {
    /// Create a quad from corners in boundary order A -> B -> C -> D.
    ///
    /// Fails if the corners are not coplanar, if A, B, D are collinear or
    /// coincident, or if the outline is not convex.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: Arc<Material>) -> Result<Self, ShapeError> {
        material.validate()?;

        let ab = b - a;
        let ad = d - a;
        let u = ab.normalize().map_err(ShapeError::DegenerateQuad)?;
        let v = ad.normalize().map_err(ShapeError::DegenerateQuad)?;
        let normal = u.cross(v).normalize().map_err(ShapeError::DegenerateQuad)?;

        // Express C - A in the (u, v, normal) basis
        let to_basis = Mat3::from_cols(u, v, normal)
            .inverse()
            .map_err(ShapeError::DegenerateQuad)?;
        let ac = c - a;
        let coords = to_basis * ac;
        if coords.z.abs() > COPLANAR_EPSILON * ac.magnitude().max(1.0) {
            return Err(ShapeError::NonCoplanar { offset: coords.z });
        }

        let pb = PlanePoint { p: ab.magnitude(), q: 0.0 };
        let pc = PlanePoint { p: coords.x, q: coords.y };
        let pd = PlanePoint { p: 0.0, q: ad.magnitude() };

        // Convex iff every corner turns the same way
        let outline = [PlanePoint::ORIGIN, pb, pc, pd];
        for i in 0..4 {
            let (p0, p1, p2) = (outline[i], outline[(i + 1) % 4], outline[(i + 2) % 4]);
            if p1.sub(p0).cross(p2.sub(p1)) <= 0.0 {
                return Err(ShapeError::NonConvexQuad);
            }
        }

        Ok(Self {
            origin: a,
            u,
            v,
            normal,
            b: pb,
            c: pc,
            d: pd,
            material,
        })
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Whether a plane point with positive `p` and `q` also lies inside the
    /// two far edges B -> C and C -> D.
    fn within_far_edges(&self, x: PlanePoint) -> bool {
        self.c.sub(self.b).cross(x.sub(self.b)) > 0.0 && self.d.sub(self.c).cross(x.sub(self.c)) > 0.0
    }

    /// Intersection strictly in front of the ray origin, inside the quad.
    ///
    /// The reported distance is the ray parameter `t`, which equals the
    /// world distance only for unit-length directions.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        // Singular when the ray runs parallel to the plane
        let system = Mat3::from_cols(self.u, self.v, -ray.direction()).inverse().ok()?;
        let solution = system * (ray.origin() - self.origin);
        let (p, q, t) = (solution.x, solution.y, solution.z);

        if !(p > 0.0 && q > 0.0 && t > 0.0) {
            return None;
        }
        if !self.within_far_edges(PlanePoint { p, q }) {
            return None;
        }

        Some(Intersection {
            point: ray.at(t),
            normal: self.normal,
            distance: t,
        })
    }
}
