//! Camera for eye-ray generation.

use crate::{error::RenderError, Ray};
use lume_math::Vec3;

/// Camera configuration: where the eye is, what it looks at, and the raster
/// it projects onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    /// Vertical field of view in degrees
    pub vfov: f64,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 400,
            image_height: 400,
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 50.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Derive the orthonormal eye basis and projection constants.
    ///
    /// Fails on an empty raster, a field of view outside (0, 180), or when
    /// `look_from == look_at` or `vup` is parallel to the view direction.
    pub fn projection(&self) -> Result<Projection, RenderError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidCamera(format!(
                "resolution must be non-zero (got {}x{})",
                self.image_width, self.image_height
            )));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidCamera(format!(
                "vertical field of view must be in (0, 180) degrees (got {})",
                self.vfov
            )));
        }

        let half_width = self.image_width as f64 / 2.0;
        let half_height = self.image_height as f64 / 2.0;
        let tan_y = (self.vfov.to_radians() / 2.0).tan();
        let tan_x = tan_y * (half_width / half_height);

        let w = (self.look_from - self.look_at).normalize()?;
        let u = self.vup.cross(w).normalize()?;
        let v = w.cross(u);

        Ok(Projection {
            eye: self.look_from,
            u,
            v,
            w,
            half_width,
            half_height,
            tan_x,
            tan_y,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera basis and projection constants, computed once per render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    eye: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    half_width: f64,
    half_height: f64,
    tan_x: f64,
    tan_y: f64,
}

impl Projection {
    /// Eye position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// The (u, v, w) basis; `w` points from the target back to the eye.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Primary ray through image row `i`, column `j`.
    ///
    /// The returned direction is unit length.
    pub fn eye_ray(&self, i: f64, j: f64) -> Ray {
        let alpha = self.tan_x * (j / self.half_width - 1.0);
        let beta = self.tan_y * (1.0 - i / self.half_height);
        let dir = self.u.scale(alpha) + self.v.scale(beta) - self.w;

        // w is unit and orthogonal to u and v, so |dir| >= 1
        Ray::new(self.eye, dir.scale(1.0 / dir.magnitude()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).magnitude() < 1e-12
    }

    #[test]
    fn test_camera_basis() {
        let projection = Camera::new()
            .with_resolution(800, 600)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .projection()
            .unwrap();

        let (u, v, w) = projection.basis();
        assert!(close(w, Vec3::Z));
        assert!(close(u, Vec3::X));
        assert!(close(v, Vec3::Y));
        assert_eq!(projection.eye(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let projection = Camera::new()
            .with_resolution(10, 10)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .projection()
            .unwrap();

        let ray = projection.eye_ray(5.0, 5.0);
        assert_eq!(ray.direction(), -Vec3::Z);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_corner_rays_span_fov() {
        let projection = Camera::new()
            .with_resolution(100, 100)
            .with_position(Vec3::ZERO, -Vec3::Z, Vec3::Y)
            .with_fov(90.0)
            .projection()
            .unwrap();

        // Row 0 is the top of the image, column 0 the left edge
        let top_left = projection.eye_ray(0.0, 0.0).direction();
        assert!(close(top_left, Vec3::new(-1.0, 1.0, -1.0).normalize().unwrap()));

        let bottom_right = projection.eye_ray(100.0, 100.0).direction();
        assert!(close(bottom_right, Vec3::new(1.0, -1.0, -1.0).normalize().unwrap()));

        assert!((top_left.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal_fov() {
        let projection = Camera::new()
            .with_resolution(200, 100)
            .with_position(Vec3::ZERO, -Vec3::Z, Vec3::Y)
            .with_fov(90.0)
            .projection()
            .unwrap();

        // tan_x = tan_y * 2, so the left edge at mid-height is (-2, 0, -1)
        let left = projection.eye_ray(50.0, 0.0).direction();
        assert!(close(left, Vec3::new(-2.0, 0.0, -1.0).normalize().unwrap()));
    }

    #[test]
    fn test_degenerate_cameras_fail() {
        let parallel_up = Camera::new().with_position(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(matches!(parallel_up.projection(), Err(RenderError::Camera(_))));

        let same_point = Camera::new().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(matches!(same_point.projection(), Err(RenderError::Camera(_))));

        let empty = Camera::new().with_resolution(0, 10);
        assert!(matches!(empty.projection(), Err(RenderError::InvalidCamera(_))));

        let wide = Camera::new().with_fov(180.0);
        assert!(matches!(wide.projection(), Err(RenderError::InvalidCamera(_))));
    }
}
