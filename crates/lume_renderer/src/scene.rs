//! The shapes and lights handed to the renderer.

use crate::{shape::Intersection, Light, Ray, Shape};

/// An ordered list of shapes plus the lights illuminating them.
///
/// Shapes are scanned linearly; their order only matters when two hits are
/// at exactly the same distance, in which case the earlier shape wins.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the end of the scan order.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Add a light.
    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the scene has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The nearest hit along `ray` and the shape it belongs to.
    ///
    /// `ray` must have a unit-length direction when the scene mixes spheres
    /// and quads, otherwise their distances are not comparable. Every ray
    /// the renderer traces is normalized.
    pub fn closest_intersection(&self, ray: &Ray) -> Option<(Intersection, &Shape)> {
        let mut closest: Option<(Intersection, &Shape)> = None;

        for shape in &self.shapes {
            if let Some(hit) = shape.intersect(ray) {
                let closer = closest
                    .as_ref()
                    .map_or(true, |(best, _)| hit.distance < best.distance);
                if closer {
                    closest = Some((hit, shape));
                }
            }
        }

        closest
    }
}
