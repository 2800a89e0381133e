//! Error types for material, shape and light construction and renderer setup.
//!
//! Per-ray misses are never errors; these only surface while building
//! shapes, lights or the engine itself.

use lume_math::MathError;
use thiserror::Error;

/// Errors raised while constructing a shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("transform is not invertible: {0}")]
    SingularTransform(#[source] MathError),

    #[error("quad corners are not coplanar (C is {offset} off the plane of A, B, D)")]
    NonCoplanar { offset: f64 },

    #[error("quad edges are degenerate: {0}")]
    DegenerateQuad(#[source] MathError),

    #[error("quad corners do not form a convex quadrilateral in A, B, C, D order")]
    NonConvexQuad,

    #[error("invalid material: {0}")]
    Material(#[from] MaterialError),
}

/// Errors raised while validating a material.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("shininess must be a positive finite number (got {0})")]
    InvalidShininess(f64),

    #[error("{term} term is not finite ({value:?})")]
    NonFinite { term: &'static str, value: [f64; 3] },
}

/// Errors raised while constructing a light.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("attenuation coefficients must be finite, non-negative and not all zero (got {0:?})")]
    InvalidAttenuation([f64; 3]),

    #[error("directional light has a zero-length direction")]
    ZeroDirection,
}

/// Errors raised while setting up a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("camera basis is degenerate: {0}")]
    Camera(#[from] MathError),
}
