//! Lume math - fixed-size double precision vector and matrix algebra.
//!
//! All types are small `Copy` values stored row-major. Every operation
//! returns a new value; nothing is mutated in place. Operations that can
//! only produce NaN/Infinity on degenerate input (normalizing a zero vector,
//! inverting a singular matrix) return [`MathError`] instead.
//!
//! Every type converts to and from its `glam` double precision counterpart
//! (`DVec3`, `DVec4`, `DMat3`, `DMat4`) with `From`, so callers can hand
//! values to glam-based code. The renderer itself only uses the native
//! types; the conversions are public API for library users and are checked
//! against glam's own math in the `interop` tests.

mod error;
mod interop;
mod matrix;
mod transform;
mod vector;

pub use error::{MathError, MathResult};
pub use matrix::{Mat3, Mat4};
pub use vector::{Vec3, Vec4};

// Re-export glam so downstream crates can name the interop types
pub use glam;
