// Affine transform constructors for Mat4
//
// Points carry an implicit w=1 and pick up translation; vectors carry w=0
// and do not.

use crate::{MathResult, Mat4, Vec3, Vec4};

impl Mat4 {
    /// Translation by `t`.
    pub fn translation(t: Vec3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, t.x],
            [0.0, 1.0, 0.0, t.y],
            [0.0, 0.0, 1.0, t.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Non-uniform scale along the coordinate axes.
    pub fn scaling(s: Vec3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `degrees` about an arbitrary `axis` (Rodrigues' formula):
    ///
    /// `R = cos(a) I + sin(a) [k]x + (1 - cos(a)) k k^T`
    ///
    /// Fails if `axis` has zero length.
    pub fn rotation(axis: Vec3, degrees: f64) -> MathResult<Self> {
        let k = axis.normalize()?;
        let (sin, cos) = degrees.to_radians().sin_cos();
        let t = 1.0 - cos;

        Ok(Self::from_rows([
            [
                cos + t * k.x * k.x,
                t * k.x * k.y - sin * k.z,
                t * k.x * k.z + sin * k.y,
                0.0,
            ],
            [
                t * k.y * k.x + sin * k.z,
                cos + t * k.y * k.y,
                t * k.y * k.z - sin * k.x,
                0.0,
            ],
            [
                t * k.z * k.x - sin * k.y,
                t * k.z * k.y + sin * k.x,
                cos + t * k.z * k.z,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Transform a point (w = 1).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(Vec4::from_point(p)).xyz()
    }

    /// Transform a direction (w = 0); translation is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.mul_vec4(Vec4::from_vector(v)).xyz()
    }
}
