// Conversions to and from glam's double precision types.
//
// glam stores matrices column-major; ours are row-major.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::{Mat3, Mat4, Vec3, Vec4};

impl From<Vec3> for DVec3 {
    fn from(v: Vec3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for Vec3 {
    fn from(v: DVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec4> for DVec4 {
    fn from(v: Vec4) -> Self {
        DVec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<DVec4> for Vec4 {
    fn from(v: DVec4) -> Self {
        Vec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Mat3> for DMat3 {
    fn from(m: Mat3) -> Self {
        DMat3::from_cols_array_2d(&m.transpose().to_rows())
    }
}

impl From<DMat3> for Mat3 {
    fn from(m: DMat3) -> Self {
        Mat3::from_rows(m.to_cols_array_2d()).transpose()
    }
}

impl From<Mat4> for DMat4 {
    fn from(m: Mat4) -> Self {
        DMat4::from_cols_array_2d(&m.transpose().to_rows())
    }
}

impl From<DMat4> for Mat4 {
    fn from(m: DMat4) -> Self {
        Mat4::from_rows(m.to_cols_array_2d()).transpose()
    }
}
