//! Random jitter for shadow rays and reflection blur.

use lume_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform sample in `[-scale/2, scale/2)`.
#[inline]
pub fn symmetric(rng: &mut dyn RngCore, scale: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * scale
}

/// Random offset with each component drawn from [`symmetric`].
pub fn jitter(rng: &mut dyn RngCore, scale: f64) -> Vec3 {
    Vec3::new(
        symmetric(rng, scale),
        symmetric(rng, scale),
        symmetric(rng, scale),
    )
}

/// Generator for one pixel.
///
/// Every pixel gets its own stream derived from the render seed and the
/// pixel's row-major index, so the image does not depend on how pixels are
/// scheduled across threads.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(pixel_index)))
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
