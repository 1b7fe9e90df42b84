//! # drift_math - 2D Steering Math
//!
//! Vector, angle and ray primitives shared by every steering behavior.
//! Every routine here is total: degenerate input (zero-length vectors,
//! coincident points) resolves to a zero vector or `None`, never a panic.

pub mod vector;
pub mod ray;
pub mod intersect;

pub use vector::*;
pub use ray::*;
pub use intersect::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Wrap an angle into `(-PI, PI]`.
///
/// Non-finite input is returned unchanged.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let wrapped = (angle + consts::PI).rem_euclid(consts::TAU) - consts::PI;
    if wrapped <= -consts::PI { wrapped + consts::TAU } else { wrapped }
}

/// Signed shortest angular difference `a - b`, in `(-PI, PI]`.
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    wrap_angle(a - b)
}

/// `count` evenly spaced samples over `[start, end]`, endpoints included.
///
/// A single sample sits at `start`; zero samples yields an empty vector.
pub fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f32;
            (0..count).map(|i| start + step * i as f32).collect()
        }
    }
}

pub mod prelude {
    pub use crate::vector::Vec2;
    pub use crate::ray::Ray2;
    pub use crate::intersect::ray_circle;
    pub use crate::{radians, degrees, wrap_angle, angle_between, linspace};
}
