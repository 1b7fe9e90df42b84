//! Ray-circle intersection for 2D obstacle sensing

use crate::ray::Ray2;
use crate::vector::Vec2;

/// Distance along `ray` to the near boundary of the circle at `center`
/// with `radius`.
///
/// Returns `None` when:
/// - the circle lies behind the origin and does not contain it,
/// - the ray line misses the circle,
/// - the near root is negative (the origin is inside the circle or the
///   circle is behind it).
pub fn ray_circle(ray: &Ray2, center: Vec2, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let t_center = to_center.dot(ray.direction);

    if t_center < 0.0 && to_center.length_squared() > radius * radius {
        return None;
    }

    let perp_sq = (to_center.length_squared() - t_center * t_center).max(0.0);
    let radius_sq = radius * radius;
    if perp_sq > radius_sq {
        return None;
    }

    let t_near = t_center - (radius_sq - perp_sq).sqrt();
    if t_near >= 0.0 { Some(t_near) } else { None }
}

/// Check whether two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}
