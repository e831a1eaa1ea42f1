//! Ray casts against segments and rectangles.
//!
//! A miss is a normal outcome and is reported as `None`, never as an error.

use crate::foundation::core::{Point, Rectangle, Vec2};

/// Ray `origin + direction * t`. The direction does not need to be normalized.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ray {
    /// Start point of the ray.
    pub origin: Point,
    /// Direction of travel.
    pub direction: Vec2,
}

impl Ray {
    pub fn new(origin: Point, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Ray starting at `origin` travelling against this ray's direction.
    pub fn reversed_from(&self, origin: Point) -> Self {
        Self::new(origin, -self.direction)
    }
}

/// Intersect a ray with the segment `seg_p0..seg_p1`.
///
/// Solves `origin + t * direction = seg_p1 - u * (seg_p1 - seg_p0)` for `(t, u)`; the
/// segment is parametrized from its second endpoint, so `u = 0` is `seg_p1` and
/// `u = 1` is `seg_p0`. Returns `t` when `t >= 0` and `u` lies in `[0, 1]`.
/// A ray parallel to the segment (singular system) is a miss.
pub fn intersect_ray_segment(ray: &Ray, seg_p0: Point, seg_p1: Point) -> Option<f64> {
    let d = ray.direction;
    let s = seg_p1 - seg_p0;
    let b = seg_p1 - ray.origin;

    // Column matrix [d s] times (t, u) = b, solved by Cramer's rule.
    let det = d.x * s.y - s.x * d.y;
    if !det.is_finite() || det.abs() <= f64::EPSILON * d.hypot() * s.hypot() {
        return None;
    }
    let t = (b.x * s.y - s.x * b.y) / det;
    let u = (d.x * b.y - d.y * b.x) / det;
    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Smallest non-negative `t` at which the ray crosses the boundary of `rect`.
pub fn intersect_ray_rectangle(ray: &Ray, rect: &Rectangle) -> Option<f64> {
    rect.edges()
        .into_iter()
        .filter_map(|(p0, p1)| intersect_ray_segment(ray, p0, p1))
        .fold(None, nearest)
}

/// Smallest non-negative `t` over the boundaries of all `rects`.
pub fn intersect_ray_rectangles<'a, I>(ray: &Ray, rects: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    rects
        .into_iter()
        .filter_map(|r| intersect_ray_rectangle(ray, r))
        .fold(None, nearest)
}

fn nearest(best: Option<f64>, t: f64) -> Option<f64> {
    match best {
        Some(b) if b <= t => Some(b),
        _ => Some(t),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ray.rs"]
mod tests;
