use std::f64::consts::{PI, TAU};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use crate::foundation::core::{Point, Rectangle, Vec2, ensure_canvas, ensure_positive_size};
use crate::foundation::error::{PhotostoryError, PhotostoryResult};
use crate::geometry::ray::{Ray, intersect_ray_rectangle, intersect_ray_rectangles};

/// Linear size of a scattered background rectangle relative to the largest foreground one.
pub const DEFAULT_BACKGROUND_SCALE: f64 = 1.2;
/// Standard deviation (radians) of the per-rectangle angular jitter.
pub const DEFAULT_ANGLE_JITTER: f64 = 0.07 * PI;

/// Random source for layout jitter and sampling.
///
/// Seeded generators give identical layouts for identical inputs.
#[derive(Clone, Debug)]
pub struct LayoutRng {
    rng: StdRng,
}

impl LayoutRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Zero-mean Gaussian sample.
    pub fn gaussian(&mut self, std_dev: f64) -> f64 {
        if std_dev == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * std_dev
    }

    /// Fresh seed for a derived generator.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random::<u64>()
    }

    /// Uniform sample in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Tunables of [`scatter_background_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterOpts {
    pub background_scale: f64,
    pub angle_jitter_std_dev: f64,
}

impl Default for ScatterOpts {
    fn default() -> Self {
        Self {
            background_scale: DEFAULT_BACKGROUND_SCALE,
            angle_jitter_std_dev: DEFAULT_ANGLE_JITTER,
        }
    }
}

/// Spread `bg` radially around the canvas center, outside the foreground footprint.
///
/// Background rectangle `i` is aimed at angle `i * 2π / n` plus Gaussian jitter. A ray
/// from the canvas center along that angle gives the canvas border point; casting back
/// from the border towards the center finds the nearest foreground edge (or the center
/// when nothing is hit). The rectangle is centered halfway between the two points and
/// uniformly resized so its area becomes `background_scale² × largest foreground area`.
///
/// All inputs are validated before any rectangle is modified.
pub fn scatter_background(
    bg: &mut [Rectangle],
    fg: &[Rectangle],
    canvas: &Rectangle,
    rng: &mut LayoutRng,
) -> PhotostoryResult<()> {
    scatter_background_with(bg, fg, canvas, &ScatterOpts::default(), rng)
}

/// [`scatter_background`] with explicit tunables.
pub fn scatter_background_with(
    bg: &mut [Rectangle],
    fg: &[Rectangle],
    canvas: &Rectangle,
    opts: &ScatterOpts,
    rng: &mut LayoutRng,
) -> PhotostoryResult<()> {
    if bg.is_empty() {
        return Ok(());
    }
    ensure_canvas(canvas)?;
    let largest_fg_area = Rectangle::get_largest(fg)
        .map_err(|_| {
            PhotostoryError::empty_input(
                "background scatter requires at least 1 foreground rectangle",
            )
        })?
        .area();
    if !largest_fg_area.is_finite() || largest_fg_area <= 0.0 {
        return Err(PhotostoryError::validation(
            "largest foreground rectangle must have a positive area",
        ));
    }
    for r in bg.iter() {
        ensure_positive_size(r, "background rectangle")?;
    }

    let angle_step = TAU / bg.len() as f64;
    let center = canvas.center();
    let mut positions = Vec::with_capacity(bg.len());
    for index in 0..bg.len() {
        let a = index as f64 * angle_step + rng.gaussian(opts.angle_jitter_std_dev);
        let pos = anchor_point(canvas, fg, center, a)?;
        tracing::debug!(
            index,
            angle = a,
            x = pos.x,
            y = pos.y,
            "scattered background rectangle"
        );
        positions.push(pos);
    }

    for (r, pos) in bg.iter_mut().zip(positions) {
        r.scale(opts.background_scale * (largest_fg_area / r.area()).sqrt());
        r.set_center(pos);
    }
    Ok(())
}

/// Midpoint between the canvas border and the nearest foreground edge along angle `a`.
fn anchor_point(
    canvas: &Rectangle,
    fg: &[Rectangle],
    center: Point,
    a: f64,
) -> PhotostoryResult<Point> {
    let ray = Ray::new(center, Vec2::new(a.sin(), a.cos()));
    let t = intersect_ray_rectangle(&ray, canvas).ok_or_else(|| {
        PhotostoryError::invalid_canvas("ray from canvas center does not reach the canvas border")
    })?;
    let border = ray.at(t);

    let back = ray.reversed_from(border);
    let fg_point = intersect_ray_rectangles(&back, fg)
        .map(|t| back.at(t))
        .unwrap_or(center);
    Ok(fg_point.midpoint(border))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scatter.rs"]
mod tests;
