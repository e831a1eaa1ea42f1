use crate::{
    foundation::core::{Rectangle, Vec2, ensure_canvas, ensure_positive_size},
    foundation::error::{PhotostoryError, PhotostoryResult},
    layout::pack::{DEFAULT_OVERLAP_MARGIN, pack_rectangles_with_margin},
    layout::regions::scatter_in_regions,
    layout::scatter::{
        DEFAULT_ANGLE_JITTER, DEFAULT_BACKGROUND_SCALE, LayoutRng, ScatterOpts,
        scatter_background_with,
    },
};

/// Foreground collage shrink applied when a slide has background photos.
pub const DEFAULT_FOREGROUND_SHRINK: f64 = 0.85;

/// How background rectangles are positioned around the packed foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStrategy {
    /// Evenly spaced angles around the canvas center, pushed outside the foreground.
    #[default]
    Radial,
    /// Random points in the canvas area left free by the foreground.
    Regions,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tunables of [`generate_layout_with`].
pub struct LayoutOpts {
    /// Overlap tolerance between packed foreground rectangles.
    pub overlap_margin: f64,
    /// Uniform shrink of the foreground collage when there are background rectangles.
    pub foreground_shrink: f64,
    /// Linear size of radial background rectangles relative to the largest foreground one.
    pub background_scale: f64,
    /// Standard deviation (radians) of the radial angle jitter.
    pub angle_jitter_std_dev: f64,
    pub background_strategy: BackgroundStrategy,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            overlap_margin: DEFAULT_OVERLAP_MARGIN,
            foreground_shrink: DEFAULT_FOREGROUND_SHRINK,
            background_scale: DEFAULT_BACKGROUND_SCALE,
            angle_jitter_std_dev: DEFAULT_ANGLE_JITTER,
            background_strategy: BackgroundStrategy::Radial,
        }
    }
}

impl LayoutOpts {
    pub fn validate(&self) -> PhotostoryResult<()> {
        for (name, value) in [
            ("overlap_margin", self.overlap_margin),
            ("angle_jitter_std_dev", self.angle_jitter_std_dev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhotostoryError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("foreground_shrink", self.foreground_shrink),
            ("background_scale", self.background_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhotostoryError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    fn scatter(&self) -> ScatterOpts {
        ScatterOpts {
            background_scale: self.background_scale,
            angle_jitter_std_dev: self.angle_jitter_std_dev,
        }
    }
}

/// Scale factors produced by one layout call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutScale {
    /// Factor that fitted the packed collage to the canvas.
    pub packing: f64,
    /// Overall factor applied to the foreground sizes (packing times shrink, if any).
    pub foreground: f64,
    /// `foreground_shrink * packing`; the size factor of the regions strategy.
    pub background: f64,
}

/// Lay out one slide with default options.
pub fn generate_layout(
    fg: &mut [Rectangle],
    bg: &mut [Rectangle],
    canvas: &Rectangle,
    rng: &mut LayoutRng,
) -> PhotostoryResult<LayoutScale> {
    generate_layout_with(fg, bg, canvas, &LayoutOpts::default(), rng)
}

/// Pack the foreground, shrink it when there is a background, center it, then place
/// the background around it.
///
/// The background is placed last because it casts rays against the final foreground
/// positions. A background without foreground is rejected for every strategy. On error
/// the inputs are left untouched.
#[tracing::instrument(skip_all, fields(fg = fg.len(), bg = bg.len()))]
pub fn generate_layout_with(
    fg: &mut [Rectangle],
    bg: &mut [Rectangle],
    canvas: &Rectangle,
    opts: &LayoutOpts,
    rng: &mut LayoutRng,
) -> PhotostoryResult<LayoutScale> {
    opts.validate()?;
    ensure_slide_inputs(fg, bg)?;
    let mut fg_out = fg.to_vec();
    let mut bg_out = bg.to_vec();

    let packing = pack_rectangles_with_margin(&mut fg_out, canvas, opts.overlap_margin)?;
    let mut scale = LayoutScale {
        packing,
        foreground: packing,
        background: opts.foreground_shrink * packing,
    };

    if !bg_out.is_empty() {
        scale_layout(&mut fg_out, opts.foreground_shrink);
        scale.foreground *= opts.foreground_shrink;
    }
    center_layout(&mut fg_out, canvas)?;

    match opts.background_strategy {
        BackgroundStrategy::Radial => {
            scatter_background_with(&mut bg_out, &fg_out, canvas, &opts.scatter(), rng)?
        }
        BackgroundStrategy::Regions => {
            scatter_in_regions(&mut bg_out, &fg_out, canvas, scale.background, rng)?
        }
    }

    fg.copy_from_slice(&fg_out);
    bg.copy_from_slice(&bg_out);
    tracing::debug!(?scale, "slide layout generated");
    Ok(scale)
}

/// Translate `rects` so that their common bounding box is centered in `canvas`.
pub fn center_layout(rects: &mut [Rectangle], canvas: &Rectangle) -> PhotostoryResult<()> {
    if rects.is_empty() {
        return Ok(());
    }
    ensure_canvas(canvas)?;
    let bb = Rectangle::bounding_box(rects.iter())?;
    let offset = Vec2::new(
        canvas.x + 0.5 * (canvas.width - bb.width) - bb.x,
        canvas.y + 0.5 * (canvas.height - bb.height) - bb.y,
    );
    for r in rects.iter_mut() {
        r.translate(offset);
    }
    Ok(())
}

/// Uniformly scale positions and sizes of `rects` about the origin.
pub fn scale_layout(rects: &mut [Rectangle], factor: f64) {
    for r in rects.iter_mut() {
        r.scale(factor);
    }
}

/// Validate that a slide's rectangles can be laid out at all.
pub(crate) fn ensure_slide_inputs(fg: &[Rectangle], bg: &[Rectangle]) -> PhotostoryResult<()> {
    for r in fg {
        ensure_positive_size(r, "foreground rectangle")?;
    }
    for r in bg {
        ensure_positive_size(r, "background rectangle")?;
    }
    if fg.is_empty() && !bg.is_empty() {
        return Err(PhotostoryError::empty_input(
            "a slide with background photos needs at least 1 foreground photo",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
