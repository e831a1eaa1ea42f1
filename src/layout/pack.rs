use crate::foundation::core::{Rectangle, Size, ensure_canvas, ensure_positive_size};
use crate::foundation::error::{PhotostoryError, PhotostoryResult};

/// Overlap tolerance used when checking packing candidates against placed rectangles.
pub const DEFAULT_OVERLAP_MARGIN: f64 = 0.5;

/// Where a new rectangle is put relative to an already placed anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Placement {
    /// Flush against the anchor's right edge, top edges aligned.
    RightTop,
    /// Flush against the anchor's right edge, bottom edges aligned.
    RightBottom,
    /// Flush below the anchor, left edges aligned.
    BelowLeft,
    /// Flush below the anchor, right edges aligned.
    BelowRight,
}

impl Placement {
    /// Candidate order; earlier entries win exact ties.
    pub const ALL: [Placement; 4] = [
        Placement::RightTop,
        Placement::RightBottom,
        Placement::BelowLeft,
        Placement::BelowRight,
    ];

    /// Rectangle of `size` placed against `anchor`.
    pub fn candidate(self, anchor: &Rectangle, size: Size) -> Rectangle {
        let (x, y) = match self {
            Placement::RightTop => (anchor.right(), anchor.top()),
            Placement::RightBottom => (anchor.right(), anchor.bottom() - size.height),
            Placement::BelowLeft => (anchor.left(), anchor.bottom()),
            Placement::BelowRight => (anchor.right() - size.width, anchor.bottom()),
        };
        Rectangle::new(x, y, size.width, size.height)
    }
}

/// A candidate is valid when it stays in the positive quadrant and clears every placed rectangle.
fn is_valid_candidate(placed: &[Rectangle], candidate: &Rectangle, margin: f64) -> bool {
    if candidate.x < 0.0 || candidate.y < 0.0 {
        return false;
    }
    !placed.iter().any(|r| r.intersects(candidate, margin))
}

/// Greedy corner placement of `sizes`, in order, without scaling.
///
/// The first rectangle sits at the origin. Every following one is tried against each
/// placed anchor in all [`Placement`] variants, and the valid candidate whose merged
/// bounding box has the aspect ratio closest to `target_aspect` wins. Returns the
/// unscaled placements and their bounding box.
pub fn plan_packing(
    sizes: &[Size],
    target_aspect: f64,
    margin: f64,
) -> PhotostoryResult<(Vec<Rectangle>, Rectangle)> {
    let Some((first, rest)) = sizes.split_first() else {
        return Ok((Vec::new(), Rectangle::default()));
    };

    let mut placed = Vec::with_capacity(sizes.len());
    placed.push(Rectangle::from_size(*first));
    let mut bbox = placed[0];

    for (offset, &size) in rest.iter().enumerate() {
        let mut best: Option<(Rectangle, f64, usize, Placement)> = None;
        for (anchor_idx, anchor) in placed.iter().enumerate() {
            for placement in Placement::ALL {
                let c = placement.candidate(anchor, size);
                if !is_valid_candidate(&placed, &c, margin) {
                    continue;
                }
                let diff = (target_aspect - Rectangle::merge(&c, &bbox).aspect()).abs();
                if best.as_ref().is_none_or(|(_, best_diff, _, _)| diff < *best_diff) {
                    best = Some((c, diff, anchor_idx, placement));
                }
            }
        }

        let index = offset + 1;
        let (chosen, diff, anchor_idx, placement) = best.ok_or_else(|| {
            PhotostoryError::placement(format!(
                "no valid position for rectangle {index} ({}x{})",
                size.width, size.height
            ))
        })?;
        tracing::debug!(index, anchor_idx, ?placement, aspect_diff = diff, "placed rectangle");
        bbox = Rectangle::merge(&chosen, &bbox);
        placed.push(chosen);
    }

    Ok((placed, bbox))
}

/// Pack `rects` without overlap and scale the result to fit `canvas`.
///
/// Positions and sizes are overwritten in place; only the width/height of the inputs
/// is read. The configuration is scaled about the origin (no centering) by the tighter
/// of the width and height ratios, and that factor is returned. An empty input returns
/// `1` without validating the canvas.
pub fn pack_rectangles(rects: &mut [Rectangle], canvas: &Rectangle) -> PhotostoryResult<f64> {
    pack_rectangles_with_margin(rects, canvas, DEFAULT_OVERLAP_MARGIN)
}

/// [`pack_rectangles`] with an explicit overlap margin.
pub fn pack_rectangles_with_margin(
    rects: &mut [Rectangle],
    canvas: &Rectangle,
    margin: f64,
) -> PhotostoryResult<f64> {
    if rects.is_empty() {
        return Ok(1.0);
    }
    ensure_canvas(canvas)?;
    for r in rects.iter() {
        ensure_positive_size(r, "foreground rectangle")?;
    }

    let sizes: Vec<Size> = rects.iter().map(Rectangle::size).collect();
    let (placed, bbox) = plan_packing(&sizes, canvas.width / canvas.height, margin)?;

    let factor = (canvas.width / bbox.width).min(canvas.height / bbox.height);
    for (r, p) in rects.iter_mut().zip(placed) {
        *r = p;
        r.scale(factor);
    }
    Ok(factor)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pack.rs"]
mod tests;
