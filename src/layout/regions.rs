//! Free canvas space around the foreground and random placement inside it.

use crate::foundation::core::{Point, Rectangle, ensure_canvas, ensure_positive_size};
use crate::foundation::error::{PhotostoryError, PhotostoryResult};
use crate::layout::scatter::LayoutRng;

/// Split `canvas` into rectangles that cover the space not taken by `fg`.
///
/// Each foreground rectangle cuts every region it overlaps into up to four pieces:
/// full-height strips to its left and right, and strips above and below it limited to
/// the horizontal extent of the overlap. Pieces never overlap each other.
pub fn background_regions(fg: &[Rectangle], canvas: &Rectangle) -> Vec<Rectangle> {
    let mut regions = vec![*canvas];
    for rect in fg {
        let mut next = Vec::with_capacity(regions.len() + 3);
        for region in regions {
            let overlap = rect.intersection(&region);
            if !overlap.is_positive() {
                next.push(region);
                continue;
            }
            if rect.left() > region.left() {
                next.push(Rectangle::new(
                    region.left(),
                    region.top(),
                    rect.left() - region.left(),
                    region.height,
                ));
            }
            if rect.right() < region.right() {
                next.push(Rectangle::new(
                    rect.right(),
                    region.top(),
                    region.right() - rect.right(),
                    region.height,
                ));
            }
            if rect.top() > region.top() {
                next.push(Rectangle::new(
                    overlap.left(),
                    region.top(),
                    overlap.width,
                    rect.top() - region.top(),
                ));
            }
            if rect.bottom() < region.bottom() {
                next.push(Rectangle::new(
                    overlap.left(),
                    rect.bottom(),
                    overlap.width,
                    region.bottom() - rect.bottom(),
                ));
            }
        }
        regions = next;
    }
    regions
}

/// Uniformly random point over the union of `regions` (regions weighted by area).
pub fn sample_in_regions(regions: &[Rectangle], rng: &mut LayoutRng) -> PhotostoryResult<Point> {
    let total_area: f64 = regions.iter().map(Rectangle::area).sum();
    if regions.is_empty() || total_area <= 0.0 {
        return Err(PhotostoryError::empty_input(
            "sample_in_regions requires at least 1 region with positive area",
        ));
    }

    let x = rng.uniform() * total_area;
    let mut acc = 0.0;
    let mut chosen = &regions[regions.len() - 1];
    for r in regions {
        acc += r.area();
        if x <= acc {
            chosen = r;
            break;
        }
    }
    Ok(Point::new(
        chosen.x + rng.uniform() * chosen.width,
        chosen.y + rng.uniform() * chosen.height,
    ))
}

/// Scale every background rectangle by `scale` and center it on a random free point.
pub fn scatter_in_regions(
    bg: &mut [Rectangle],
    fg: &[Rectangle],
    canvas: &Rectangle,
    scale: f64,
    rng: &mut LayoutRng,
) -> PhotostoryResult<()> {
    if bg.is_empty() {
        return Ok(());
    }
    ensure_canvas(canvas)?;
    for r in bg.iter() {
        ensure_positive_size(r, "background rectangle")?;
    }

    let regions = background_regions(fg, canvas);
    let mut centers = Vec::with_capacity(bg.len());
    for _ in 0..bg.len() {
        centers.push(sample_in_regions(&regions, rng)?);
    }
    for (r, c) in bg.iter_mut().zip(centers) {
        r.width *= scale;
        r.height *= scale;
        r.set_center(c);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/regions.rs"]
mod tests;
