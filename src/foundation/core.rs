use crate::foundation::error::{PhotostoryError, PhotostoryResult};

pub use kurbo::{Point, Size, Vec2};

/// Axis-aligned rectangle in canvas space.
///
/// The origin is the top-left corner and `y` grows downwards, so `top == y` and
/// `bottom == y + height`. Width and height are expected to be non-negative; a
/// rectangle with zero width or height is degenerate (see [`Rectangle::is_positive`]).
///
/// Unlike [`kurbo::Rect`] this keeps position and size as separate mutable fields,
/// which is what the packer and scatterer update in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rectangle {
    /// Build a rectangle from position and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size placed at the origin.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            0.5 * self.left() + 0.5 * self.right(),
            0.5 * self.top() + 0.5 * self.bottom(),
        )
    }

    /// Move the rectangle so that its center lands on `c`. The size is kept.
    pub fn set_center(&mut self, c: Point) {
        self.x = c.x - 0.5 * self.width;
        self.y = c.y - 0.5 * self.height;
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Width over height, or `0` for a zero-height rectangle.
    pub fn aspect(&self) -> f64 {
        if self.height == 0.0 {
            return 0.0;
        }
        self.width / self.height
    }

    /// True when the rectangle has a strictly positive extent on both axes.
    pub fn is_positive(&self) -> bool {
        self.right() > self.left() && self.bottom() > self.top()
    }

    /// Uniformly scale position and size about the canvas origin.
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
        self.width *= factor;
        self.height *= factor;
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Largest copy of `rect` (same aspect ratio) that fits inside `self`, centered in `self`.
    ///
    /// Neither operand is modified.
    pub fn best_fit(&self, rect: &Rectangle) -> Rectangle {
        let mut result = Rectangle::default();
        if rect.aspect() > self.aspect() {
            result.width = self.width;
            result.height = self.width / rect.aspect();
        } else {
            result.height = self.height;
            result.width = self.height * rect.aspect();
        }
        result.x = self.x + 0.5 * (self.width - result.width);
        result.y = self.y + 0.5 * (self.height - result.height);
        result
    }

    /// Per-axis overlap of two rectangles.
    ///
    /// Disjoint rectangles yield a negative width and/or height; check
    /// [`Rectangle::is_positive`] or use [`Rectangle::intersects`].
    pub fn intersection(&self, other: &Rectangle) -> Rectangle {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        Rectangle::new(left, top, right - left, bottom - top)
    }

    /// True when the overlap is strictly wider and strictly taller than `margin`.
    pub fn intersects(&self, other: &Rectangle, margin: f64) -> bool {
        let overlap = self.intersection(other);
        overlap.width > margin && overlap.height > margin
    }

    /// Smallest rectangle containing both inputs.
    pub fn merge(a: &Rectangle, b: &Rectangle) -> Rectangle {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        let w = a.right().max(b.right()) - x;
        let h = a.bottom().max(b.bottom()) - y;
        Rectangle::new(x, y, w, h)
    }

    /// Bounding box of a non-empty set of rectangles.
    pub fn bounding_box<'a, I>(rects: I) -> PhotostoryResult<Rectangle>
    where
        I: IntoIterator<Item = &'a Rectangle>,
    {
        let mut it = rects.into_iter();
        let first = it.next().ok_or_else(|| {
            PhotostoryError::empty_input("bounding_box requires at least 1 rectangle")
        })?;
        Ok(it.fold(*first, |acc, r| Rectangle::merge(&acc, r)))
    }

    /// Rectangle with the largest area; the first one wins ties.
    pub fn get_largest(rects: &[Rectangle]) -> PhotostoryResult<&Rectangle> {
        let (first, rest) = rects.split_first().ok_or_else(|| {
            PhotostoryError::empty_input("get_largest requires at least 1 rectangle")
        })?;
        let mut largest = first;
        for r in rest {
            if r.area() > largest.area() {
                largest = r;
            }
        }
        Ok(largest)
    }

    /// The four boundary segments: top, right, bottom, left.
    pub(crate) fn edges(&self) -> [(Point, Point); 4] {
        let (l, r, t, b) = (self.left(), self.right(), self.top(), self.bottom());
        [
            (Point::new(l, t), Point::new(r, t)),
            (Point::new(r, t), Point::new(r, b)),
            (Point::new(l, b), Point::new(r, b)),
            (Point::new(l, t), Point::new(l, b)),
        ]
    }
}

impl From<kurbo::Rect> for Rectangle {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

impl From<Rectangle> for kurbo::Rect {
    fn from(r: Rectangle) -> Self {
        kurbo::Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rectangle([{},{}] [{}x{}])",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Reject rectangles whose size is not finite and strictly positive.
pub(crate) fn ensure_positive_size(r: &Rectangle, what: &str) -> PhotostoryResult<()> {
    if !r.width.is_finite() || !r.height.is_finite() || r.width <= 0.0 || r.height <= 0.0 {
        return Err(PhotostoryError::validation(format!(
            "{what} must have finite width/height > 0, got {}x{}",
            r.width, r.height
        )));
    }
    Ok(())
}

/// Reject canvases whose size is not finite and strictly positive.
pub(crate) fn ensure_canvas(canvas: &Rectangle) -> PhotostoryResult<()> {
    if !(canvas.width.is_finite() && canvas.width > 0.0)
        || !(canvas.height.is_finite() && canvas.height > 0.0)
    {
        return Err(PhotostoryError::invalid_canvas(format!(
            "canvas width/height must be > 0, got {}x{}",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
