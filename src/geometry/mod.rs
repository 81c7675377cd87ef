//! Geometric primitives for layout segmentation.
//!
//! Boxes are stored by their corners `(x0, y0, x1, y1)` in page space, with
//! `y` growing downwards. An empty rectangle (zero or negative extent) is a
//! valid value and acts as the identity for [`Rect::union`].

use serde::{Deserialize, Serialize};

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

/// An axis-aligned rectangle given by its corners.
///
/// Serialized as a `[x0, y0, x1, y1]` array, the layout text extractors use
/// for `bbox` values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// The empty accumulator seed.
    ///
    /// Its corners are inverted so that any union with a non-empty rectangle
    /// yields that rectangle unchanged.
    pub const EMPTY: Rect = Rect {
        x0: f32::MAX,
        y0: f32::MAX,
        x1: f32::MIN,
        y1: f32::MIN,
    };

    /// Create a rectangle from its corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.width(), 100.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal extent. Negative for inverted rectangles.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Check whether the rectangle has no area.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    ///
    /// assert!(Rect::EMPTY.is_empty());
    /// assert!(Rect::new(10.0, 10.0, 10.0, 50.0).is_empty());
    /// assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        !(self.x0 < self.x1 && self.y0 < self.y1)
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: (self.x0 + self.x1) / 2.0,
            y: (self.y0 + self.y1) / 2.0,
        }
    }

    /// Check if this rectangle overlaps another with positive area.
    ///
    /// Rectangles that only share an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 150.0, 150.0);
    /// let r3 = Rect::new(100.0, 0.0, 200.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Compute the overlap of two rectangles.
    ///
    /// The result is empty when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    /// Check whether `other` lies completely inside this rectangle.
    ///
    /// Shared edges count as inside. An empty rectangle is never contained.
    pub fn contains(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.x0 >= self.x0
            && other.y0 >= self.y0
            && other.x1 <= self.x1
            && other.y1 <= self.y1
    }

    /// Compute the smallest rectangle enclosing both rectangles.
    ///
    /// Empty operands are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 75.0, 75.0);
    /// assert_eq!(r1.union(&r2), Rect::new(0.0, 0.0, 75.0, 75.0));
    /// assert_eq!(Rect::EMPTY.union(&r1), r1);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Round outwards to the enclosing integer rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    ///
    /// let r = Rect::new(10.4, 20.6, 99.2, 30.1).round_out();
    /// assert_eq!(r, Rect::new(10.0, 20.0, 100.0, 31.0));
    /// ```
    pub fn round_out(&self) -> Rect {
        if self.is_empty() {
            return *self;
        }
        Rect::new(self.x0.floor(), self.y0.floor(), self.x1.ceil(), self.y1.ceil())
    }

    /// Copy of this rectangle with a different right edge.
    pub fn with_right(&self, x1: f32) -> Rect {
        Rect::new(self.x0, self.y0, x1, self.y1)
    }

    /// Check whether this rectangle intersects any rectangle in `others`.
    pub fn intersects_any<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        others.into_iter().any(|r| self.intersects(r))
    }
}

impl From<[f32; 4]> for Rect {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Rect::new(x0, y0, x1, y1)
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x0, r.y0, r.x1, r.y1]
    }
}

/// Return the 1-based position of the first rectangle containing `rect`, or 0.
///
/// The 0 for "not contained" lets the result double as a sort key that puts
/// uncontained boxes first.
pub fn containing_index(rect: &Rect, containers: &[Rect]) -> usize {
    containers
        .iter()
        .position(|c| c.contains(rect))
        .map_or(0, |i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let center = Rect::new(0.0, 0.0, 100.0, 50.0).center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_empty_rect() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::new(5.0, 5.0, 5.0, 5.0).is_empty());
        assert!(Rect::new(5.0, 5.0, 4.0, 9.0).is_empty());
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r2 = Rect::new(50.0, 50.0, 150.0, 150.0);
        let r3 = Rect::new(200.0, 200.0, 300.0, 300.0);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&r3));
        assert!(!r3.intersects(&r1));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let below = Rect::new(0.0, 100.0, 100.0, 200.0);
        let right = Rect::new(100.0, 0.0, 200.0, 100.0);
        assert!(!r1.intersects(&below));
        assert!(!r1.intersects(&right));
    }

    #[test]
    fn test_rect_intersect() {
        let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r2 = Rect::new(50.0, 25.0, 150.0, 75.0);
        assert_eq!(r1.intersect(&r2), Rect::new(50.0, 25.0, 100.0, 75.0));
        assert!(r1.intersect(&Rect::new(200.0, 0.0, 300.0, 10.0)).is_empty());
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect::new(90.0, 90.0, 110.0, 95.0)));
        assert!(!outer.contains(&Rect::EMPTY));
    }

    #[test]
    fn test_rect_union() {
        let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
        let r2 = Rect::new(25.0, 25.0, 75.0, 75.0);
        assert_eq!(r1.union(&r2), Rect::new(0.0, 0.0, 75.0, 75.0));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let r = Rect::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(Rect::EMPTY.union(&r), r);
        assert_eq!(r.union(&Rect::EMPTY), r);
        assert!(Rect::EMPTY.union(&Rect::EMPTY).is_empty());
    }

    #[test]
    fn test_round_out() {
        assert_eq!(
            Rect::new(0.5, 0.5, 10.5, 10.5).round_out(),
            Rect::new(0.0, 0.0, 11.0, 11.0)
        );
        assert_eq!(Rect::new(1.0, 2.0, 3.0, 4.0).round_out(), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!(Rect::EMPTY.round_out().is_empty());
    }

    #[test]
    fn test_rect_serializes_as_array() {
        let r = Rect::new(1.0, 2.0, 3.5, 4.0);
        assert_eq!(serde_json::to_string(&r).unwrap(), "[1.0,2.0,3.5,4.0]");
        let back: Rect = serde_json::from_str("[1, 2, 3.5, 4]").unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_containing_index() {
        let panels = vec![Rect::new(0.0, 0.0, 50.0, 50.0), Rect::new(100.0, 0.0, 200.0, 50.0)];
        assert_eq!(containing_index(&Rect::new(110.0, 10.0, 120.0, 20.0), &panels), 2);
        assert_eq!(containing_index(&Rect::new(10.0, 10.0, 20.0, 20.0), &panels), 1);
        assert_eq!(containing_index(&Rect::new(60.0, 10.0, 70.0, 20.0), &panels), 0);
    }
}
