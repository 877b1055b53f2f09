// src/geometry.rs
// Pure geometry, no toolkit types here.

use crate::mode::FixedSize;

/// A position in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Rectangle in image space.
///
/// Axis-aligned, `width`/`height` are never negative for rects built through
/// [`Rect::new`] or [`Rect::from_points`]. [`Rect::fixed_anchor_bounds`] is the
/// one exception, see there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width: width.max(0.0), height: height.max(0.0) }
    }

    /// Bounding box of two corner points, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Rect {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Bounds for the anchor of a fixed-size box so the box stays on the image.
    ///
    /// Low side moves in by half the box rounded down, the "far" value shrinks
    /// by the rest of the box (half rounded up), so odd sizes fit too. Because [`clamp_point`] treats `width`/`height` as the
    /// upper coordinate, this keeps a box centered on the anchor inside
    /// `rect`. On images smaller than the box the width can go below `x`;
    /// clamping then pins the anchor to the low side.
    pub fn fixed_anchor_bounds(rect: Rect, size: FixedSize) -> Rect {
        let (near_w, near_h) = size.halves();
        let (far_w, far_h) = size.far_halves();
        Rect {
            x: rect.x + near_w,
            y: rect.y + near_h,
            width: rect.width - far_w,
            height: rect.height - far_h,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

/// Pull `p` into `r`.
///
/// The upper bounds are `r.width` and `r.height` taken as coordinates, not
/// `r.x + r.width`. For the image rect (origin at zero) both readings agree.
/// If the upper bound falls below the lower one, the lower bound wins.
pub fn clamp_point(p: Point, r: Rect) -> Point {
    Point {
        x: r.x.max(r.width.min(p.x)),
        y: r.y.max(r.height.min(p.y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_inside_points() {
        let r = Rect::new(0.0, 0.0, 100.0, 80.0);
        assert_eq!(clamp_point(Point::new(30.0, 20.0), r), Point::new(30.0, 20.0));
    }

    #[test]
    fn clamp_pulls_outside_points_to_edges() {
        let r = Rect::new(0.0, 0.0, 100.0, 80.0);
        assert_eq!(clamp_point(Point::new(-5.0, 200.0), r), Point::new(0.0, 80.0));
        assert_eq!(clamp_point(Point::new(150.0, -1.0), r), Point::new(100.0, 0.0));
    }

    #[test]
    fn clamp_uses_width_as_upper_coordinate() {
        // offset rect: the upper x bound is 30, not 40
        let r = Rect::new(10.0, 10.0, 30.0, 30.0);
        assert_eq!(clamp_point(Point::new(35.0, 35.0), r), Point::new(30.0, 30.0));
    }

    #[test]
    fn clamp_on_inverted_bounds_prefers_low_side() {
        let r = Rect { x: 25.0, y: 20.0, width: 15.0, height: 10.0 };
        assert_eq!(clamp_point(Point::new(100.0, 0.0), r), Point::new(25.0, 20.0));
    }

    #[test]
    fn from_points_normalizes_corners() {
        let r = Rect::from_points(Point::new(60.0, 10.0), Point::new(10.0, 50.0));
        assert_eq!(r, Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn fixed_bounds_shrink_by_half_extents() {
        let size = FixedSize::new(50, 40).unwrap();
        let r = Rect::fixed_anchor_bounds(Rect::new(0.0, 0.0, 200.0, 100.0), size);
        assert_eq!(r, Rect { x: 25.0, y: 20.0, width: 175.0, height: 80.0 });
    }

    #[test]
    fn fixed_bounds_use_integer_halves() {
        let size = FixedSize::new(5, 3).unwrap();
        let r = Rect::fixed_anchor_bounds(Rect::new(0.0, 0.0, 20.0, 20.0), size);
        assert_eq!((r.x, r.y, r.width, r.height), (2.0, 1.0, 17.0, 18.0));
    }

    #[test]
    fn odd_box_at_far_edge_stays_on_image() {
        let size = FixedSize::new(51, 41).unwrap();
        let image = Rect::new(0.0, 0.0, 200.0, 150.0);
        let anchor = clamp_point(Point::new(1000.0, 1000.0), Rect::fixed_anchor_bounds(image, size));
        assert_eq!(anchor, Point::new(174.0, 129.0));
        // left edge + width lands exactly on the image edge
        assert_eq!(anchor.x - 25.0 + 51.0, 200.0);
        assert_eq!(anchor.y - 20.0 + 41.0, 150.0);
    }
}
