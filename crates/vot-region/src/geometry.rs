//! Core geometry types for tracking regions.
//!
//! ## Rust Lesson #1: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = print with `{:?}`
//! - `Clone` = explicit duplication (a deep copy for `Vec`-backed types)
//! - `Copy` = implicit copies (small stack values only)
//! - `PartialEq` = compare with `==`
//!
//! `Point`, `Rectangle` and `Bounds` are `Copy`. `Polygon` owns heap
//! storage, so it is only `Clone`.

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle: top-left corner plus extents.
///
/// Width and height are not validated. Non-positive extents describe an
/// empty region wherever area is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A closed polygon. The last vertex connects back to the first.
///
/// ## Rust Lesson #2: Ownership & Fixed Length
///
/// The vertex storage is private. Callers get `&[Point]` or `&mut [Point]`
/// slices, which let them read and rewrite vertices but never push or pop.
/// The vertex count is decided at construction and stays fixed, and the
/// storage is freed when the polygon is dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

/// A clipping window / bounding box as `(left, top, right, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Same point moved by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Rectangle {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// True when either extent is zero or negative.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// True when position and extents are all finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Expand into a four-vertex polygon.
    pub fn to_polygon(&self) -> Polygon {
        rectangle_to_polygon(self)
    }
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Allocate `count` vertices, all at the origin.
    pub fn zeroed(count: usize) -> Self {
        Self {
            points: vec![Point::default(); count],
        }
    }

    /// Build a polygon from interleaved `x1, y1, x2, y2, ...` coordinates.
    ///
    /// Returns `None` for an odd number of values.
    pub fn from_coords(coords: &[f64]) -> Option<Self> {
        if coords.len() % 2 != 0 {
            return None;
        }
        let points = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Some(Self { points })
    }

    /// Interleaved `x1, y1, x2, y2, ...` coordinates.
    pub fn to_coords(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable access to the vertices. The slice cannot change the count.
    #[inline]
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounds of all vertices.
    pub fn bounds(&self) -> Bounds {
        compute_bounds(self)
    }

    /// Bounding box as a rectangle, or `None` for an empty polygon.
    ///
    /// This is the only way to get a rectangle out of a polygon. Region
    /// conversion refuses that direction because it loses shape.
    pub fn bounding_rectangle(&self) -> Option<Rectangle> {
        if self.points.is_empty() {
            return None;
        }
        let b = self.bounds();
        Some(Rectangle::new(b.left, b.top, b.width(), b.height()))
    }

    /// True when no vertex has a NaN or infinite coordinate.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point::is_finite)
    }
}

impl Bounds {
    /// Inverted extrema. Union with any real bounds gives that bounds.
    pub const EMPTY: Bounds = Bounds {
        left: f64::MAX,
        top: f64::MAX,
        right: -f64::MAX,
        bottom: -f64::MAX,
    };

    #[inline]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Window `(0, 0, width, height)`.
    #[inline]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the window covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        union_bounds(*self, *other)
    }

    pub fn intersection(&self, other: &Bounds) -> Bounds {
        intersect_bounds(*self, *other)
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Min/max over all vertex coordinates.
///
/// An empty polygon yields [`Bounds::EMPTY`].
pub fn compute_bounds(polygon: &Polygon) -> Bounds {
    // ## Rust Lesson #3: Folding
    //
    // `fold` threads an accumulator through the iterator. Starting from the
    // inverted sentinel means the empty case needs no special branch.
    polygon.points().iter().fold(Bounds::EMPTY, |b, p| Bounds {
        left: b.left.min(p.x),
        top: b.top.min(p.y),
        right: b.right.max(p.x),
        bottom: b.bottom.max(p.y),
    })
}

/// Corners clockwise (in image coordinates) starting at `(x, y)`.
pub fn rectangle_to_polygon(rect: &Rectangle) -> Polygon {
    Polygon::new(vec![
        Point::new(rect.x, rect.y),
        Point::new(rect.x + rect.width, rect.y),
        Point::new(rect.x + rect.width, rect.y + rect.height),
        Point::new(rect.x, rect.y + rect.height),
    ])
}

/// New polygon with every vertex moved by `(dx, dy)`. The input is untouched.
pub fn offset_polygon(polygon: &Polygon, dx: f64, dy: f64) -> Polygon {
    Polygon::new(
        polygon
            .points()
            .iter()
            .map(|p| p.translated(dx, dy))
            .collect(),
    )
}

/// Smallest bounds containing both inputs.
pub fn union_bounds(a: Bounds, b: Bounds) -> Bounds {
    Bounds {
        left: a.left.min(b.left),
        top: a.top.min(b.top),
        right: a.right.max(b.right),
        bottom: a.bottom.max(b.bottom),
    }
}

/// Overlap of two bounds. May be empty, check with [`Bounds::is_empty`].
pub fn intersect_bounds(a: Bounds, b: Bounds) -> Bounds {
    Bounds {
        left: a.left.max(b.left),
        top: a.top.max(b.top),
        right: a.right.min(b.right),
        bottom: a.bottom.min(b.bottom),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        ])
    }

    #[test]
    fn polygon_bounds() {
        assert_eq!(square().bounds(), Bounds::new(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn empty_polygon_bounds_is_sentinel() {
        let b = compute_bounds(&Polygon::default());
        assert_eq!(b, Bounds::EMPTY);
        assert!(b.is_empty());
    }

    #[test]
    fn sentinel_is_union_identity() {
        let real = Bounds::new(-3.0, 2.0, 7.5, 9.0);
        assert_eq!(union_bounds(Bounds::EMPTY, real), real);
        assert_eq!(union_bounds(real, Bounds::EMPTY), real);
    }

    #[test]
    fn rectangle_corners_in_order() {
        let poly = rectangle_to_polygon(&Rectangle::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            poly.points(),
            &[
                Point::new(1.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 6.0),
                Point::new(1.0, 6.0),
            ]
        );
    }

    #[test]
    fn offset_leaves_input_alone() {
        let original = square();
        let moved = offset_polygon(&original, -2.0, 3.0);
        assert_eq!(original, square());
        assert_eq!(moved.points()[0], Point::new(-2.0, 3.0));
        assert_eq!(moved.points()[2], Point::new(8.0, 8.0));
        assert_eq!(moved.len(), original.len());
    }

    #[test]
    fn intersection_of_disjoint_bounds_is_empty() {
        let a = Bounds::new(0.0, 0.0, 5.0, 5.0);
        let b = Bounds::new(10.0, 10.0, 20.0, 20.0);
        assert!(intersect_bounds(a, b).is_empty());
        assert!(!intersect_bounds(a, Bounds::new(2.0, 2.0, 8.0, 8.0)).is_empty());
    }

    #[test]
    fn touching_bounds_do_not_intersect() {
        let a = Bounds::new(0.0, 0.0, 5.0, 5.0);
        let b = Bounds::new(5.0, 0.0, 10.0, 5.0);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn degenerate_rectangles() {
        assert!(Rectangle::new(0.0, 0.0, 0.0, 5.0).is_degenerate());
        assert!(Rectangle::new(0.0, 0.0, 5.0, -1.0).is_degenerate());
        assert!(!Rectangle::new(0.0, 0.0, 5.0, 1.0).is_degenerate());
    }

    #[test]
    fn bounding_rectangle_of_polygon() {
        let poly = Polygon::new(vec![
            Point::new(2.0, 1.0),
            Point::new(6.0, 3.0),
            Point::new(4.0, 7.0),
        ]);
        assert_eq!(
            poly.bounding_rectangle(),
            Some(Rectangle::new(2.0, 1.0, 4.0, 6.0))
        );
        assert_eq!(Polygon::default().bounding_rectangle(), None);
    }

    #[test]
    fn coords_round_trip() {
        let coords = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let poly = Polygon::from_coords(&coords).unwrap();
        assert_eq!(poly.len(), 3);
        assert_eq!(poly.to_coords(), coords);
        assert!(Polygon::from_coords(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn zeroed_polygon_keeps_count() {
        let mut poly = Polygon::zeroed(5);
        assert_eq!(poly.len(), 5);
        poly.points_mut()[4] = Point::new(1.0, 1.0);
        assert_eq!(poly.len(), 5);
        assert_eq!(poly.points()[0], Point::default());
    }

    #[test]
    fn finiteness_checks() {
        assert!(Rectangle::new(0.0, 0.0, 5.0, 5.0).is_finite());
        assert!(!Rectangle::new(0.0, 0.0, f64::INFINITY, 5.0).is_finite());
        assert!(!Rectangle::new(f64::NAN, 0.0, 5.0, 5.0).is_finite());
        assert!(square().is_finite());
        let mut poly = square();
        poly.points_mut()[2] = Point::new(10.0, f64::NEG_INFINITY);
        assert!(!poly.is_finite());
    }
}
