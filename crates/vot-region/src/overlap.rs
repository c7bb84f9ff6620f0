//! Region overlap (intersection over union) by rasterization.
//!
//! Both regions are rasterized on a shared canvas covering their union,
//! optionally clipped to a bounding window. Pixels are counted as shared,
//! first-only or second-only by merging the two regions' row spans, and
//! each count is divided by the union. No pixel buffer is allocated.
//!
//! ## Invalid vs. empty
//!
//! - A special region, a polygon with fewer than three vertices or a region
//!   with a non-finite coordinate cannot be compared at all: the result is
//!   [`Overlap::INVALID`] (`overlap == -1`). So is a canvas wider or taller
//!   than [`MAX_CANVAS_SIDE`].
//! - Regions that are valid but cover no pixels in the window give all
//!   zeros. That is a real answer, not an error.

use std::borrow::Cow;

use log::debug;
use rayon::prelude::*;

use crate::error::{RegionError, Result};
use crate::geometry::{Bounds, Polygon, offset_polygon, rectangle_to_polygon};
use crate::raster::{RasterPolicy, RowSpans, count_polygon_pixels, span_length};
use crate::region::Region;

/// Largest canvas width or height, in pixels, an overlap is computed on.
pub const MAX_CANVAS_SIDE: f64 = 16_777_216.0;

/// Fractions of the union area. `overlap + only1 + only2 == 1` for any
/// valid result with a non-empty union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Shared pixels / union pixels.
    pub overlap: f64,
    /// First-region-only pixels / union pixels.
    pub only1: f64,
    /// Second-region-only pixels / union pixels.
    pub only2: f64,
}

impl Overlap {
    /// Result of a comparison that cannot be computed.
    pub const INVALID: Overlap = Overlap {
        overlap: -1.0,
        only1: 0.0,
        only2: 0.0,
    };

    /// Result for an empty union.
    pub const ZERO: Overlap = Overlap {
        overlap: 0.0,
        only1: 0.0,
        only2: 0.0,
    };

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.overlap >= 0.0
    }

    /// Triple for numeric hosts: invalid results become NaN in every field.
    pub fn to_host(&self) -> [f64; 3] {
        if self.is_valid() {
            [self.overlap, self.only1, self.only2]
        } else {
            [f64::NAN; 3]
        }
    }
}

/// Raw pixel counts behind an [`Overlap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelCounts {
    pub intersection: usize,
    pub only1: usize,
    pub only2: usize,
}

impl PixelCounts {
    #[inline]
    pub fn union(&self) -> usize {
        self.intersection + self.only1 + self.only2
    }

    /// Ratios over the union, all zero when the union is empty.
    pub fn to_overlap(&self) -> Overlap {
        let denom = self.union();
        if denom == 0 {
            return Overlap::ZERO;
        }
        let denom = denom as f64;
        Overlap {
            overlap: self.intersection as f64 / denom,
            only1: self.only1 as f64 / denom,
            only2: self.only2 as f64 / denom,
        }
    }
}

/// Overlap of two regions, optionally restricted to `bounds`.
pub fn compute_overlap(
    a: &Region,
    b: &Region,
    bounds: Option<Bounds>,
    policy: RasterPolicy,
) -> Overlap {
    match overlap_counts(a, b, bounds, policy) {
        Some(counts) => counts.to_overlap(),
        None => Overlap::INVALID,
    }
}

/// Pixel counts of two regions, `None` when they cannot be compared.
pub fn overlap_counts(
    a: &Region,
    b: &Region,
    bounds: Option<Bounds>,
    policy: RasterPolicy,
) -> Option<PixelCounts> {
    let pa = comparable_polygon(a)?;
    let pb = comparable_polygon(b)?;

    let window = bounds.unwrap_or(Bounds::new(f64::MIN, f64::MIN, f64::MAX, f64::MAX));
    let ba = clipped_extent(pa.as_deref(), &window);
    let bb = clipped_extent(pb.as_deref(), &window);

    let extent = ba.union(&bb);
    if !Canvas::fits(&extent) {
        debug!(
            "overlap canvas {}x{} exceeds {} pixels per side",
            extent.width(), extent.height(), MAX_CANVAS_SIDE
        );
        return None;
    }
    let Some(canvas) = Canvas::covering(&extent, policy) else {
        return Some(PixelCounts::default());
    };
    debug!(
        "overlap canvas at ({}, {}) size {}x{} ({})",
        canvas.x0, canvas.y0, canvas.width, canvas.height, policy.name()
    );

    let local_a = pa.map(|p| offset_polygon(&p, -canvas.x0, -canvas.y0));
    let local_b = pb.map(|p| offset_polygon(&p, -canvas.x0, -canvas.y0));

    // Disjoint extents cannot share a pixel: count each side on its own.
    if ba.intersection(&bb).is_empty() {
        return Some(PixelCounts {
            intersection: 0,
            only1: canvas.count(local_a.as_ref(), policy),
            only2: canvas.count(local_b.as_ref(), policy),
        });
    }

    // Both extents are non-empty here, so both polygons exist.
    let (Some(local_a), Some(local_b)) = (local_a, local_b) else {
        return Some(PixelCounts::default());
    };

    Some(canvas.count_pair(&local_a, &local_b, policy))
}

/// Polygon form used for comparison.
///
/// Outer `None`: region cannot be compared. Inner `None`: valid but empty
/// (a rectangle with a non-positive extent).
fn comparable_polygon(region: &Region) -> Option<Option<Cow<'_, Polygon>>> {
    match region {
        Region::Special(_) => None,
        Region::Polygon(p) if p.len() < 3 || !p.is_finite() => None,
        Region::Polygon(p) => Some(Some(Cow::Borrowed(p))),
        Region::Rectangle(r) if !r.is_finite() => None,
        Region::Rectangle(r) if r.is_degenerate() => Some(None),
        Region::Rectangle(r) => Some(Some(Cow::Owned(rectangle_to_polygon(r)))),
    }
}

/// Polygon bounds inside the window, [`Bounds::EMPTY`] when nothing is left.
fn clipped_extent(polygon: Option<&Polygon>, window: &Bounds) -> Bounds {
    let clipped = polygon
        .map(|p| p.bounds().intersection(window))
        .unwrap_or(Bounds::EMPTY);
    if clipped.is_empty() { Bounds::EMPTY } else { clipped }
}

/// Integer pixel grid the regions are sampled on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Canvas {
    x0: f64,
    y0: f64,
    width: usize,
    height: usize,
}

impl Canvas {
    /// False when `extent` is too large (or not a number) to scan.
    fn fits(extent: &Bounds) -> bool {
        extent.is_empty()
            || (extent.width() <= MAX_CANVAS_SIDE && extent.height() <= MAX_CANVAS_SIDE)
    }

    /// Grid covering `extent`, `None` when it holds no pixel.
    ///
    /// Corrected sampling covers the integer points in `[left, right)`.
    /// Legacy truncates the origin and the size, which drops the last
    /// row and column of a region touching the far edge.
    fn covering(extent: &Bounds, policy: RasterPolicy) -> Option<Canvas> {
        if extent.is_empty() {
            return None;
        }
        let (x0, y0, width, height) = match policy {
            RasterPolicy::Corrected => {
                let x0 = extent.left.ceil();
                let y0 = extent.top.ceil();
                (x0, y0, extent.right.ceil() - x0, extent.bottom.ceil() - y0)
            }
            RasterPolicy::Legacy => {
                let x0 = extent.left.trunc();
                let y0 = extent.top.trunc();
                (x0, y0, (extent.right - x0).trunc(), (extent.bottom - y0).trunc())
            }
        };
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Canvas {
            x0,
            y0,
            width: width as usize,
            height: height as usize,
        })
    }

    fn count(&self, polygon: Option<&Polygon>, policy: RasterPolicy) -> usize {
        polygon.map_or(0, |p| count_polygon_pixels(p, self.width, self.height, policy))
    }

    /// Shared and exclusive pixels of two polygons, one row at a time.
    fn count_pair(&self, a: &Polygon, b: &Polygon, policy: RasterPolicy) -> PixelCounts {
        let mut rows_a = RowSpans::new(a, self.width, policy);
        let mut rows_b = RowSpans::new(b, self.width, policy);
        let mut counts = PixelCounts::default();
        for y in 0..self.height {
            let spans_a = rows_a.row(y);
            let spans_b = rows_b.row(y);
            let shared = shared_length(spans_a, spans_b);
            counts.intersection += shared;
            counts.only1 += span_length(spans_a) - shared;
            counts.only2 += span_length(spans_b) - shared;
        }
        counts
    }
}

/// Pixels covered by both span lists. Each list is sorted and disjoint.
fn shared_length(a: &[(usize, usize)], b: &[(usize, usize)]) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut shared = 0;
    while i < a.len() && j < b.len() {
        let start = a[i].0.max(b[j].0);
        let end = a[i].1.min(b[j].1);
        if start < end {
            shared += end - start;
        }
        if a[i].1 <= b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    shared
}

// ============================================================================
// BATCH OPERATIONS
// ============================================================================

/// Window selection for a batch of region pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BatchBounds {
    /// Every pair is unrestricted.
    #[default]
    None,
    /// One window for all pairs.
    Shared(Bounds),
    /// One window per pair. Pairs past the end of the list are unrestricted.
    PerPair(Vec<Option<Bounds>>),
}

impl BatchBounds {
    pub fn for_pair(&self, index: usize) -> Option<Bounds> {
        match self {
            BatchBounds::None => None,
            BatchBounds::Shared(b) => Some(*b),
            BatchBounds::PerPair(list) => list.get(index).copied().flatten(),
        }
    }
}

/// Overlap for every pair, in input order.
///
/// A pair with a missing side (it failed to decode upstream) yields
/// [`Overlap::INVALID`] at its index and nothing else is affected.
///
/// ## Rust Lesson #8: Data Parallelism with rayon
///
/// `par_iter()` splits the slice across a thread pool. Each pair is
/// independent, and `collect()` on an indexed parallel iterator keeps
/// the original order, so `result[i]` always belongs to `pairs[i]`.
pub fn compute_overlaps(
    pairs: &[(Option<Region>, Option<Region>)],
    bounds: &BatchBounds,
    policy: RasterPolicy,
) -> Vec<Overlap> {
    pairs
        .par_iter()
        .enumerate()
        .map(|(i, pair)| match pair {
            (Some(a), Some(b)) => compute_overlap(a, b, bounds.for_pair(i), policy),
            _ => Overlap::INVALID,
        })
        .collect()
}

/// Frame-by-frame overlap of two equally long trajectories.
pub fn compute_overlap_sequences(
    first: &[Region],
    second: &[Region],
    bounds: &BatchBounds,
    policy: RasterPolicy,
) -> Result<Vec<Overlap>> {
    if first.len() != second.len() {
        return Err(RegionError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    Ok(first
        .par_iter()
        .zip(second.par_iter())
        .enumerate()
        .map(|(i, (a, b))| compute_overlap(a, b, bounds.for_pair(i), policy))
        .collect())
}

/// Mean overlap of the valid results, `None` if there are none.
pub fn mean_overlap(results: &[Overlap]) -> Option<f64> {
    let valid: Vec<f64> = results
        .iter()
        .filter(|o| o.is_valid())
        .map(|o| o.overlap)
        .collect();
    if valid.is_empty() {
        None
    } else {
        Some(valid.iter().sum::<f64>() / valid.len() as f64)
    }
}

// ============================================================================
// TESTS
// ============================================================================
