//! Boundary for numeric hosts (scripting bindings, array languages).
//!
//! Hosts hand over regions as flat `f64` vectors, bounds as 0, 2 or 4
//! numbers and the rasterization policy as an optional string. Results go
//! back as `[f64; 3]` triples where an invalid comparison reads as NaN.
//!
//! ## Rust Lesson #9: Atomics for Process-Wide Flags
//!
//! Older bindings toggled legacy rasterization through a global flag word.
//! A `static AtomicU32` gives that global without `unsafe` or a mutex. New
//! code should pass a [`RasterPolicy`] explicitly and never touch it.

use std::sync::atomic::{AtomicU32, Ordering};

use log::warn;

use crate::error::{RegionError, Result};
use crate::geometry::{Bounds, Point, Polygon};
use crate::overlap::{BatchBounds, Overlap, compute_overlap, compute_overlaps};
use crate::raster::{Mask, RasterPolicy, rasterize_polygon};
use crate::region::{Region, RegionKind};

/// Flag bit selecting legacy rasterization.
pub const REGION_LEGACY_RASTERIZATION: u32 = 1;

static FLAGS: AtomicU32 = AtomicU32::new(0);

/// Set bits in the process-wide flag word.
pub fn set_flags(mask: u32) {
    FLAGS.fetch_or(mask, Ordering::SeqCst);
}

/// Clear bits in the process-wide flag word.
pub fn clear_flags(mask: u32) {
    FLAGS.fetch_and(!mask, Ordering::SeqCst);
}

pub fn flags() -> u32 {
    FLAGS.load(Ordering::SeqCst)
}

/// Policy selected by the flag word.
pub fn current_policy() -> RasterPolicy {
    if flags() & REGION_LEGACY_RASTERIZATION != 0 {
        RasterPolicy::Legacy
    } else {
        RasterPolicy::Corrected
    }
}

/// [`compute_overlap`] with the policy taken from the flag word.
pub fn compute_overlap_flagged(a: &Region, b: &Region, bounds: Option<Bounds>) -> Overlap {
    compute_overlap(a, b, bounds, current_policy())
}

// ============================================================================
// ARGUMENT DECODING
// ============================================================================

/// Decode a bounds argument.
///
/// - `[]` → no window
/// - `[w, h]` → `(0, 0, w, h)`
/// - `[left, top, right, bottom]` → as given
pub fn parse_bounds(values: &[f64]) -> Result<Option<Bounds>> {
    match values {
        [] => Ok(None),
        &[w, h] => Ok(Some(Bounds::from_size(w, h))),
        &[l, t, r, b] => Ok(Some(Bounds::new(l, t, r, b))),
        _ => Err(RegionError::InvalidBounds { len: values.len() }),
    }
}

/// Decode a policy selector. Only `"legacy"` (any case) picks the legacy rule.
pub fn parse_policy(selector: Option<&str>) -> RasterPolicy {
    match selector {
        Some(s) if s.eq_ignore_ascii_case("legacy") => RasterPolicy::Legacy,
        _ => RasterPolicy::Corrected,
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Overlap of two flat regions as a host triple.
///
/// Malformed vectors are errors. Well-formed regions that cannot be
/// compared (special codes) come back as NaN.
pub fn overlap_query(
    a: &[f64],
    b: &[f64],
    bounds: &[f64],
    policy: Option<&str>,
) -> Result<[f64; 3]> {
    let a = Region::from_flat(a)?;
    let b = Region::from_flat(b)?;
    let bounds = parse_bounds(bounds)?;
    Ok(compute_overlap(&a, &b, bounds, parse_policy(policy)).to_host())
}

/// Frame-by-frame overlap of two flat trajectories.
///
/// Only a length mismatch (or bad bounds) fails the whole call. A pair
/// that does not decode gives NaN at its index.
pub fn batch_overlap_query(
    first: &[Vec<f64>],
    second: &[Vec<f64>],
    bounds: &[f64],
    policy: Option<&str>,
) -> Result<Vec<[f64; 3]>> {
    if first.len() != second.len() {
        return Err(RegionError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    let bounds = match parse_bounds(bounds)? {
        Some(b) => BatchBounds::Shared(b),
        None => BatchBounds::None,
    };

    let pairs: Vec<_> = first
        .iter()
        .zip(second)
        .map(|(a, b)| (Region::from_flat(a).ok(), Region::from_flat(b).ok()))
        .collect();
    let skipped = pairs.iter().filter(|(a, b)| a.is_none() || b.is_none()).count();
    if skipped > 0 {
        warn!("{} of {} region pairs failed to decode", skipped, pairs.len());
    }

    Ok(compute_overlaps(&pairs, &bounds, parse_policy(policy))
        .iter()
        .map(Overlap::to_host)
        .collect())
}

/// Mask of a flat region for a column-major host.
///
/// The polygon is mirrored across the diagonal and drawn on a grid with
/// the axes swapped, so the row-major result reads as a column-major
/// `(height, width)` matrix on the other side. A grid too large to
/// allocate is [`RegionError::MaskTooLarge`].
pub fn export_mask(
    region: &[f64],
    width: usize,
    height: usize,
    policy: Option<&str>,
) -> Result<Vec<u8>> {
    let region = Region::from_flat(region)?;
    let policy = parse_policy(policy);
    let polygon = match region.to_polygon() {
        Some(polygon) if !region.is_empty() => polygon,
        _ => return Ok(Mask::new(height, width)?.into_data()),
    };
    let swapped = Polygon::new(polygon.points().iter().map(|p| Point::new(p.y, p.x)).collect());
    Ok(rasterize_polygon(&swapped, height, width, policy)?.into_data())
}

/// Convert a flat region to the named kind and re-encode it.
pub fn convert_query(region: &[f64], target: &str) -> Result<Vec<f64>> {
    let region = Region::from_flat(region)?;
    convert_to(&region, target)
}

/// Parse a region string, convert it to the named kind and encode it flat.
pub fn convert_text_query(text: &str, target: &str) -> Result<Vec<f64>> {
    let region: Region = text.parse()?;
    convert_to(&region, target)
}

fn convert_to(region: &Region, target: &str) -> Result<Vec<f64>> {
    let kind = RegionKind::from_name(target)
        .ok_or_else(|| RegionError::UnknownKind(target.to_string()))?;
    Ok(region.try_convert(kind)?.to_flat())
}

// ============================================================================
// TESTS
// ============================================================================
