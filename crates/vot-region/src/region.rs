//! Tracking regions: rectangle, polygon or special sentinel.
//!
//! ## Rust Lesson #6: Enums (Sum Types)
//!
//! A region is exactly one of three shapes. A Rust `enum` carries the
//! payload inside the variant, and every `match` on it must handle all
//! three cases. Adding a fourth variant would turn every forgotten site
//! into a compile error.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{RegionError, Result};
use crate::geometry::{Bounds, Point, Polygon, Rectangle, rectangle_to_polygon};
use crate::raster::{Mask, RasterPolicy, rasterize_polygon};

/// Code written for frames without a usable region.
pub const SPECIAL_NOT_TRACKED: i32 = -1;

/// A tracked object's extent in one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Rectangle(Rectangle),
    Polygon(Polygon),
    /// Sentinel code (untracked, occluded, failure, ...). No geometry.
    Special(i32),
}

/// Variant tag of a [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Rectangle,
    Polygon,
    Special,
}

impl RegionKind {
    /// Get kind name as string.
    pub fn name(&self) -> &'static str {
        match self {
            RegionKind::Rectangle => "rectangle",
            RegionKind::Polygon => "polygon",
            RegionKind::Special => "special",
        }
    }

    /// Parse kind from string (case-insensitive).
    pub fn from_name(name: &str) -> Option<RegionKind> {
        match name.to_lowercase().as_str() {
            "rectangle" | "rect" => Some(RegionKind::Rectangle),
            "polygon" | "poly" => Some(RegionKind::Polygon),
            "special" => Some(RegionKind::Special),
            _ => None,
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Region {
    // ------------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------------

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Region::Rectangle(Rectangle::new(x, y, width, height))
    }

    /// Polygon with `count` vertices at the origin, to be filled in by the caller.
    pub fn polygon(count: usize) -> Self {
        Region::Polygon(Polygon::zeroed(count))
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Region::Polygon(Polygon::new(points))
    }

    pub fn special(code: i32) -> Self {
        Region::Special(code)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn kind(&self) -> RegionKind {
        match self {
            Region::Rectangle(_) => RegionKind::Rectangle,
            Region::Polygon(_) => RegionKind::Polygon,
            Region::Special(_) => RegionKind::Special,
        }
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        matches!(self, Region::Special(_))
    }

    /// Polygon form of the region, `None` for special regions.
    ///
    /// ## Rust Lesson #7: Cow (Clone on Write)
    ///
    /// A polygon region can lend its own payload (`Cow::Borrowed`), while a
    /// rectangle has to build a fresh four-vertex polygon (`Cow::Owned`).
    /// Callers read both through the same `&Polygon` without an extra copy.
    pub fn to_polygon(&self) -> Option<Cow<'_, Polygon>> {
        match self {
            Region::Rectangle(rect) => Some(Cow::Owned(rectangle_to_polygon(rect))),
            Region::Polygon(poly) => Some(Cow::Borrowed(poly)),
            Region::Special(_) => None,
        }
    }

    /// Axis-aligned bounds, `None` for special regions.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Region::Rectangle(r) => Some(Bounds::new(
                r.x.min(r.right()),
                r.y.min(r.bottom()),
                r.x.max(r.right()),
                r.y.max(r.bottom()),
            )),
            Region::Polygon(p) => Some(p.bounds()),
            Region::Special(_) => None,
        }
    }

    /// True when the region can never cover a pixel.
    pub fn is_empty(&self) -> bool {
        match self {
            Region::Rectangle(r) => r.is_degenerate(),
            Region::Polygon(p) => p.len() < 3,
            Region::Special(_) => true,
        }
    }

    // ------------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------------

    /// Convert to another kind without touching `self`.
    ///
    /// Conversion only widens: rectangle to polygon works, polygon to
    /// rectangle does not (use [`Polygon::bounding_rectangle`] when a
    /// bounding box is really wanted). Special regions never convert.
    pub fn convert(&self, target: RegionKind) -> Option<Region> {
        match (self, target) {
            (Region::Rectangle(r), RegionKind::Rectangle) => Some(Region::Rectangle(*r)),
            (Region::Rectangle(r), RegionKind::Polygon) => {
                Some(Region::Polygon(rectangle_to_polygon(r)))
            }
            (Region::Polygon(p), RegionKind::Polygon) => Some(Region::Polygon(p.clone())),
            (Region::Polygon(_), RegionKind::Rectangle) => None,
            (_, RegionKind::Special) | (Region::Special(_), _) => None,
        }
    }

    /// Like [`Region::convert`], but with an error naming both kinds.
    pub fn try_convert(&self, target: RegionKind) -> Result<Region> {
        self.convert(target)
            .ok_or(RegionError::UnsupportedConversion {
                from: self.kind().name(),
                to: target.name(),
            })
    }

    // ------------------------------------------------------------------------
    // Rasterization
    // ------------------------------------------------------------------------

    /// Binary mask of the region on a `width x height` grid at the origin.
    ///
    /// Special regions and degenerate rectangles give an empty mask.
    pub fn mask(&self, width: usize, height: usize, policy: RasterPolicy) -> Result<Mask> {
        match self {
            Region::Rectangle(r) if r.is_degenerate() => Mask::new(width, height),
            Region::Rectangle(r) => rasterize_polygon(&rectangle_to_polygon(r), width, height, policy),
            Region::Polygon(p) => rasterize_polygon(p, width, height, policy),
            Region::Special(_) => Mask::new(width, height),
        }
    }

    // ------------------------------------------------------------------------
    // Text and flat encodings
    // ------------------------------------------------------------------------

    /// Parse one trajectory line. `None` when it matches no encoding.
    pub fn parse(text: &str) -> Option<Region> {
        let values = parse_numbers(text)?;
        Region::from_values(&values)
    }

    /// Decode a flat numeric vector as handed over by host bindings.
    ///
    /// Length 1 is special, 4 is a rectangle, an even length above 6 is a
    /// polygon. Anything else is rejected, as are NaN and infinite values
    /// and special codes outside the `i32` range.
    pub fn from_flat(values: &[f64]) -> Result<Region> {
        Region::from_values(values).ok_or(RegionError::InvalidEncoding { len: values.len() })
    }

    /// Flat numeric vector, the inverse of [`Region::from_flat`].
    pub fn to_flat(&self) -> Vec<f64> {
        match self {
            Region::Rectangle(r) => vec![r.x, r.y, r.width, r.height],
            Region::Polygon(p) => p.to_coords(),
            Region::Special(code) => vec![*code as f64],
        }
    }

    fn from_values(values: &[f64]) -> Option<Region> {
        if !values.iter().all(|v| v.is_finite()) {
            return None;
        }
        match values.len() {
            1 => special_code(values[0]).map(Region::Special),
            4 => Some(Region::rectangle(values[0], values[1], values[2], values[3])),
            n if n > 6 && n % 2 == 0 => Polygon::from_coords(values).map(Region::Polygon),
            _ => None,
        }
    }
}

/// Special code from its numeric form. Fractions truncate toward zero,
/// codes beyond `i32` are refused rather than clamped.
fn special_code(value: f64) -> Option<i32> {
    let code = value.trunc();
    if code < i32::MIN as f64 || code > i32::MAX as f64 {
        return None;
    }
    Some(code as i32)
}

/// Comma-separated finite numbers. Whitespace around each one is ignored.
fn parse_numbers(text: &str) -> Option<Vec<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        })
        .collect()
}

impl FromStr for Region {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self> {
        Region::parse(s).ok_or_else(|| RegionError::Parse { input: s.to_string() })
    }
}

/// Trajectory line form: `x,y,w,h`, `x1,y1,...,xn,yn` or the special code.
///
/// `f64`'s `Display` prints the shortest text that parses back to the same
/// value, so `Region::parse(&r.to_string()) == Some(r)`.
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Rectangle(r) => write!(f, "{},{},{},{}", r.x, r.y, r.width, r.height),
            Region::Polygon(p) => {
                for (i, pt) in p.points().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{},{}", pt.x, pt.y)?;
                }
                Ok(())
            }
            Region::Special(code) => write!(f, "{}", code),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Region {
        Region::from_points(vec![
            Point::new(1.5, 2.0),
            Point::new(10.25, 2.5),
            Point::new(9.0, 12.0),
            Point::new(0.5, 11.0),
        ])
    }

    #[test]
    fn parse_rectangle() {
        assert_eq!(Region::parse("1,2,3,4"), Some(Region::rectangle(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(Region::parse(" 1.5 , 2 ,3,4\r"), Some(Region::rectangle(1.5, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn parse_polygon() {
        let region = Region::parse("0,0,10,0,10,10,0,10").unwrap();
        assert_eq!(region.kind(), RegionKind::Polygon);
        if let Region::Polygon(p) = &region {
            assert_eq!(p.len(), 4);
            assert_eq!(p.points()[2], Point::new(10.0, 10.0));
        }
    }

    #[test]
    fn parse_special() {
        assert_eq!(Region::parse("-1"), Some(Region::special(-1)));
        assert_eq!(Region::parse("0"), Some(Region::special(0)));
        assert_eq!(Region::parse("2.7"), Some(Region::special(2)));
        assert_eq!(Region::parse("-0.5"), Some(Region::special(0)));
        assert_eq!(Region::parse("2147483647"), Some(Region::special(i32::MAX)));
        assert_eq!(Region::parse("-2147483648.9"), Some(Region::special(i32::MIN)));
    }

    #[test]
    fn special_codes_out_of_range_are_rejected() {
        for text in ["1e10", "-1e10", "2147483648", "-2147483649"] {
            assert_eq!(Region::parse(text), None, "{:?}", text);
        }
        assert!(matches!(
            Region::from_flat(&[1e10]),
            Err(RegionError::InvalidEncoding { len: 1 })
        ));
        assert!(matches!("1e10".parse::<Region>(), Err(RegionError::Parse { .. })));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "   ", "1,2", "1,2,3", "1,2,3,4,5", "1,2,3,4,5,6", "1,2,3,4,5,6,7",
                    "a,b,c,d", "1,,3,4", "1;2;3;4", "nan,1,2,3", "inf"] {
            assert_eq!(Region::parse(bad), None, "{:?} should not parse", bad);
        }
        assert!(matches!("1,2,x,4".parse::<Region>(), Err(RegionError::Parse { .. })));
    }

    #[test]
    fn serialize_forms() {
        assert_eq!(Region::rectangle(1.0, 2.5, 3.0, 4.0).to_string(), "1,2.5,3,4");
        assert_eq!(Region::special(-1).to_string(), "-1");
        assert_eq!(quad().to_string(), "1.5,2,10.25,2.5,9,12,0.5,11");
    }

    #[test]
    fn serialize_parse_round_trip() {
        let regions = [
            Region::rectangle(0.1, 1.0 / 3.0, 120.75, 0.0001),
            Region::rectangle(-4.0, 5.0, -2.0, 0.0),
            quad(),
            Region::special(-1),
            Region::special(3),
        ];
        for region in regions {
            assert_eq!(Region::parse(&region.to_string()), Some(region.clone()));
        }
    }

    #[test]
    fn flat_encoding_lengths() {
        assert_eq!(Region::from_flat(&[2.0]).unwrap(), Region::special(2));
        assert_eq!(Region::from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap().kind(), RegionKind::Rectangle);
        assert_eq!(Region::from_flat(&[0.0; 8]).unwrap().kind(), RegionKind::Polygon);
        for len in [0, 2, 3, 5, 6, 7, 9] {
            let values = vec![1.0; len];
            assert!(matches!(
                Region::from_flat(&values),
                Err(RegionError::InvalidEncoding { len: l }) if l == len
            ));
        }
    }

    #[test]
    fn flat_encoding_rejects_non_finite() {
        let bad: [&[f64]; 5] = [
            &[f64::NAN, f64::NAN, f64::NAN, f64::NAN],
            &[0.0, 0.0, f64::INFINITY, 10.0],
            &[f64::INFINITY],
            &[f64::NAN],
            &[0.0, 0.0, 4.0, 0.0, 4.0, f64::NEG_INFINITY, 0.0, 4.0],
        ];
        for values in bad {
            assert!(
                matches!(Region::from_flat(values), Err(RegionError::InvalidEncoding { len }) if len == values.len()),
                "{:?} should be rejected",
                values
            );
        }
    }

    #[test]
    fn flat_round_trip() {
        for region in [quad(), Region::rectangle(1.0, 2.0, 3.0, 4.0), Region::special(-1)] {
            assert_eq!(Region::from_flat(&region.to_flat()).unwrap(), region);
        }
    }

    #[test]
    fn rectangle_widens_to_polygon() {
        let rect = Region::rectangle(1.0, 2.0, 3.0, 4.0);
        let poly = rect.convert(RegionKind::Polygon).unwrap();
        assert_eq!(poly.to_flat(), vec![1.0, 2.0, 4.0, 2.0, 4.0, 6.0, 1.0, 6.0]);
        // Source untouched
        assert_eq!(rect, Region::rectangle(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn polygon_does_not_narrow() {
        assert_eq!(quad().convert(RegionKind::Rectangle), None);
        assert!(matches!(
            quad().try_convert(RegionKind::Rectangle),
            Err(RegionError::UnsupportedConversion { from: "polygon", to: "rectangle" })
        ));
    }

    #[test]
    fn same_kind_conversion_is_a_copy() {
        assert_eq!(quad().convert(RegionKind::Polygon), Some(quad()));
        let rect = Region::rectangle(1.0, 1.0, 2.0, 2.0);
        assert_eq!(rect.convert(RegionKind::Rectangle), Some(rect.clone()));
    }

    #[test]
    fn special_never_converts() {
        let special = Region::special(-1);
        assert_eq!(special.convert(RegionKind::Polygon), None);
        assert_eq!(special.convert(RegionKind::Rectangle), None);
        assert_eq!(special.convert(RegionKind::Special), None);
        assert_eq!(quad().convert(RegionKind::Special), None);
    }

    #[test]
    fn clone_is_independent() {
        let original = Region::polygon(4);
        let mut copy = original.clone();
        if let Region::Polygon(p) = &mut copy {
            p.points_mut()[0] = Point::new(7.0, 7.0);
        }
        assert_eq!(original, Region::polygon(4));
        assert_ne!(original, copy);
    }

    #[test]
    fn rectangle_mask_matches_polygon_mask() {
        let rect = Region::rectangle(2.0, 1.0, 5.0, 3.0);
        let poly = rect.convert(RegionKind::Polygon).unwrap();
        for &policy in RasterPolicy::all() {
            assert_eq!(rect.mask(12, 9, policy).unwrap(), poly.mask(12, 9, policy).unwrap());
        }
    }

    #[test]
    fn degenerate_and_special_masks_are_empty() {
        assert_eq!(Region::rectangle(2.0, 2.0, -3.0, 4.0).mask(10, 10, RasterPolicy::Corrected).unwrap().count(), 0);
        assert_eq!(Region::rectangle(2.0, 2.0, 0.0, 4.0).mask(10, 10, RasterPolicy::Legacy).unwrap().count(), 0);
        assert_eq!(Region::special(0).mask(10, 10, RasterPolicy::Corrected).unwrap().count(), 0);
    }

    #[test]
    fn oversized_mask_is_an_error() {
        for region in [quad(), Region::special(0), Region::rectangle(0.0, 0.0, 0.0, 1.0)] {
            assert!(matches!(
                region.mask(usize::MAX, 2, RasterPolicy::Corrected),
                Err(RegionError::MaskTooLarge { .. })
            ));
        }
    }

    #[test]
    fn bounds_of_regions() {
        assert_eq!(
            Region::rectangle(5.0, 5.0, -2.0, 3.0).bounds(),
            Some(Bounds::new(3.0, 5.0, 5.0, 8.0))
        );
        assert_eq!(quad().bounds(), Some(Bounds::new(0.5, 2.0, 10.25, 12.0)));
        assert_eq!(Region::special(1).bounds(), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(RegionKind::from_name("Rectangle"), Some(RegionKind::Rectangle));
        assert_eq!(RegionKind::from_name("POLYGON"), Some(RegionKind::Polygon));
        assert_eq!(RegionKind::from_name("mask"), None);
        assert_eq!(RegionKind::Special.to_string(), "special");
    }
}
