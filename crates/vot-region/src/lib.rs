//! # vot-region
//!
//! Region geometry for visual object tracking evaluation: rectangles,
//! polygons and special sentinel codes, their text and flat encodings,
//! scan-line rasterization and the pixel overlap between two regions.
//!
//! ```
//! use vot_region::{Region, RasterPolicy, compute_overlap};
//!
//! let truth: Region = "0,0,10,10".parse().unwrap();
//! let guess: Region = "5,5,10,10".parse().unwrap();
//! let o = compute_overlap(&truth, &guess, None, RasterPolicy::Corrected);
//! assert!((o.overlap - 25.0 / 175.0).abs() < 1e-12);
//! ```
//!
//! Module map, leaf first:
//! - [`geometry`]: points, rectangles, polygons and bounds
//! - [`raster`]: polygon scan fill under a [`RasterPolicy`]
//! - [`region`]: the [`Region`] enum, conversions and encodings
//! - [`overlap`]: single and batch overlap
//! - [`host`]: flat-vector boundary for numeric hosts
//! - [`trajectory`]: line-oriented trajectory files

pub mod error;
pub mod geometry;
pub mod host;
pub mod overlap;
pub mod raster;
pub mod region;
pub mod trajectory;

// Re-export common types at crate root for convenience.
pub use error::{RegionError, Result};
pub use geometry::{Bounds, Point, Polygon, Rectangle};
pub use overlap::{
    BatchBounds, MAX_CANVAS_SIDE, Overlap, PixelCounts, compute_overlap,
    compute_overlap_sequences, compute_overlaps, mean_overlap, overlap_counts,
};
pub use raster::{Mask, RasterPolicy, RowSpans, count_polygon_pixels, rasterize_polygon};
pub use region::{Region, RegionKind, SPECIAL_NOT_TRACKED};
pub use trajectory::{
    TrajectoryReport, load_trajectory, read_trajectory, save_trajectory, write_flat_trajectory,
    write_trajectory,
};
