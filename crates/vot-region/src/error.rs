//! Error types for region decoding and trajectory I/O.
//!
//! ## Rust Lesson #4: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` impls from the `#[error(...)]`
//! attributes, and `#[from]` lets `?` convert an `io::Error` for us.
//!
//! Note what is NOT an error here: comparing against a special region gives
//! an invalid overlap value, and an unsupported conversion gives `None`.
//! Errors are reserved for input that cannot become a region at all.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, RegionError>;

#[derive(Error, Debug)]
pub enum RegionError {
    /// Flat numeric vector whose length is not 1, 4 or an even number > 6,
    /// or that holds a non-finite value or an out-of-range special code.
    #[error("Not a valid region vector (length {len})")]
    InvalidEncoding { len: usize },

    /// Text that matches none of the region encodings.
    #[error("Not a valid region string: {input:?}")]
    Parse { input: String },

    #[error("Unknown region type: {0}")]
    UnknownKind(String),

    #[error("Unable to convert region from {from} to {to}")]
    UnsupportedConversion {
        from: &'static str,
        to: &'static str,
    },

    #[error("Region sequences differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// Bounds argument that is neither empty, `[w, h]` nor `[l, t, r, b]`.
    #[error("Bounds must have 0, 2 or 4 values, got {len}")]
    InvalidBounds { len: usize },

    /// Mask whose pixel buffer cannot be addressed or allocated.
    #[error("Mask of {width}x{height} pixels is too large")]
    MaskTooLarge { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
