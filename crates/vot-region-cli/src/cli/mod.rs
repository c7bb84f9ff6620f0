//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `overlap` - Overlap between two regions
//! - `batch` - Frame-by-frame overlap of two trajectory files
//! - `mask` - Rasterize a region to text or PNG
//! - `convert` - Convert a region to another kind
//! - `check` - Parse a trajectory file and report problems
//! - `benchmark` - Time batch overlap on random regions
//! - `config` - Validate or print an evaluation config

pub mod benchmark;
pub mod check;
pub mod common;
pub mod config;
pub mod convert;
pub mod mask;
pub mod overlap;

pub use benchmark::cmd_benchmark;
pub use check::cmd_check;
pub use config::cmd_config;
pub use convert::cmd_convert;
pub use mask::cmd_mask;
pub use overlap::{cmd_batch, cmd_overlap};
