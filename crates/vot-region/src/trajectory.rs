//! Trajectory files: one region per line, in frame order.
//!
//! ```text
//! 12.5,30,40,22           rectangle
//! 1,1,9,1,9,7,1,7         polygon
//! 0                       special code
//! ```
//!
//! Reading is forgiving. A line that is not a region is logged and skipped,
//! and its number is kept in the report so callers can tell frames went
//! missing.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::error::Result;
use crate::region::{Region, SPECIAL_NOT_TRACKED};

/// Regions read from a trajectory plus the lines that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryReport {
    pub regions: Vec<Region>,
    /// 1-based numbers of lines that did not parse.
    pub skipped: Vec<usize>,
}

impl TrajectoryReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// One entry per input line, `None` where a line was skipped.
    ///
    /// Keeps frame numbers aligned when two trajectories are compared.
    pub fn frames(&self) -> Vec<Option<Region>> {
        let total = self.regions.len() + self.skipped.len();
        let mut regions = self.regions.iter();
        let mut skipped = self.skipped.iter().peekable();
        (1..=total)
            .map(|line| {
                if skipped.next_if_eq(&&line).is_some() {
                    None
                } else {
                    regions.next().cloned()
                }
            })
            .collect()
    }
}

/// Read every parseable region from `reader`.
///
/// Only I/O failures are errors. Bad lines are warned about and skipped.
pub fn read_trajectory<R: BufRead>(reader: R) -> Result<TrajectoryReport> {
    let mut report = TrajectoryReport::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match Region::parse(&line) {
            Some(region) => report.regions.push(region),
            None => {
                warn!("Unable to parse region in line {}: {:?}", index + 1, line.trim());
                report.skipped.push(index + 1);
            }
        }
    }
    Ok(report)
}

/// Write one region per line.
pub fn write_trajectory<W: Write>(mut writer: W, regions: &[Region]) -> Result<()> {
    for region in regions {
        writeln!(writer, "{}", region)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write flat-encoded regions, one per line.
///
/// Entries that do not decode are written as the "not tracked" special
/// code so the line count still matches the frame count. Returns how many
/// entries were replaced.
pub fn write_flat_trajectory<W: Write>(mut writer: W, entries: &[Vec<f64>]) -> Result<usize> {
    let mut substituted = 0;
    for (index, values) in entries.iter().enumerate() {
        let region = match Region::from_flat(values) {
            Ok(region) => region,
            Err(e) => {
                warn!("Entry {} written as special region: {}", index + 1, e);
                substituted += 1;
                Region::special(SPECIAL_NOT_TRACKED)
            }
        };
        writeln!(writer, "{}", region)?;
    }
    writer.flush()?;
    Ok(substituted)
}

/// Read a trajectory file.
pub fn load_trajectory(path: impl AsRef<Path>) -> Result<TrajectoryReport> {
    let file = File::open(path.as_ref())?;
    read_trajectory(BufReader::new(file))
}

/// Write a trajectory file, replacing any existing one.
pub fn save_trajectory(path: impl AsRef<Path>, regions: &[Region]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_trajectory(BufWriter::new(file), regions)
}
