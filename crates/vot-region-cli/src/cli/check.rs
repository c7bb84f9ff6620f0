//! Check command: parse a trajectory file and summarize it.

use vot_region::{RegionKind, TrajectoryReport, load_trajectory};

/// Counts of each region kind in a trajectory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub rectangles: usize,
    pub polygons: usize,
    pub specials: usize,
}

impl KindCounts {
    pub fn from_report(report: &TrajectoryReport) -> Self {
        let mut counts = KindCounts::default();
        for region in &report.regions {
            match region.kind() {
                RegionKind::Rectangle => counts.rectangles += 1,
                RegionKind::Polygon => counts.polygons += 1,
                RegionKind::Special => counts.specials += 1,
            }
        }
        counts
    }
}

/// Execute the check command.
pub fn cmd_check(args: &[String]) -> Result<(), String> {
    let mut path: Option<&str> = None;
    let mut strict = false;
    for arg in args {
        match arg.as_str() {
            "--strict" => strict = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other if !other.starts_with('-') => path = Some(other),
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    let Some(path) = path else {
        print_usage();
        return Err("No trajectory file specified".to_string());
    };

    let report = load_trajectory(path).map_err(|e| format!("{}: {}", path, e))?;
    let counts = KindCounts::from_report(&report);

    println!("{}", path);
    println!("  frames:     {}", report.regions.len() + report.skipped.len());
    println!("  rectangles: {}", counts.rectangles);
    println!("  polygons:   {}", counts.polygons);
    println!("  special:    {}", counts.specials);
    if report.is_complete() {
        println!("  skipped:    0");
    } else {
        let lines: Vec<String> = report.skipped.iter().map(|n| n.to_string()).collect();
        println!("  skipped:    {} (lines {})", report.skipped.len(), lines.join(", "));
    }

    if strict && !report.is_complete() {
        return Err(format!("{} has unparseable lines", path));
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: vot-region check <trajectory.txt> [--strict]");
    eprintln!();
    eprintln!("Reports region kinds and unparseable lines. --strict fails on any skipped line.");
}
