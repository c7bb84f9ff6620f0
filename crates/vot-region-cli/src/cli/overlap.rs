//! Overlap and batch commands.

use serde::Serialize;

use vot_region::{
    BatchBounds, Bounds, Overlap, RasterPolicy, compute_overlap, compute_overlaps,
    load_trajectory, mean_overlap,
};

use super::common::{
    JsonOverlap, OutputFormat, flag_value, format_ratio, parse_bounds_arg, parse_region_arg,
};
use super::config::EvalConfig;

/// Single comparison in JSON output format.
#[derive(Serialize)]
struct JsonSingle {
    policy: &'static str,
    #[serde(flatten)]
    result: JsonOverlap,
}

/// One frame of a batch in JSON output format.
#[derive(Serialize)]
struct JsonFrame {
    frame: usize,
    #[serde(flatten)]
    result: JsonOverlap,
}

/// Batch summary in JSON output format.
#[derive(Serialize)]
struct JsonBatch {
    policy: &'static str,
    frames: Vec<JsonFrame>,
    total: usize,
    valid: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    mean_overlap: Option<f64>,
}

/// Execute the overlap command.
pub fn cmd_overlap(args: &[String]) -> Result<(), String> {
    let mut regions: Vec<&str> = Vec::new();
    let mut bounds: Option<Bounds> = None;
    let mut policy = RasterPolicy::Corrected;
    let mut format = OutputFormat::Text;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-b" | "--bounds" => {
                bounds = parse_bounds_arg(flag_value(args, i, "--bounds")?)?;
                i += 1;
            }
            "--legacy" => policy = RasterPolicy::Legacy,
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => {
                print_overlap_usage();
                return Ok(());
            }
            other if other.starts_with("--") => return Err(format!("Unknown option: {}", other)),
            // Anything else is a region, including negative special codes
            other => regions.push(other),
        }
        i += 1;
    }

    let &[a, b] = regions.as_slice() else {
        print_overlap_usage();
        return Err(format!("Expected two regions, got {}", regions.len()));
    };
    let a = parse_region_arg(a)?;
    let b = parse_region_arg(b)?;

    let result = compute_overlap(&a, &b, bounds, policy);

    match format {
        OutputFormat::Json => {
            let out = JsonSingle {
                policy: policy.name(),
                result: JsonOverlap::from(&result),
            };
            println!("{}", serde_json::to_string(&out).map_err(|e| e.to_string())?);
        }
        OutputFormat::Text => print_overlap(&result),
    }
    Ok(())
}

fn print_overlap(result: &Overlap) {
    if result.is_valid() {
        println!("overlap: {}", format_ratio(result.overlap));
        println!("only1:   {}", format_ratio(result.only1));
        println!("only2:   {}", format_ratio(result.only2));
    } else {
        println!("overlap: invalid");
    }
}

/// Execute the batch command.
pub fn cmd_batch(args: &[String]) -> Result<(), String> {
    let mut paths: Vec<&str> = Vec::new();
    let mut config_path: Option<&str> = None;
    let mut bounds_arg: Option<&str> = None;
    let mut legacy = false;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-b" | "--bounds" => {
                bounds_arg = Some(flag_value(args, i, "--bounds")?);
                i += 1;
            }
            "-c" | "--config" => {
                config_path = Some(flag_value(args, i, "--config")?);
                i += 1;
            }
            "--legacy" => legacy = true,
            "--json" => json = true,
            "-h" | "--help" => {
                print_batch_usage();
                return Ok(());
            }
            other if !other.starts_with('-') => paths.push(other),
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let &[first_path, second_path] = paths.as_slice() else {
        print_batch_usage();
        return Err(format!("Expected two trajectory files, got {}", paths.len()));
    };

    // Config first, then flags on top
    let config = match config_path {
        Some(p) => EvalConfig::load(p)?,
        None => EvalConfig::default(),
    };
    let policy = if legacy { RasterPolicy::Legacy } else { config.raster_policy() };
    let window = match bounds_arg {
        Some(text) => parse_bounds_arg(text)?,
        None => config.window()?,
    };
    let format = if json { OutputFormat::Json } else { config.output };

    let first = load_trajectory(first_path).map_err(|e| format!("{}: {}", first_path, e))?;
    let second = load_trajectory(second_path).map_err(|e| format!("{}: {}", second_path, e))?;
    for (path, report) in [(first_path, &first), (second_path, &second)] {
        if !report.is_complete() {
            eprintln!("{}: skipped {} unparseable line(s)", path, report.skipped.len());
        }
    }

    let first = first.frames();
    let second = second.frames();
    if first.len() != second.len() {
        return Err(format!(
            "Trajectories differ in length ({} vs {} frames)",
            first.len(),
            second.len()
        ));
    }

    let pairs: Vec<_> = first.into_iter().zip(second).collect();
    let batch_bounds = window.map_or(BatchBounds::None, BatchBounds::Shared);
    let results = compute_overlaps(&pairs, &batch_bounds, policy);
    let mean = mean_overlap(&results);
    let valid = results.iter().filter(|o| o.is_valid()).count();

    let listed = results
        .iter()
        .enumerate()
        .filter(|(_, o)| !config.skip_invalid || o.is_valid());

    match format {
        OutputFormat::Json => {
            let out = JsonBatch {
                policy: policy.name(),
                frames: listed
                    .map(|(i, o)| JsonFrame {
                        frame: i + 1,
                        result: JsonOverlap::from(o),
                    })
                    .collect(),
                total: results.len(),
                valid,
                mean_overlap: mean,
            };
            println!("{}", serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?);
        }
        OutputFormat::Text => {
            println!("{:<7} {:<10} {:<10} {:<10}", "frame", "overlap", "only1", "only2");
            for (i, o) in listed {
                if o.is_valid() {
                    println!(
                        "{:<7} {:<10} {:<10} {:<10}",
                        i + 1,
                        format_ratio(o.overlap),
                        format_ratio(o.only1),
                        format_ratio(o.only2)
                    );
                } else {
                    println!("{:<7} invalid", i + 1);
                }
            }
            match mean {
                Some(m) => println!(
                    "mean overlap: {} ({} valid of {} frames, {})",
                    format_ratio(m),
                    valid,
                    results.len(),
                    policy.name()
                ),
                None => println!("mean overlap: n/a (no valid frames of {})", results.len()),
            }
        }
    }
    Ok(())
}

fn print_overlap_usage() {
    eprintln!("Usage: vot-region overlap <regionA> <regionB> [options]");
    eprintln!();
    eprintln!("Regions: x,y,w,h | x1,y1,x2,y2,...,xn,yn (n >= 4) | special code");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -b, --bounds <w,h|l,t,r,b>   Restrict to a window");
    eprintln!("  --legacy                     Use legacy rasterization");
    eprintln!("  --json                       Output as JSON");
}

fn print_batch_usage() {
    eprintln!("Usage: vot-region batch <trajA.txt> <trajB.txt> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -b, --bounds <w,h|l,t,r,b>   Restrict to a window");
    eprintln!("  -c, --config <file.yaml>     Evaluation config (flags override it)");
    eprintln!("  --legacy                     Use legacy rasterization");
    eprintln!("  --json                       Output as JSON");
}
