//! Benchmark command implementation.

use std::time::Instant;

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::StdRng;

use vot_region::{BatchBounds, Bounds, Point, RasterPolicy, Region, compute_overlaps, mean_overlap};

use super::common::flag_value;

/// Frame size the random regions are placed in.
const FRAME_WIDTH: f64 = 640.0;
const FRAME_HEIGHT: f64 = 480.0;

/// Random rectangle or quadrilateral inside the frame.
pub fn random_region(rng: &mut impl Rng) -> Region {
    let w = rng.random_range(8.0..160.0);
    let h = rng.random_range(8.0..160.0);
    let x = rng.random_range(-20.0..FRAME_WIDTH - w + 20.0);
    let y = rng.random_range(-20.0..FRAME_HEIGHT - h + 20.0);
    if rng.random_bool(0.5) {
        return Region::rectangle(x, y, w, h);
    }
    // Jittered corners of the same box, still convex for small jitter
    let jitter = w.min(h) * 0.2;
    let mut corner = |cx: f64, cy: f64| {
        Point::new(
            cx + rng.random_range(-jitter..jitter),
            cy + rng.random_range(-jitter..jitter),
        )
    };
    Region::from_points(vec![
        corner(x, y),
        corner(x + w, y),
        corner(x + w, y + h),
        corner(x, y + h),
    ])
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) -> Result<(), String> {
    let mut pairs = 10_000usize;
    let mut seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--pairs" => {
                let value = flag_value(args, i, "--pairs")?;
                pairs = value
                    .parse()
                    .map_err(|_| format!("Invalid pair count: {}", value))?;
                i += 1;
            }
            "--seed" => {
                let value = flag_value(args, i, "--seed")?;
                seed = Some(value.parse().map_err(|_| format!("Invalid seed: {}", value))?);
                i += 1;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let start_gen = Instant::now();
    let regions: Vec<_> = (0..pairs)
        .map(|_| (Some(random_region(&mut rng)), Some(random_region(&mut rng))))
        .collect();
    println!("Generated {} region pairs in {:?}", pairs, start_gen.elapsed());

    let window = BatchBounds::Shared(Bounds::from_size(FRAME_WIDTH, FRAME_HEIGHT));

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  OVERLAP BENCHMARK: {} PAIRS", pairs);
    println!("═══════════════════════════════════════════════");
    for &policy in RasterPolicy::all() {
        let start = Instant::now();
        let results = compute_overlaps(&regions, &window, policy);
        let elapsed = start.elapsed();
        let mean = mean_overlap(&results).unwrap_or(0.0);
        println!("  {:<10} {:>10.2}ms  mean overlap {:.4}", policy.name(), elapsed.as_secs_f64() * 1000.0, mean);
        if pairs > 0 {
            println!(
                "  {:<10} {:>10.3}us per pair",
                "",
                elapsed.as_secs_f64() * 1e6 / pairs as f64
            );
        }
    }
    println!("═══════════════════════════════════════════════");
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: vot-region benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --pairs <n>    Number of random region pairs (default: 10000)");
    eprintln!("  --seed <n>         RNG seed for a repeatable run");
    eprintln!();
    eprintln!("Times batch overlap under both rasterization policies.");
}
