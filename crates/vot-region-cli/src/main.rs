//! vot-region - CLI for tracking region overlap
//!
//! Usage:
//!   vot-region overlap <A> <B>           Overlap between two regions
//!   vot-region batch <a.txt> <b.txt>     Overlap per frame of two trajectories
//!   vot-region mask <region> -W w -H h   Rasterize a region
//!   vot-region convert <region> -t kind  Convert a region
//!   vot-region check <traj.txt>          Validate a trajectory file
//!   vot-region benchmark                 Time random batch overlap
//!   vot-region config --example          Print an example config

use std::env;

mod cli;

use cli::{cmd_batch, cmd_benchmark, cmd_check, cmd_config, cmd_convert, cmd_mask, cmd_overlap};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("vot-region");

    if args.len() < 2 {
        print_usage(prog);
        std::process::exit(1);
    }

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "overlap" => cmd_overlap(rest),
        "batch" => cmd_batch(rest),
        "mask" => cmd_mask(rest),
        "convert" => cmd_convert(rest),
        "check" => cmd_check(rest),
        "benchmark" => cmd_benchmark(rest),
        "config" => cmd_config(rest),
        "help" | "--help" | "-h" => {
            print_usage(prog);
            Ok(())
        }
        other => {
            print_usage(prog);
            Err(format!("Unknown command: {}", other))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("vot-region - region overlap for visual object tracking");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} overlap <regionA> <regionB> [-b bounds] [--legacy] [--json]", prog);
    eprintln!("  {} batch <trajA.txt> <trajB.txt> [-b bounds] [-c config.yaml] [--legacy] [--json]", prog);
    eprintln!("  {} mask <region> -W <w> -H <h> [-o out.png] [--legacy]", prog);
    eprintln!("  {} convert <region> -t <rectangle|polygon>", prog);
    eprintln!("  {} check <traj.txt> [--strict]", prog);
    eprintln!("  {} benchmark [-n pairs] [--seed s]", prog);
    eprintln!("  {} config <config.yaml> | --example", prog);
    eprintln!();
    eprintln!("Regions:");
    eprintln!("  x,y,w,h                 Rectangle");
    eprintln!("  x1,y1,...,xn,yn         Polygon (at least 4 points)");
    eprintln!("  n                       Special code (e.g. 0 for failure)");
    eprintln!();
    eprintln!("Bounds:");
    eprintln!("  w,h                     Window (0, 0, w, h)");
    eprintln!("  l,t,r,b                 Window (left, top, right, bottom)");
    eprintln!();
    eprintln!("Logging:");
    eprintln!("  RUST_LOG=debug {} ...   Show canvas sizes and skipped lines", prog);
}
