//! Mask command: rasterize one region.

use image::{GrayImage, Luma};

use vot_region::{Mask, RasterPolicy};

use super::common::{flag_value, parse_region_arg, parse_size};

/// Execute the mask command.
pub fn cmd_mask(args: &[String]) -> Result<(), String> {
    let mut region_arg: Option<&str> = None;
    let mut width: Option<usize> = None;
    let mut height: Option<usize> = None;
    let mut output: Option<&str> = None;
    let mut policy = RasterPolicy::Corrected;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-W" | "--width" => {
                width = Some(parse_size("--width", flag_value(args, i, "--width")?)?);
                i += 1;
            }
            "-H" | "--height" => {
                height = Some(parse_size("--height", flag_value(args, i, "--height")?)?);
                i += 1;
            }
            "-o" | "--output" => {
                output = Some(flag_value(args, i, "--output")?);
                i += 1;
            }
            "--legacy" => policy = RasterPolicy::Legacy,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with("--") => return Err(format!("Unknown option: {}", other)),
            other => {
                if region_arg.is_some() {
                    return Err(format!("Unexpected argument: {}", other));
                }
                region_arg = Some(other);
            }
        }
        i += 1;
    }

    let (Some(region_arg), Some(width), Some(height)) = (region_arg, width, height) else {
        print_usage();
        return Err("mask needs a region, --width and --height".to_string());
    };
    let region = parse_region_arg(region_arg)?;
    let mask = region.mask(width, height, policy).map_err(|e| e.to_string())?;
    eprintln!(
        "{} region: {} of {} pixels set ({})",
        region.kind(),
        mask.count(),
        mask.data().len(),
        policy.name()
    );

    match output {
        Some(path) => {
            mask_to_image(&mask)?
                .save(path)
                .map_err(|e| format!("Failed to write {}: {}", path, e))?;
            eprintln!("Wrote: {}", path);
        }
        None => print!("{}", mask_to_ascii(&mask)),
    }
    Ok(())
}

/// 8-bit grayscale image, covered pixels white.
pub fn mask_to_image(mask: &Mask) -> Result<GrayImage, String> {
    let width = u32::try_from(mask.width()).map_err(|_| "Mask too wide".to_string())?;
    let height = u32::try_from(mask.height()).map_err(|_| "Mask too tall".to_string())?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        if mask.get(x as usize, y as usize) {
            Luma([255])
        } else {
            Luma([0])
        }
    }))
}

/// One text row per mask row, `#` for covered pixels.
pub fn mask_to_ascii(mask: &Mask) -> String {
    let mut out = String::with_capacity((mask.width() + 1) * mask.height());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            out.push(if mask.get(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

fn print_usage() {
    eprintln!("Usage: vot-region mask <region> -W <width> -H <height> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -W, --width <n>        Mask width in pixels (required)");
    eprintln!("  -H, --height <n>       Mask height in pixels (required)");
    eprintln!("  -o, --output <file>    Write a grayscale PNG (default: text to stdout)");
    eprintln!("  --legacy               Use legacy rasterization");
}
