//! Convert command.

use vot_region::RegionKind;

use super::common::{flag_value, parse_region_arg};

/// Execute the convert command.
pub fn cmd_convert(args: &[String]) -> Result<(), String> {
    let mut region_arg: Option<&str> = None;
    let mut target: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--to" => {
                target = Some(flag_value(args, i, "--to")?);
                i += 1;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with("--") => return Err(format!("Unknown option: {}", other)),
            other => region_arg = Some(other),
        }
        i += 1;
    }

    let (Some(region_arg), Some(target)) = (region_arg, target) else {
        print_usage();
        return Err("convert needs a region and --to".to_string());
    };

    let kind = RegionKind::from_name(target).ok_or_else(|| format!("Unknown region type: {}", target))?;
    let region = parse_region_arg(region_arg)?;
    let converted = region.try_convert(kind).map_err(|e| e.to_string())?;
    println!("{}", converted);
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: vot-region convert <region> -t <rectangle|polygon>");
    eprintln!();
    eprintln!("Polygons cannot be narrowed to rectangles and special codes never convert.");
}
