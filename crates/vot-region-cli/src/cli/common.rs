//! Common utilities shared across CLI commands.

use serde::{Deserialize, Serialize};

use vot_region::host::parse_bounds;
use vot_region::{Bounds, Overlap, Region};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// An overlap result in JSON output format. Invalid results carry no ratios.
#[derive(Debug, Serialize)]
pub struct JsonOverlap {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only2: Option<f64>,
}

impl From<&Overlap> for JsonOverlap {
    fn from(o: &Overlap) -> Self {
        if o.is_valid() {
            JsonOverlap {
                valid: true,
                overlap: Some(o.overlap),
                only1: Some(o.only1),
                only2: Some(o.only2),
            }
        } else {
            JsonOverlap {
                valid: false,
                overlap: None,
                only1: None,
                only2: None,
            }
        }
    }
}

/// Parse a region given on the command line (`x,y,w,h`, polygon or code).
pub fn parse_region_arg(text: &str) -> Result<Region, String> {
    text.parse::<Region>().map_err(|e| e.to_string())
}

/// Parse `w,h` or `left,top,right,bottom`.
pub fn parse_bounds_arg(text: &str) -> Result<Option<Bounds>, String> {
    let values = parse_number_list(text)?;
    parse_bounds(&values).map_err(|e| e.to_string())
}

/// Comma-separated numbers. An empty string is an empty list.
pub fn parse_number_list(text: &str) -> Result<Vec<f64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|t| {
            t.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid number: {:?}", t.trim()))
        })
        .collect()
}

/// Parse a positive pixel count.
pub fn parse_size(flag: &str, text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} expects a positive integer, got {:?}", flag, text)),
    }
}

/// Value following a flag, or an error naming the flag.
pub fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Format a ratio for text output.
pub fn format_ratio(value: f64) -> String {
    format!("{:.6}", value)
}
