//! Evaluation config for batch runs.
//!
//! A small YAML file fixing the settings a benchmark run should share:
//! rasterization policy, bounding window, output format and how invalid
//! frames are reported. Command-line flags override every field.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vot_region::host::{parse_bounds, parse_policy};
use vot_region::{Bounds, RasterPolicy};

use super::common::OutputFormat;

/// Settings for `batch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Rasterization policy ("legacy" or "corrected")
    #[serde(default = "default_policy")]
    pub policy: String,

    /// Window as `[w, h]` or `[left, top, right, bottom]`, empty for none
    #[serde(default)]
    pub bounds: Vec<f64>,

    /// Output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Leave invalid frames out of the per-frame listing
    #[serde(default)]
    pub skip_invalid: bool,
}

fn default_policy() -> String {
    RasterPolicy::default().name().to_string()
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            bounds: Vec::new(),
            output: OutputFormat::default(),
            skip_invalid: false,
        }
    }
}

impl EvalConfig {
    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let config: EvalConfig = serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse config YAML: {}", e))?;
        config.window()?;
        Ok(config)
    }

    pub fn raster_policy(&self) -> RasterPolicy {
        parse_policy(Some(self.policy.as_str()))
    }

    pub fn window(&self) -> Result<Option<Bounds>, String> {
        parse_bounds(&self.bounds).map_err(|e| format!("Invalid config bounds: {}", e))
    }
}

/// Execute the config command.
pub fn cmd_config(args: &[String]) -> Result<(), String> {
    let mut path: Option<&str> = None;
    for arg in args {
        match arg.as_str() {
            "--example" => {
                print_example();
                return Ok(());
            }
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
        return Err("No config file specified".to_string());
    };

    let config = EvalConfig::load(path)?;
    let yaml = serde_yaml::to_string(&config).map_err(|e| e.to_string())?;
    eprintln!("Config OK: {}", path);
    eprintln!("Effective policy: {}", config.raster_policy().name());
    print!("{}", yaml);
    Ok(())
}

fn print_usage() {
    eprintln!("vot-region config - Validate an evaluation config");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    vot-region config <config.yaml>");
    eprintln!("    vot-region config --example");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    --example              Print an example config YAML");
    eprintln!("    -h, --help             Show this help");
}

pub const EXAMPLE_CONFIG: &str = r##"# Example vot-region evaluation config
# Used by: vot-region batch <a.txt> <b.txt> -c eval.yaml

# "legacy" reproduces historical results, anything else is corrected
policy: corrected

# Restrict overlap to the image: [width, height] or [left, top, right, bottom]
bounds: [640, 480]

# text or json
output: text

# Omit frames with special regions from the per-frame listing
skip_invalid: false
"##;

fn print_example() {
    print!("{}", EXAMPLE_CONFIG);
}
