//! Configuration loading and parsing
//!
//! The merge can run entirely on defaults; a TOML file and command-line
//! flags layer on top, flags winning.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults mirror the simulation's output layout
pub const DEFAULT_PATTERN: &str = "out/*.root";
pub const DEFAULT_TREE: &str = "event";
pub const DEFAULT_OUTPUT: &str = "out/merge.csv";

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Glob pattern selecting the input files
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Tree name to read from each file
    #[serde(default = "default_tree")]
    pub tree: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// CSV file the merged table is written to
    #[serde(default = "default_output")]
    pub path: PathBuf,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_tree() -> String {
    DEFAULT_TREE.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            tree: default_tree(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Effective settings after layering config file and command-line flags
#[derive(Debug, Clone)]
pub struct MergeSettings {
    pub pattern: String,
    pub tree: String,
    pub output: PathBuf,
}

/// Resolve the effective settings for this invocation.
///
/// Precedence: command-line flag, then config file value, then default.
pub fn resolve_settings(args: &crate::Args) -> Result<MergeSettings> {
    let file = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            load_config(path)?
        }
        None => AppConfig::default(),
    };

    Ok(MergeSettings {
        pattern: args.input.clone().unwrap_or(file.input.pattern),
        tree: args.tree.clone().unwrap_or(file.input.tree),
        output: args.output.clone().unwrap_or(file.output.path),
    })
}
