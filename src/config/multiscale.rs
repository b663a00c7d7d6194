use crate::octave::OctaveOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `multiscale_demo` tool.
#[derive(Debug, Deserialize)]
pub struct MultiscaleToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub finder: OctaveOptions,
    pub output: MultiscaleOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct MultiscaleOutputConfig {
    #[serde(rename = "blobs_json")]
    pub blobs_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<MultiscaleToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<MultiscaleToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
