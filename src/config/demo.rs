use super::pipeline::PipelineConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `gabor_demo` binary.
#[derive(Clone, Debug, Deserialize)]
pub struct DemoConfig {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Labelled image folders: every subdirectory of `root` is one class, its
/// name becoming the class name. Labels are assigned `1..` in sorted order.
#[derive(Clone, Debug, Deserialize)]
pub struct DatasetConfig {
    pub root: PathBuf,
    /// Optional extension filter such as `"png"`.
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DemoConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: DemoConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
