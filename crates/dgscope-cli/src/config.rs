//! Optional `dgs.toml` settings.
//!
//! ```toml
//! [output]
//! width = 12
//! header = true
//! id_mode = "numeric"
//! properties = ["in-degree", "out-degree"]
//! ```
//!
//! Every field has a default; command-line flags override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dgscope_core::{TableOptions, VertexIdMode, VertexProp};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dgs.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_true")]
    pub header: bool,
    #[serde(default)]
    pub id_mode: VertexIdMode,
    /// Columns of the vertex table, in order.
    #[serde(default = "default_properties")]
    pub properties: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            header: default_true(),
            id_mode: VertexIdMode::default(),
            properties: default_properties(),
        }
    }
}

impl OutputConfig {
    #[must_use]
    pub const fn table_options(&self) -> TableOptions {
        TableOptions {
            id_mode: self.id_mode,
            width: self.width,
            header: self.header,
        }
    }
}

const fn default_width() -> usize {
    15
}

const fn default_true() -> bool {
    true
}

fn default_properties() -> Vec<String> {
    VertexProp::ALL
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

/// Load `explicit` if given, else `dgs.toml` from the working directory if
/// present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<CliConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                return Ok(CliConfig::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = toml::from_str::<CliConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: CliConfig = toml::from_str("").expect("valid toml");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.output.width, 15);
        assert!(config.output.header);
        assert_eq!(config.output.properties.len(), VertexProp::ALL.len());
    }

    #[test]
    fn partial_output_section() {
        let config: CliConfig =
            toml::from_str("[output]\nid_mode = \"none\"\nwidth = 9\n").expect("valid toml");
        assert_eq!(config.output.id_mode, VertexIdMode::None);
        assert_eq!(config.output.width, 9);
        assert!(config.output.header);
        let opts = config.output.table_options();
        assert_eq!(opts.width, 9);
    }

    #[test]
    fn unknown_id_mode_is_rejected() {
        let result = toml::from_str::<CliConfig>("[output]\nid_mode = \"label\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\nproperties = [\"in-degree\"]\n").expect("write");
        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.output.properties, ["in-degree"]);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/dgs.toml"))).expect_err("missing");
        assert!(err.to_string().contains("/no/such/dgs.toml"));
    }
}
