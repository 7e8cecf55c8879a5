//! Session configuration.
//!
//! Settings come from an optional TOML file; the command line overrides
//! individual fields on top of it.
//!
//! ```toml
//! save_extension = "png"
//! edge_detector = "classic"
//! preview_path = "/tmp/preview.png"
//! scatter_seed = 42
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::{EditorError, Result};
use crate::filters::EdgeDetector;

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Extension appended to the name entered at the save prompt.
    pub save_extension: String,
    /// Detector run by the edge command.
    #[serde(deserialize_with = "deserialize_edge_detector")]
    pub edge_detector: EdgeDetector,
    /// Where to write the current image after every change, if anywhere.
    pub preview_path: Option<PathBuf>,
    /// Fixed seed for scatter; random when unset.
    pub scatter_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_extension: "jpg".to_string(),
            edge_detector: EdgeDetector::Better,
            preview_path: None,
            scatter_seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SessionConfig =
            toml::from_str(text).map_err(|e| EditorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| EditorError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Output file name for a name typed at the save prompt.
    pub fn save_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{name}.{}", self.save_extension))
    }

    /// Check field values that the TOML types alone can't rule out.
    pub fn validate(&self) -> Result<()> {
        let ext = &self.save_extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(EditorError::Config(format!(
                "save_extension must be a bare extension like \"png\", got {ext:?}"
            )));
        }
        Ok(())
    }
}

fn deserialize_edge_detector<'de, D>(deserializer: D) -> std::result::Result<EdgeDetector, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}
