//! Highlight configuration.
//!
//! Stored as YAML:
//!
//! ```yaml
//! emphasis:
//!   dimmed-node: 0.25
//!   highlighted-node: 1.0
//!   dimmed-edge: 0.15
//!   highlighted-edge: 0.85
//! label-scale: normal
//! ```
//!
//! Every key is optional and falls back to its default.

use crate::error::{Error, Result};
use crate::style::LabelScale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default emphasis of a node outside the highlight.
pub const DEFAULT_DIMMED_NODE: f64 = 0.25;

/// Default emphasis of a highlighted node.
pub const DEFAULT_HIGHLIGHTED_NODE: f64 = 1.0;

/// Default emphasis of an edge outside the highlight.
pub const DEFAULT_DIMMED_EDGE: f64 = 0.15;

/// Default emphasis of a highlighted edge.
pub const DEFAULT_HIGHLIGHTED_EDGE: f64 = 0.85;

/// Opacity values applied when projecting a highlight onto the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EmphasisPolicy {
    /// Opacity of nodes outside the highlight
    pub dimmed_node: f64,

    /// Opacity of highlighted nodes
    pub highlighted_node: f64,

    /// Opacity of edges outside the highlight
    pub dimmed_edge: f64,

    /// Opacity of highlighted edges
    pub highlighted_edge: f64,
}

impl Default for EmphasisPolicy {
    fn default() -> Self {
        Self {
            dimmed_node: DEFAULT_DIMMED_NODE,
            highlighted_node: DEFAULT_HIGHLIGHTED_NODE,
            dimmed_edge: DEFAULT_DIMMED_EDGE,
            highlighted_edge: DEFAULT_HIGHLIGHTED_EDGE,
        }
    }
}

impl EmphasisPolicy {
    fn validate(&self) -> Result<()> {
        let values = [
            ("dimmed-node", self.dimmed_node),
            ("highlighted-node", self.highlighted_node),
            ("dimmed-edge", self.dimmed_edge),
            ("highlighted-edge", self.highlighted_edge),
        ];
        for (key, value) in values {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "emphasis.{key} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Highlight configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HighlightConfig {
    /// Emphasis values
    pub emphasis: EmphasisPolicy,

    /// Label size preset
    pub label_scale: LabelScale,
}

impl HighlightConfig {
    /// Parse and validate a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the YAML is malformed or a value is out of range.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or `Error::Config` if
    /// its content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Write the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails, or `Error::Io` if the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_yaml_string()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that every emphasis value is a finite opacity in `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        self.emphasis.validate()
    }
}
