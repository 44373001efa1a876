//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for measurement, scrolling and hit-test indexing.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "line_scroll_px": 24, "spatial_index": { "max_items": 16 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Advance of one monospace cell at the base font size.
    pub char_width: i32,

    /// Line height at the base font size.
    pub line_height: i32,

    /// Font size that `char_width` and `line_height` were measured at.
    pub base_font_size: i32,

    /// Pixels scrolled per wheel line.
    pub line_scroll_px: i32,

    /// Skip records outside the viewport when building the hit-test index.
    pub cull_offscreen: bool,

    pub spatial_index: SpatialIndexConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            char_width: 8,
            line_height: 18,
            base_font_size: 14,
            line_scroll_px: 40,
            cull_offscreen: true,
            spatial_index: SpatialIndexConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialIndexConfig {
    /// Items a quadtree node holds before it splits.
    pub max_items: usize,
    /// Maximum subdivision depth.
    pub max_depth: usize,
}

impl Default for SpatialIndexConfig {
    fn default() -> Self {
        Self {
            max_items: 8,
            max_depth: 6,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.char_width <= 0 || self.line_height <= 0 || self.base_font_size <= 0 {
            return Err(ConfigError::Invalid(
                "char_width, line_height and base_font_size must be positive".into(),
            ));
        }
        if self.line_scroll_px < 0 {
            return Err(ConfigError::Invalid("line_scroll_px must not be negative".into()));
        }
        if self.spatial_index.max_items == 0 {
            return Err(ConfigError::Invalid("spatial_index.max_items must be at least 1".into()));
        }
        Ok(())
    }
}
