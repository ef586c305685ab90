//! Fit-to-container settings.

use serde::{Deserialize, Serialize};

/// Zoom applied relative to the exact fit scale, leaving a visual margin.
pub const DEFAULT_ZOOM_RATIO: f64 = 0.85;

/// Name carried by the shape that marks the logical drawable bounds.
pub const DEFAULT_WORKSPACE_TAG: &str = "clip";

/// Configuration for fitting a surface to its container.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Multiplier on the fit scale. Default: **0.85**.
    pub zoom_ratio: f64,

    /// Name of the workspace marker shape. Default: **`clip`**.
    pub workspace_tag: String,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            zoom_ratio: DEFAULT_ZOOM_RATIO,
            workspace_tag: DEFAULT_WORKSPACE_TAG.to_string(),
        }
    }
}

impl FitConfig {
    /// Parse from JSON, e.g. `{"zoom_ratio": 0.9}`.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or the ratio is not a
    /// positive finite number.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: FitConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid fit config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.zoom_ratio.is_finite() || self.zoom_ratio <= 0.0 {
            return Err(format!(
                "zoom_ratio must be a positive number, got {}",
                self.zoom_ratio
            ));
        }
        if self.workspace_tag.is_empty() {
            return Err("workspace_tag must not be empty".to_string());
        }
        Ok(())
    }
}
