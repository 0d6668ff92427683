//! Editor configuration supplied by the host.
//!
//! Every field has a default so the host may pass a partial JSON object (or
//! nothing at all).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::PX_PER_CM;
use crate::error::EditorError;

/// Canvas size, grid, handle and label styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in CSS pixels.
    pub width: f64,
    /// Canvas height in CSS pixels.
    pub height: f64,
    /// Draw a background grid.
    pub show_grid: bool,
    /// Distance between grid lines in canvas units.
    pub grid_spacing: f64,
    /// Radius of a vertex handle in canvas units.
    pub handle_radius: f64,
    /// Handle fill color.
    pub handle_fill: String,
    /// Handle outline color.
    pub handle_stroke: String,
    /// Label font size in canvas units.
    pub label_font_size: f64,
    /// Label font family.
    pub label_font_family: String,
    /// Label text color.
    pub label_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 20.0 * PX_PER_CM,
            height: 14.0 * PX_PER_CM,
            show_grid: false,
            grid_spacing: PX_PER_CM,
            handle_radius: 5.0,
            handle_fill: "#1E90FF".to_owned(),
            handle_stroke: "#FFFFFF".to_owned(),
            label_font_size: 14.0,
            label_font_family: "sans-serif".to_owned(),
            label_color: "#000000".to_owned(),
        }
    }
}

impl EditorConfig {
    /// Default config sized from physical centimetres and an editor zoom.
    ///
    /// The zoom scales pixels only; the grid keeps one line per centimetre.
    #[must_use]
    pub fn from_cm(width_cm: f64, height_cm: f64, zoom: f64) -> Self {
        Self {
            width: width_cm * PX_PER_CM * zoom,
            height: height_cm * PX_PER_CM * zoom,
            grid_spacing: PX_PER_CM * zoom,
            ..Self::default()
        }
    }

    /// Decode a config from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}
