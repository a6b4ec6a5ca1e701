//! Tunables for the two views, loadable from JSON.
//!
//! Every field is optional in the document; missing fields take the values
//! the toy shipped with (32×32 canvas at zoom 4, 16px drag radius, 16-column
//! sheet of 8×8 cells).

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Opaque `rgb(200, 0, 0)`, packed as ABGR for `ImageData`.
pub const DEFAULT_PEN_COLOR: u32 = 0xFF00_00C8;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub zoom: u32,
    /// Drag distance (not squared) that must be exceeded before a step.
    pub move_radius: f64,
    pub start_x: i32,
    pub start_y: i32,
    pub clamp_cursor: bool,
    pub pen_color: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            zoom: 4,
            move_radius: 16.0,
            start_x: 16,
            start_y: 16,
            clamp_cursor: false,
            pen_color: DEFAULT_PEN_COLOR,
        }
    }
}

impl CanvasSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::Invalid {
                field: "width/height",
                reason: "canvas must be at least 1x1",
            });
        }
        if self.zoom == 0 {
            return Err(SettingsError::Invalid {
                field: "zoom",
                reason: "must be at least 1",
            });
        }
        if !self.move_radius.is_finite() || self.move_radius < 0.0 {
            return Err(SettingsError::Invalid {
                field: "moveRadius",
                reason: "must be a finite, non-negative distance",
            });
        }
        Ok(())
    }

    pub fn move_radius_sqr(&self) -> f64 {
        self.move_radius * self.move_radius
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteSettings {
    /// Ticks each frame stays on screen.
    pub frame_hold_ticks: u32,
    pub sheet_columns: u32,
    pub cell_size: u32,
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub canvas_width: u32,
}

impl Default for SpriteSettings {
    fn default() -> Self {
        Self {
            frame_hold_ticks: 1,
            sheet_columns: 16,
            cell_size: 8,
            anchor_x: 2,
            anchor_y: 10,
            canvas_width: 32,
        }
    }
}

impl SpriteSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.sheet_columns == 0 {
            return Err(SettingsError::Invalid {
                field: "sheetColumns",
                reason: "must be at least 1",
            });
        }
        if self.cell_size == 0 {
            return Err(SettingsError::Invalid {
                field: "cellSize",
                reason: "must be at least 1",
            });
        }
        if self.canvas_width == 0 {
            return Err(SettingsError::Invalid {
                field: "canvasWidth",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
