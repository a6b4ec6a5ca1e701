use crate::core::geometry::{Direction, GridPoint, PixelRect};
use crate::domain::settings::{CanvasSettings, SettingsError};
use crate::systems::quantizer::DirectionQuantizer;

use super::raster::PixelBuffer;

/// Result of a drag update that moved the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragStep {
    pub direction: Direction,
    pub cursor: GridPoint,
    /// Cell painted by this step (only while drawing, and only if it changed).
    pub painted: Option<GridPoint>,
}

/// Headless drawing canvas: a quantized cursor over a pixel buffer.
pub struct PixelCanvasCore {
    settings: CanvasSettings,
    quantizer: DirectionQuantizer,
    raster: PixelBuffer,
    drawing: bool,
    pen_color: u32,
}

impl PixelCanvasCore {
    pub fn new() -> Self {
        Self::from_settings(CanvasSettings::default())
    }

    pub fn with_settings(settings: CanvasSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::from_settings(settings))
    }

    pub fn from_settings_json(json: &str) -> Result<Self, SettingsError> {
        Ok(Self::from_settings(CanvasSettings::from_json(json)?))
    }

    fn from_settings(settings: CanvasSettings) -> Self {
        let start = GridPoint::new(settings.start_x, settings.start_y);
        Self {
            quantizer: DirectionQuantizer::new(start, settings.move_radius_sqr()),
            raster: PixelBuffer::new(settings.width, settings.height),
            drawing: false,
            pen_color: settings.pen_color,
            settings,
        }
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn width(&self) -> u32 { self.raster.width() }

    pub fn height(&self) -> u32 { self.raster.height() }

    pub fn zoom(&self) -> u32 { self.settings.zoom }

    pub fn cursor(&self) -> GridPoint {
        self.quantizer.cursor()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_dragging(&self) -> bool {
        self.quantizer.is_dragging()
    }

    pub fn pen_color(&self) -> u32 {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: u32) {
        self.pen_color = color;
    }

    pub fn raster(&self) -> &PixelBuffer {
        &self.raster
    }

    /// Pen down: paints the cell under the cursor right away.
    pub fn start_draw(&mut self) -> bool {
        self.drawing = true;
        self.paint_cursor()
    }

    pub fn end_draw(&mut self) {
        self.drawing = false;
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.quantizer.begin_drag(x, y);
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<DragStep> {
        let direction = self.quantizer.report_drag_position(x, y)?;
        if self.settings.clamp_cursor {
            let clamped = self.cursor().clamped(self.width(), self.height());
            self.quantizer.set_cursor(clamped);
        }
        log::trace!(
            "cursor step {} -> ({}, {})",
            direction.name(),
            self.cursor().x,
            self.cursor().y
        );

        let painted = if self.drawing && self.paint_cursor() {
            Some(self.cursor())
        } else {
            None
        };

        Some(DragStep {
            direction,
            cursor: self.cursor(),
            painted,
        })
    }

    pub fn end_drag(&mut self) {
        self.quantizer.end_drag();
    }

    /// Put the cursor directly under a zoomed pointer position.
    /// Non-finite coordinates leave the cursor where it is.
    pub fn point_at(&mut self, x: f64, y: f64) -> GridPoint {
        if !x.is_finite() || !y.is_finite() {
            return self.cursor();
        }
        let zoom = self.settings.zoom as f64;
        let mut cell = GridPoint::new((x / zoom).floor() as i32, (y / zoom).floor() as i32);
        if self.settings.clamp_cursor {
            cell = cell.clamped(self.width(), self.height());
        }
        self.quantizer.set_cursor(cell);
        if self.drawing {
            self.paint_cursor();
        }
        cell
    }

    /// Rectangle the renderer outlines around the cursor, in zoomed pixels.
    pub fn highlight_rect(&self) -> PixelRect {
        let zoom = self.settings.zoom;
        let cursor = self.cursor();
        let scale = i32::try_from(zoom).unwrap_or(i32::MAX);
        PixelRect {
            x: cursor.x.saturating_mul(scale),
            y: cursor.y.saturating_mul(scale),
            w: zoom,
            h: zoom,
        }
    }

    pub fn clear(&mut self) {
        self.raster.clear();
    }

    fn paint_cursor(&mut self) -> bool {
        let cursor = self.cursor();
        self.raster.paint(cursor.x, cursor.y, self.pen_color)
    }
}

impl Default for PixelCanvasCore {
    fn default() -> Self {
        Self::new()
    }
}
