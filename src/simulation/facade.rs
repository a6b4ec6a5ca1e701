use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::core::random::SeededRandom;
use crate::domain::settings::SpriteSettings;
use crate::domain::sprite_graph::StateGraph;

use super::canvas::PixelCanvasCore;
use super::sprite::SpritePreviewCore;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct PixelCanvas {
    core: PixelCanvasCore,
}

#[wasm_bindgen]
impl PixelCanvas {
    /// 32x32 canvas at zoom 4, cursor in the middle
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: PixelCanvasCore::new(),
        }
    }

    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: String) -> Result<PixelCanvas, JsValue> {
        let core = PixelCanvasCore::from_settings_json(&json).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> u32 { self.core.zoom() }

    #[wasm_bindgen(getter)]
    pub fn cursor_x(&self) -> i32 { self.core.cursor().x }

    #[wasm_bindgen(getter)]
    pub fn cursor_y(&self) -> i32 { self.core.cursor().y }

    #[wasm_bindgen(getter)]
    pub fn drawing(&self) -> bool { self.core.is_drawing() }

    /// Pen button pressed
    pub fn start_draw(&mut self) {
        self.core.start_draw();
    }

    /// Pen button released
    pub fn end_draw(&mut self) {
        self.core.end_draw();
    }

    /// mousedown / touchstart
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.core.begin_drag(x, y);
    }

    /// mousemove / touchmove. Returns true when the cursor moved.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.core.drag_to(x, y).is_some()
    }

    /// mouseup / touchend
    pub fn end_drag(&mut self) {
        self.core.end_drag();
    }

    /// Absolute placement: cursor goes to the cell under the zoomed pointer.
    pub fn point_at(&mut self, x: f64, y: f64) {
        self.core.point_at(x, y);
    }

    /// Color as 0xAABBGGRR
    pub fn set_pen_color(&mut self, color: u32) {
        self.core.set_pen_color(color);
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Get pointer to pixel array (for JS ImageData)
    pub fn pixels_ptr(&self) -> *const u32 {
        self.core.raster().pixels_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.core.raster().len()
    }

    pub fn pixels_len_bytes(&self) -> usize {
        self.core.raster().len_bytes()
    }

    #[wasm_bindgen(getter)]
    pub fn highlight_x(&self) -> i32 { self.core.highlight_rect().x }

    #[wasm_bindgen(getter)]
    pub fn highlight_y(&self) -> i32 { self.core.highlight_rect().y }

    #[wasm_bindgen(getter)]
    pub fn highlight_size(&self) -> u32 { self.core.highlight_rect().w }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelCanvas {
    pub fn core(&self) -> &PixelCanvasCore {
        &self.core
    }
}

#[wasm_bindgen]
pub struct SpritePreview {
    core: SpritePreviewCore,
}

#[wasm_bindgen]
impl SpritePreview {
    /// Preview driven by a state graph document and optional settings JSON
    #[wasm_bindgen(constructor)]
    pub fn new(graph_json: String, settings_json: Option<String>, seed: u32) -> Result<SpritePreview, JsValue> {
        let graph = StateGraph::from_json(&graph_json).map_err(js_err)?;
        let settings = match settings_json {
            Some(json) => SpriteSettings::from_json(&json).map_err(js_err)?,
            None => SpriteSettings::default(),
        };
        Self::build(graph, settings, seed).map_err(js_err)
    }

    /// Preview of the built-in cat
    pub fn gamekitty(seed: u32) -> Result<SpritePreview, JsValue> {
        let graph = StateGraph::gamekitty().map_err(js_err)?;
        Self::build(graph, SpriteSettings::default(), seed).map_err(js_err)
    }

    /// Advance one tick. Elapsed time is not used: the caller sets the cadence.
    /// Returns true when a different frame should be drawn.
    pub fn update(&mut self, _time_diff: f64) -> bool {
        self.core.update().changed_frame()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn current_frame(&self) -> u32 { self.core.current_frame() }

    #[wasm_bindgen(getter)]
    pub fn current_state(&self) -> u32 { self.core.current_state() }

    #[wasm_bindgen(getter)]
    pub fn flip_x(&self) -> bool { self.core.flip_x() }

    #[wasm_bindgen(getter)]
    pub fn source_x(&self) -> i32 { self.core.source_rect().x }

    #[wasm_bindgen(getter)]
    pub fn source_y(&self) -> i32 { self.core.source_rect().y }

    #[wasm_bindgen(getter)]
    pub fn cell_size(&self) -> u32 { self.core.sheet().cell_size() }

    #[wasm_bindgen(getter)]
    pub fn dest_x(&self) -> i32 { self.core.dest_rect().x }

    #[wasm_bindgen(getter)]
    pub fn dest_y(&self) -> i32 { self.core.dest_rect().y }
}

impl SpritePreview {
    pub fn build(
        graph: StateGraph,
        settings: SpriteSettings,
        seed: u32,
    ) -> Result<Self, crate::domain::settings::SettingsError> {
        let rng = Box::new(SeededRandom::new(seed as u64));
        let core = SpritePreviewCore::new(Arc::new(graph), settings, rng)?;
        Ok(Self { core })
    }

    pub fn core(&self) -> &SpritePreviewCore {
        &self.core
    }
}
