//! Views - headless cores for the two browser widgets
//!
//! - canvas/  - drag-quantized cursor painting into a pixel buffer
//! - sprite/  - state-graph sprite playback
//! - render/  - pixel buffer and sprite sheet geometry
//!
//! DOM work stays in JS; `facade` is the wasm-bindgen surface.

#[path = "render/raster.rs"]
mod raster;
#[path = "render/sprite_sheet.rs"]
mod sprite_sheet;
#[path = "canvas/canvas.rs"]
mod canvas;
#[path = "sprite/sprite.rs"]
mod sprite;
mod facade;

pub use canvas::{DragStep, PixelCanvasCore};
pub use facade::{PixelCanvas, SpritePreview};
pub use raster::PixelBuffer;
pub use sprite::SpritePreviewCore;
pub use sprite_sheet::SpriteSheet;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
