//! Pixelgallery Engine - pixel canvas and sprite preview in WASM
//!
//! Architecture:
//! - core/        - Geometry and randomness
//! - domain/      - State graph documents and settings
//! - systems/     - Drag quantizer and animation state machine
//! - simulation/  - Headless views and the wasm-bindgen facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Pixelgallery WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Seed for `SpritePreview` taken from the browser's Math.random()
#[wasm_bindgen]
pub fn random_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

// Re-export main types
pub use crate::core::geometry::{Direction, GridPoint, PixelRect};
pub use crate::core::random::{RandomSource, SeededRandom, SequenceRandom};
pub use crate::domain::settings::{CanvasSettings, SettingsError, SpriteSettings};
pub use crate::domain::sprite_graph::{GraphError, State, StateGraph, StateId};
pub use crate::simulation::{PixelCanvas, PixelCanvasCore, SpritePreview, SpritePreviewCore};
pub use crate::systems::{AnimationStateMachine, DirectionQuantizer, TickOutcome};
