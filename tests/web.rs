#![cfg(target_arch = "wasm32")]

use pixelgallery_engine::{PixelCanvas, SpritePreview};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn sprite_preview_rejects_malformed_graph() {
    let err = SpritePreview::new(r#"{"1": {"s": [0], "next": [2]}}"#.to_string(), None, 1);
    assert!(err.is_err());
}

#[wasm_bindgen_test]
fn canvas_exposes_pixel_buffer() {
    let mut canvas = PixelCanvas::new();
    canvas.start_draw();
    assert_eq!(canvas.pixels_len_bytes(), 32 * 32 * 4);
    assert!(!canvas.pixels_ptr().is_null());
}

#[wasm_bindgen_test]
fn gamekitty_preview_from_random_seed() {
    let mut preview = SpritePreview::gamekitty(pixelgallery_engine::random_seed()).unwrap();
    assert!(preview.update(16.0));
}
