//! Glyph rendering
//!
//! `draw` builds a per-frame command list from the scene (pure, testable
//! natively); `canvas` paints it with Canvas2D in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{GlyphDraw, glyph_draws};
