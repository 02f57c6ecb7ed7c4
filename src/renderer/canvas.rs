//! Canvas2D backend
//!
//! The only place that touches [`web_sys::CanvasRenderingContext2d`]. Takes a
//! draw list and produces pixels; never reaches back into the scene.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw::GlyphDraw;

/// Canvas plus its 2D context and current CSS size
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    css_size: (f64, f64),
    dpr: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let mut surface = Self {
            canvas,
            ctx,
            css_size: (0.0, 0.0),
            dpr: 1.0,
        };
        surface.fit();
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// CSS size of the canvas as of the last [`CanvasSurface::fit`]
    pub fn css_size(&self) -> (f32, f32) {
        (self.css_size.0 as f32, self.css_size.1 as f32)
    }

    /// Match the backing store to the element's CSS size and device pixel ratio
    pub fn fit(&mut self) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let w = f64::from(self.canvas.client_width());
        let h = f64::from(self.canvas.client_height());
        self.canvas.set_width((w * dpr) as u32);
        self.canvas.set_height((h * dpr) as u32);
        self.css_size = (w, h);
        self.dpr = dpr;
    }

    /// Clear and draw every glyph centred on its pose
    pub fn draw(&self, draws: &[GlyphDraw], ink: &str, family: &str) -> Result<(), JsValue> {
        let (w, h) = self.css_size;
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        self.ctx.set_fill_style_str(ink);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");

        let mut buf = [0u8; 4];
        for draw in draws {
            self.ctx.save();
            self.ctx
                .translate(f64::from(draw.position.x), f64::from(draw.position.y))?;
            self.ctx.rotate(f64::from(draw.angle))?;
            self.ctx.set_font(&draw.font(family));
            self.ctx.fill_text(draw.glyph.encode_utf8(&mut buf), 0.0, 0.0)?;
            self.ctx.restore();
        }

        Ok(())
    }

    /// Drop the backing store
    pub fn release(&self) {
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}
