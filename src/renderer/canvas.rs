//! Canvas 2D painter
//!
//! Procedural neon look: vignette, scrolling grid, glowing gradient orbs.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::snapshot::{
    GRID_SPACING, PLAYER_COLOR_A, PLAYER_COLOR_B, PLAYER_CORE_RADIUS, RenderSnapshot,
};

/// Device pixel ratio cap (keeps fill cost sane on very dense screens)
const MAX_DPR: f64 = 2.0;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, device_pixel_ratio: f64) -> Self {
        Self {
            canvas,
            ctx,
            dpr: device_pixel_ratio.clamp(1.0, MAX_DPR),
        }
    }

    /// Match the backing store to a logical size and scale drawing to it
    pub fn resize(&self, width: f32, height: f32) -> Result<(), JsValue> {
        self.canvas.set_width((width as f64 * self.dpr) as u32);
        self.canvas.set_height((height as f64 * self.dpr) as u32);
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
    }

    pub fn draw(&self, frame: &RenderSnapshot) -> Result<(), JsValue> {
        self.draw_background(frame)?;
        self.draw_enemies(frame)?;
        self.draw_player(frame)
    }

    fn draw_background(&self, frame: &RenderSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (frame.width as f64, frame.height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);

        // Vignette
        let vignette = ctx.create_radial_gradient(w * 0.5, h * 0.45, 0.0, w * 0.5, h * 0.45, w.max(h))?;
        vignette.add_color_stop(0.0, "rgba(0,0,0,0)")?;
        vignette.add_color_stop(1.0, "rgba(0,0,0,0.35)")?;
        ctx.set_fill_style_canvas_gradient(&vignette);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Subtle grid
        ctx.save();
        ctx.set_global_alpha(0.07);
        ctx.set_stroke_style_str("#7dffef");
        ctx.set_line_width(1.0);
        let spacing = GRID_SPACING as f64;
        let mut x = frame.grid_offset.x as f64;
        while x < w {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, h);
            ctx.stroke();
            x += spacing;
        }
        let mut y = frame.grid_offset.y as f64;
        while y < h {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(w, y);
            ctx.stroke();
            y += spacing;
        }
        ctx.restore();
        Ok(())
    }

    fn draw_enemies(&self, frame: &RenderSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for e in &frame.enemies {
            let (x, y, r) = (e.pos.x as f64, e.pos.y as f64, e.radius as f64);
            ctx.save();
            ctx.set_shadow_blur(16.0);
            ctx.set_shadow_color(&format!("hsla({}, 100%, 60%, 0.9)", e.hue));
            let g = ctx.create_radial_gradient(x, y, 0.0, x, y, r)?;
            g.add_color_stop(0.0, &format!("hsla({}, 100%, 65%, 0.95)", e.hue))?;
            g.add_color_stop(1.0, &format!("hsla({}, 100%, 55%, 0.25)", e.hue))?;
            ctx.set_fill_style_canvas_gradient(&g);
            ctx.begin_path();
            ctx.arc(x, y, r, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
            ctx.restore();
        }
        Ok(())
    }

    fn draw_player(&self, frame: &RenderSnapshot) -> Result<(), JsValue> {
        let Some(player) = &frame.player else {
            return Ok(());
        };
        let ctx = &self.ctx;
        let (x, y, r) = (player.pos.x as f64, player.pos.y as f64, player.radius as f64);

        ctx.save();
        ctx.set_shadow_blur(player.glow as f64);
        ctx.set_shadow_color(PLAYER_COLOR_A);
        let body = ctx.create_linear_gradient(x - r, y - r, x + r, y + r);
        body.add_color_stop(0.0, PLAYER_COLOR_A)?;
        body.add_color_stop(1.0, PLAYER_COLOR_B)?;
        ctx.set_fill_style_canvas_gradient(&body);
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, std::f64::consts::TAU)?;
        ctx.fill();

        // Inner core
        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str("rgba(255,255,255,0.85)");
        ctx.begin_path();
        ctx.arc(x, y, PLAYER_CORE_RADIUS as f64, 0.0, std::f64::consts::TAU)?;
        ctx.fill();
        ctx.restore();
        Ok(())
    }
}
