//! Canvas 2D render sink

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::commands::{DrawCommand, RenderSink, Stroke, css_color};

/// Replays draw commands onto an HTML canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&css_color(stroke.color));
        self.ctx.set_line_width(stroke.weight as f64);
    }

    fn try_draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Background { color } => {
                ctx.set_fill_style_str(&css_color(*color));
                ctx.fill_rect(0.0, 0.0, self.width, self.height);
            }
            DrawCommand::Line { from, to, stroke } => {
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Arc {
                center,
                radius_x,
                radius_y,
                start,
                end,
                stroke,
            } => {
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    *radius_x as f64,
                    *radius_y as f64,
                    0.0,
                    *start as f64,
                    *end as f64,
                )?;
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                diameter,
                fill,
            } => {
                ctx.set_fill_style_str(&css_color(*fill));
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *diameter as f64 / 2.0,
                    0.0,
                    TAU,
                )?;
                ctx.fill();
            }
            DrawCommand::Text {
                position,
                text,
                size,
                fill,
            } => {
                ctx.set_fill_style_str(&css_color(*fill));
                ctx.set_font(&format!("{size}px sans-serif"));
                ctx.fill_text(text, position.x as f64, position.y as f64)?;
            }
        }
        Ok(())
    }
}

impl RenderSink for CanvasRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        if let Err(e) = self.try_draw(command) {
            log::warn!("Canvas draw failed: {:?}", e);
        }
    }
}
