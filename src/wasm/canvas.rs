use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::error::FxResult;
use crate::paint::{Blend, ColorStop, Paint, Painter, Rect};

/// Forwards painter calls to a 2-D canvas context.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn apply_fill(&self, paint: &Paint) -> FxResult<()> {
        match paint {
            Paint::Solid(color) => {
                self.ctx.set_fill_style_str(&color.to_string());
            }
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
                add_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial { center, radius, stops } => {
                let gradient = self.ctx.create_radial_gradient(
                    center.0,
                    center.1,
                    0.0,
                    center.0,
                    center.1,
                    radius.max(0.0),
                )?;
                add_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<(), JsValue> {
    for stop in stops {
        gradient.add_color_stop(stop.offset as f32, &stop.color.to_string())?;
    }
    Ok(())
}

impl Painter for CanvasPainter {
    fn set_blend(&mut self, blend: Blend) -> FxResult<()> {
        self.ctx
            .set_global_composite_operation(blend.composite_operation())?;
        Ok(())
    }

    fn clear(&mut self, width: f64, height: f64) -> FxResult<()> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> FxResult<()> {
        self.apply_fill(paint)?;
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
        Ok(())
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint) -> FxResult<()> {
        self.apply_fill(paint)?;
        self.ctx.begin_path();
        self.ctx
            .arc(cx, cy, radius.max(0.0), 0.0, std::f64::consts::TAU)?;
        self.ctx.fill();
        Ok(())
    }
}
