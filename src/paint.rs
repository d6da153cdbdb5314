//! Drawing primitives the effects paint with.
//!
//! Effects never touch a browser context directly; they describe each frame through
//! the [`Painter`] trait. The browser implementation forwards to a
//! `CanvasRenderingContext2d`, while [`CommandList`] records the calls.

use std::fmt;

use crate::error::FxResult;

/// An sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }
}

/// Formats as a CSS color, e.g. `rgba(16, 18, 40, 1)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Linear gradient along the line `from` → `to`.
    Linear {
        from: (f64, f64),
        to: (f64, f64),
        stops: Vec<ColorStop>,
    },
    /// Radial gradient from a point at `center` out to `radius`.
    Radial {
        center: (f64, f64),
        radius: f64,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Top-to-bottom gradient spanning `height`.
    pub fn vertical(height: f64, stops: &[ColorStop]) -> Self {
        Paint::Linear {
            from: (0.0, 0.0),
            to: (0.0, height),
            stops: stops.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// `source-over`
    #[default]
    Normal,
    /// `lighter`: overlapping glows accumulate.
    Additive,
}

impl Blend {
    pub fn composite_operation(self) -> &'static str {
        match self {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Sink for one frame's drawing. Coordinates are logical (CSS) pixels.
pub trait Painter {
    fn set_blend(&mut self, blend: Blend) -> FxResult<()>;
    fn clear(&mut self, width: f64, height: f64) -> FxResult<()>;
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> FxResult<()>;
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint) -> FxResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Blend(Blend),
    Clear { width: f64, height: f64 },
    Rect { rect: Rect, paint: Paint },
    Circle { cx: f64, cy: f64, radius: f64, paint: Paint },
}

/// A [`Painter`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub ops: Vec<PaintOp>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = (f64, f64, f64, &Paint)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Circle { cx, cy, radius, paint } => Some((*cx, *cy, *radius, paint)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (Rect, &Paint)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Rect { rect, paint } => Some((*rect, paint)),
            _ => None,
        })
    }

    pub fn blends(&self) -> Vec<Blend> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Blend(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}

impl Painter for CommandList {
    fn set_blend(&mut self, blend: Blend) -> FxResult<()> {
        self.ops.push(PaintOp::Blend(blend));
        Ok(())
    }

    fn clear(&mut self, width: f64, height: f64) -> FxResult<()> {
        self.ops.push(PaintOp::Clear { width, height });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> FxResult<()> {
        self.ops.push(PaintOp::Rect {
            rect,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint) -> FxResult<()> {
        self.ops.push(PaintOp::Circle {
            cx,
            cy,
            radius,
            paint: paint.clone(),
        });
        Ok(())
    }
}
