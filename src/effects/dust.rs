//! Floating dust: 50 deterministic white motes with slow float and twinkle.
//!
//! Placement uses low-discrepancy seeds rather than the RNG, so the same mote
//! always lands in the same spot for a given viewport.

use log::debug;
use rand::rngs::SmallRng;

use super::{wrap_len, Effect, EffectKind};
use crate::error::FxResult;
use crate::paint::{ColorStop, Paint, Painter, Rect, Rgba};
use crate::surface::Viewport;
use crate::timer::Tick;

pub const MOTE_COUNT: usize = 50;

const GOLDEN_RATIO: f64 = 0.618033988749895;
const SQRT2_MINUS1: f64 = 0.41421356237;
const GR_RELATED: f64 = 0.30901699437;

const BACKGROUND: [ColorStop; 2] = [
    ColorStop::new(0.0, Rgba::opaque([15, 13, 26])),
    ColorStop::new(1.0, Rgba::opaque([16, 14, 50])),
];

fn frac(n: f64) -> f64 {
    n - n.floor()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mote {
    pub seed1: f64,
    pub seed2: f64,
    /// Resting position for the current viewport.
    pub base: (f64, f64),
    /// Diameter in CSS pixels.
    pub size: f64,
}

impl Mote {
    pub fn new(index: usize, viewport: &Viewport) -> Self {
        let i = index as f64;
        let seed1 = i * GOLDEN_RATIO;
        let seed2 = i * i * SQRT2_MINUS1;
        let seed3 = i * GR_RELATED;
        Self {
            seed1,
            seed2,
            base: (frac(seed1) * viewport.width, frac(seed2) * viewport.height),
            size: 1.0 + frac(seed3) * 2.0,
        }
    }

    /// Wrapped position `secs` seconds into the animation.
    pub fn position(&self, secs: f64, viewport: &Viewport) -> (f64, f64) {
        let float_x = (secs * 0.3 + self.seed1 * 10.0).sin() * 15.0;
        let rise_span = viewport.height * 0.3;
        let rise = if rise_span > 0.0 { (secs * 5.0) % rise_span } else { 0.0 };
        let float_y = (secs * 0.2 + self.seed2 * 10.0).cos() * 20.0 - rise;

        (
            wrap_len(self.base.0 + float_x, viewport.width),
            wrap_len(self.base.1 + float_y, viewport.height),
        )
    }

    pub fn opacity(&self, secs: f64) -> f64 {
        let twinkle = (secs * 2.0 + self.seed1 * 20.0).sin() * 0.5 + 0.5;
        0.15 + twinkle * 0.15
    }
}

#[derive(Debug, Default)]
pub struct DustField {
    viewport: Viewport,
    motes: Vec<Mote>,
}

impl DustField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }
}

impl Effect for DustField {
    fn kind(&self) -> EffectKind {
        EffectKind::Dust
    }

    fn reseed(&mut self, viewport: Viewport, _rng: &mut SmallRng) {
        self.viewport = viewport;
        self.motes = (0..MOTE_COUNT).map(|i| Mote::new(i, &viewport)).collect();
        debug!("dust: placed {} motes", self.motes.len());
    }

    // Motion is a pure function of elapsed time; nothing to integrate.
    fn step(&mut self, _tick: &Tick, _rng: &mut SmallRng) {}

    fn render(&self, painter: &mut dyn Painter, tick: &Tick) -> FxResult<()> {
        let Viewport { width, height, .. } = self.viewport;
        painter.clear(width, height)?;
        painter.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            &Paint::vertical(height, &BACKGROUND),
        )?;

        let secs = tick.elapsed_secs;
        for mote in &self.motes {
            let (x, y) = mote.position(secs, &self.viewport);
            let paint = Paint::Solid(Rgba::new(255, 255, 255, mote.opacity(secs)));
            painter.fill_circle(x, y, mote.size / 2.0, &paint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::CommandList;
    use rand::SeedableRng;

    #[test]
    fn placement_is_deterministic() {
        let vp = Viewport::new(1000.0, 800.0, 1.0);
        let mut a = DustField::new();
        let mut b = DustField::new();
        a.reseed(vp, &mut SmallRng::seed_from_u64(1));
        b.reseed(vp, &mut SmallRng::seed_from_u64(2));
        assert_eq!(a.motes(), b.motes());
        assert_eq!(a.motes()[0].base, (0.0, 0.0));
        assert_eq!(a.motes()[0].size, 1.0);
    }

    #[test]
    fn positions_wrap_into_viewport() {
        let vp = Viewport::new(1280.0, 720.0, 1.0);
        let mut field = DustField::new();
        field.reseed(vp, &mut SmallRng::seed_from_u64(0));
        for k in 0..600 {
            let secs = k as f64 * 0.7;
            for mote in field.motes() {
                let (x, y) = mote.position(secs, &vp);
                assert!((0.0..1280.0).contains(&x), "x={x} at {secs}s");
                assert!((0.0..720.0).contains(&y), "y={y} at {secs}s");
                let o = mote.opacity(secs);
                assert!((0.15..=0.3 + 1e-12).contains(&o));
            }
        }
    }

    #[test]
    fn zero_height_does_not_poison_positions() {
        let vp = Viewport::new(0.0, 0.0, 1.0);
        let mote = Mote::new(7, &vp);
        assert_eq!(mote.position(12.0, &vp), (0.0, 0.0));
    }

    #[test]
    fn draws_every_mote() {
        let vp = Viewport::new(640.0, 360.0, 1.0);
        let mut field = DustField::new();
        field.reseed(vp, &mut SmallRng::seed_from_u64(0));
        let mut list = CommandList::new();
        field
            .render(&mut list, &Tick { now_ms: 0.0, dt: 0.0, elapsed_secs: 3.0 })
            .unwrap();
        assert_eq!(list.circles().count(), MOTE_COUNT);
        for (_, _, r, _) in list.circles() {
            assert!((0.5..1.5).contains(&r));
        }
    }
}
