//! Twilight gradient field: a dusk sky with slow swaying glow lobes.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use super::{between, Effect, EffectKind};
use crate::error::FxResult;
use crate::paint::{Blend, ColorStop, Paint, Painter, Rect, Rgba};
use crate::surface::Viewport;
use crate::timer::Tick;

pub const LOBE_COUNT: usize = 7;

const PALETTE: [[u8; 3]; 4] = [
    [232, 128, 152], // rose
    [246, 178, 120], // amber
    [150, 110, 220], // violet
    [92, 170, 190],  // dusk teal
];

const SKY: [ColorStop; 3] = [
    ColorStop::new(0.0, Rgba::opaque([18, 16, 44])),
    ColorStop::new(0.55, Rgba::opaque([52, 36, 86])),
    ColorStop::new(1.0, Rgba::opaque([118, 70, 104])),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Lobe {
    /// Normalized anchor in `[0, 1)²`.
    pub anchor: (f64, f64),
    pub radius: f64,
    pub amplitude: f64,
    /// Radians per reference frame.
    pub speed: f64,
    pub phase: f64,
    pub color: [u8; 3],
    pub alpha: f64,
}

impl Lobe {
    pub fn seed(viewport: &Viewport, rng: &mut SmallRng) -> Self {
        let short_side = viewport.width.min(viewport.height);
        Self {
            anchor: (rng.gen(), rng.gen()),
            radius: short_side * between(rng, 0.35, 0.7),
            amplitude: between(rng, 30.0, 110.0),
            speed: between(rng, 0.002, 0.006),
            phase: rng.gen::<f64>() * TAU,
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
            alpha: between(rng, 0.08, 0.2),
        }
    }

    pub fn center(&self, viewport: &Viewport) -> (f64, f64) {
        (
            self.anchor.0 * viewport.width + self.phase.sin() * self.amplitude,
            self.anchor.1 * viewport.height + (self.phase * 0.8).cos() * self.amplitude,
        )
    }
}

#[derive(Debug, Default)]
pub struct TwilightField {
    viewport: Viewport,
    lobes: Vec<Lobe>,
}

impl TwilightField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lobes(&self) -> &[Lobe] {
        &self.lobes
    }
}

impl Effect for TwilightField {
    fn kind(&self) -> EffectKind {
        EffectKind::Twilight
    }

    fn reseed(&mut self, viewport: Viewport, rng: &mut SmallRng) {
        self.viewport = viewport;
        self.lobes = (0..LOBE_COUNT).map(|_| Lobe::seed(&viewport, rng)).collect();
        debug!("twilight: seeded {} lobes", self.lobes.len());
    }

    fn step(&mut self, tick: &Tick, _rng: &mut SmallRng) {
        for lobe in &mut self.lobes {
            lobe.phase = (lobe.phase + lobe.speed * tick.dt).rem_euclid(TAU);
        }
    }

    fn render(&self, painter: &mut dyn Painter, _tick: &Tick) -> FxResult<()> {
        let Viewport { width, height, .. } = self.viewport;
        painter.fill_rect(Rect::new(0.0, 0.0, width, height), &Paint::vertical(height, &SKY))?;

        painter.set_blend(Blend::Additive)?;
        for lobe in &self.lobes {
            let (x, y) = lobe.center(&self.viewport);
            let [r, g, b] = lobe.color;
            let paint = Paint::Radial {
                center: (x, y),
                radius: lobe.radius,
                stops: vec![
                    ColorStop::new(0.0, Rgba::new(r, g, b, lobe.alpha)),
                    ColorStop::new(0.5, Rgba::new(r, g, b, lobe.alpha * 0.4)),
                    ColorStop::new(1.0, Rgba::TRANSPARENT),
                ],
            };
            painter.fill_circle(x, y, lobe.radius, &paint)?;
        }
        painter.set_blend(Blend::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::CommandList;
    use rand::SeedableRng;

    #[test]
    fn lobes_sway_around_their_anchor() {
        let viewport = Viewport::new(1600.0, 900.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(8);
        let mut field = TwilightField::new();
        field.reseed(viewport, &mut rng);
        assert_eq!(field.lobes().len(), LOBE_COUNT);

        let tick = Tick { now_ms: 0.0, dt: 6.0, elapsed_secs: 0.0 };
        for _ in 0..5_000 {
            field.step(&tick, &mut rng);
        }
        for lobe in field.lobes() {
            assert!((0.0..TAU).contains(&lobe.phase));
            assert!((315.0..630.0).contains(&lobe.radius));
            let (x, y) = lobe.center(&viewport);
            let (ax, ay) = (lobe.anchor.0 * 1600.0, lobe.anchor.1 * 900.0);
            assert!((x - ax).abs() <= lobe.amplitude + 1e-9);
            assert!((y - ay).abs() <= lobe.amplitude + 1e-9);
        }
    }

    #[test]
    fn sky_then_glows() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut field = TwilightField::new();
        field.reseed(Viewport::new(800.0, 600.0, 1.0), &mut rng);
        let mut list = CommandList::new();
        field
            .render(&mut list, &Tick { now_ms: 0.0, dt: 0.0, elapsed_secs: 0.0 })
            .unwrap();

        let (rect, paint) = list.rects().next().unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(matches!(paint, Paint::Linear { to: (_, h), .. } if *h == 600.0));
        assert_eq!(list.circles().count(), LOBE_COUNT);
        assert_eq!(list.blends(), vec![Blend::Additive, Blend::Normal]);
    }
}
