//! Minimal dark gradient with sparse, slow, twinkling stars.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use super::{between, wrap_unit, Effect, EffectKind};
use crate::error::FxResult;
use crate::paint::{ColorStop, Paint, Painter, Rect, Rgba};
use crate::surface::Viewport;
use crate::timer::Tick;

pub const STAR_COUNT: usize = 88;

const STAR_COLOR: [u8; 3] = [245, 247, 250];

const SKY: [ColorStop; 2] = [
    ColorStop::new(0.0, Rgba::opaque([6, 6, 8])),
    ColorStop::new(1.0, Rgba::opaque([13, 15, 19])),
];

/// Position is normalized to `[0, 1)` so stars survive resizes unchanged in layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub alpha: f64,
    pub twinkle_seed: f64,
    pub twinkle_speed: f64,
    pub drift_x: f64,
    pub drift_y: f64,
}

impl Star {
    pub fn seed(rng: &mut SmallRng) -> Self {
        Self {
            x: rng.gen(),
            y: rng.gen(),
            size: between(rng, 0.45, 1.75),
            alpha: between(rng, 0.14, 0.66),
            twinkle_seed: between(rng, 0.0, TAU),
            twinkle_speed: between(rng, 0.18, 0.8),
            drift_x: between(rng, -0.002, 0.002),
            drift_y: between(rng, -0.0028, -0.0002),
        }
    }

    pub fn twinkle(&self, secs: f64) -> f64 {
        0.6 + (secs * self.twinkle_speed + self.twinkle_seed).sin() * 0.4
    }
}

#[derive(Debug, Default)]
pub struct StarField {
    viewport: Viewport,
    stars: Vec<Star>,
}

impl StarField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }
}

impl Effect for StarField {
    fn kind(&self) -> EffectKind {
        EffectKind::Stars
    }

    fn reseed(&mut self, viewport: Viewport, rng: &mut SmallRng) {
        self.viewport = viewport;
        self.stars = (0..STAR_COUNT).map(|_| Star::seed(rng)).collect();
        debug!("stars: seeded {}", self.stars.len());
    }

    fn step(&mut self, tick: &Tick, _rng: &mut SmallRng) {
        for s in &mut self.stars {
            s.x = wrap_unit(s.x + s.drift_x * tick.dt);
            s.y = wrap_unit(s.y + s.drift_y * tick.dt);
        }
    }

    fn render(&self, painter: &mut dyn Painter, tick: &Tick) -> FxResult<()> {
        let Viewport { width, height, .. } = self.viewport;
        painter.fill_rect(Rect::new(0.0, 0.0, width, height), &Paint::vertical(height, &SKY))?;

        let [r, g, b] = STAR_COLOR;
        for s in &self.stars {
            let alpha = s.alpha * s.twinkle(tick.elapsed_secs);
            let paint = Paint::Solid(Rgba::new(r, g, b, alpha));
            painter.fill_circle(s.x * width, s.y * height, s.size, &paint)?;
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
    fn drift_wraps_without_respawn() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut field = StarField::new();
        field.reseed(Viewport::new(1024.0, 768.0, 1.0), &mut rng);
        let sizes: Vec<f64> = field.stars().iter().map(|s| s.size).collect();

        let tick = Tick { now_ms: 0.0, dt: 6.0, elapsed_secs: 0.0 };
        for _ in 0..10_000 {
            field.step(&tick, &mut rng);
            for s in field.stars() {
                assert!((0.0..1.0).contains(&s.x) && (0.0..1.0).contains(&s.y));
            }
        }
        let after: Vec<f64> = field.stars().iter().map(|s| s.size).collect();
        assert_eq!(sizes, after);
    }

    #[test]
    fn edge_star_wraps_to_other_side() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut field = StarField::new();
        field.reseed(Viewport::new(100.0, 100.0, 1.0), &mut rng);
        {
            let s = &mut field.stars_mut()[0];
            s.x = 0.0005;
            s.drift_x = -0.001;
            s.y = 0.5;
            s.drift_y = -0.001;
        }
        field.step(&Tick { now_ms: 0.0, dt: 1.0, elapsed_secs: 0.0 }, &mut rng);
        let s = &field.stars()[0];
        assert!((s.x - 0.9995).abs() < 1e-12);
        assert!((s.y - 0.499).abs() < 1e-12);
    }

    #[test]
    fn twinkle_stays_in_band() {
        let star = Star::seed(&mut SmallRng::seed_from_u64(5));
        for k in 0..500 {
            let t = star.twinkle(k as f64 * 0.37);
            assert!(t > 0.2 - 1e-9 && t < 1.0 + 1e-9);
        }
    }

    #[test]
    fn renders_one_circle_per_star() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut field = StarField::new();
        field.reseed(Viewport::new(200.0, 100.0, 2.0), &mut rng);
        let mut list = CommandList::new();
        field
            .render(&mut list, &Tick { now_ms: 0.0, dt: 0.0, elapsed_secs: 1.5 })
            .unwrap();
        assert_eq!(list.circles().count(), STAR_COUNT);
        for (cx, cy, r, _) in list.circles() {
            assert!((0.0..200.0).contains(&cx) && (0.0..100.0).contains(&cy));
            assert!((0.45..1.75).contains(&r));
        }
    }
}
