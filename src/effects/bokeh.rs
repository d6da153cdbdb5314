//! Soft drifting orbs with gentle parallax and subtle glow.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use super::{between, fade, Effect, EffectKind};
use crate::error::FxResult;
use crate::paint::{Blend, ColorStop, Paint, Painter, Rect, Rgba};
use crate::surface::Viewport;
use crate::timer::Tick;

pub const ORB_COUNT: usize = 22;

const PALETTE: [[u8; 3]; 4] = [
    [168, 154, 214], // lavender
    [142, 113, 214], // violet
    [127, 218, 220], // teal
    [108, 126, 192], // cool blue
];

const BACKGROUND: Rgba = Rgba::opaque([16, 18, 40]);

#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub speed: f64,
    pub phase: f64,
    pub phase_speed: f64,
    pub color: [u8; 3],
    pub alpha: f64,
    pub life: f64,
    pub max_life: f64,
}

impl Orb {
    pub const LIFE_RANGE: (f64, f64) = (800.0, 1600.0);

    pub fn seed(viewport: &Viewport, rng: &mut SmallRng) -> Self {
        let life = between(rng, Self::LIFE_RANGE.0, Self::LIFE_RANGE.1);
        Self {
            x: rng.gen::<f64>() * viewport.width,
            y: rng.gen::<f64>() * viewport.height,
            radius: between(rng, 90.0, 220.0),
            drift_x: between(rng, -0.8, 0.8),
            drift_y: between(rng, -0.6, 0.6),
            speed: between(rng, 0.08, 0.18),
            phase: rng.gen::<f64>() * TAU,
            phase_speed: between(rng, 0.0002, 0.0006),
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
            alpha: between(rng, 0.06, 0.18),
            life,
            max_life: life,
        }
    }

    /// Wraps around the viewport once the orb is fully off one edge.
    /// Positions stay within `[-r, size + r]`; the upper edge is inclusive.
    fn wrap(&mut self, viewport: &Viewport) {
        let r = self.radius;
        if self.x < -r {
            self.x = viewport.width + r;
        }
        if self.x > viewport.width + r {
            self.x = -r;
        }
        if self.y < -r {
            self.y = viewport.height + r;
        }
        if self.y > viewport.height + r {
            self.y = -r;
        }
    }

    /// Draw position including the slow sinusoidal wobble.
    pub fn wobbled(&self, now_ms: f64) -> (f64, f64) {
        let x = self.x + (now_ms * (0.0004 + self.phase_speed) + self.phase).sin() * 16.0;
        let y = self.y + (now_ms * (0.00035 + self.phase_speed) + self.phase).cos() * 14.0;
        (x, y)
    }
}

#[derive(Debug, Default)]
pub struct BokehField {
    viewport: Viewport,
    orbs: Vec<Orb>,
}

impl BokehField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn orbs_mut(&mut self) -> &mut [Orb] {
        &mut self.orbs
    }
}

impl Effect for BokehField {
    fn kind(&self) -> EffectKind {
        EffectKind::Bokeh
    }

    fn reseed(&mut self, viewport: Viewport, rng: &mut SmallRng) {
        self.viewport = viewport;
        self.orbs = (0..ORB_COUNT).map(|_| Orb::seed(&viewport, rng)).collect();
        debug!("bokeh: seeded {} orbs for {}x{}", self.orbs.len(), viewport.width, viewport.height);
    }

    fn step(&mut self, tick: &Tick, rng: &mut SmallRng) {
        let viewport = self.viewport;
        for orb in &mut self.orbs {
            orb.x += orb.drift_x * orb.speed * tick.dt;
            orb.y += orb.drift_y * orb.speed * tick.dt;
            orb.life -= tick.dt;

            if orb.life <= 0.0 {
                *orb = Orb::seed(&viewport, rng);
                continue;
            }
            orb.wrap(&viewport);
        }
    }

    fn render(&self, painter: &mut dyn Painter, tick: &Tick) -> FxResult<()> {
        let Viewport { width, height, .. } = self.viewport;
        painter.clear(width, height)?;
        painter.fill_rect(Rect::new(0.0, 0.0, width, height), &Paint::Solid(BACKGROUND))?;

        painter.set_blend(Blend::Additive)?;
        for orb in &self.orbs {
            let alpha = orb.alpha * fade(orb.life, orb.max_life);
            let (x, y) = orb.wobbled(tick.now_ms);
            let [r, g, b] = orb.color;
            let paint = Paint::Radial {
                center: (x, y),
                radius: orb.radius,
                stops: vec![
                    ColorStop::new(0.0, Rgba::new(r, g, b, alpha)),
                    ColorStop::new(0.6, Rgba::new(r, g, b, alpha * 0.35)),
                    ColorStop::new(1.0, Rgba::TRANSPARENT),
                ],
            };
            painter.fill_circle(x, y, orb.radius, &paint)?;
        }
        painter.set_blend(Blend::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::CommandList;
    use rand::SeedableRng;

    fn tick(dt: f64) -> Tick {
        Tick { now_ms: 0.0, dt, elapsed_secs: 0.0 }
    }

    fn field(seed: u64) -> (BokehField, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut field = BokehField::new();
        field.reseed(Viewport::new(1280.0, 720.0, 1.0), &mut rng);
        (field, rng)
    }

    #[test]
    fn seeds_fixed_population_in_ranges() {
        let (field, _) = field(11);
        assert_eq!(field.orbs().len(), ORB_COUNT);
        for orb in field.orbs() {
            assert!((0.0..1280.0).contains(&orb.x));
            assert!((90.0..220.0).contains(&orb.radius));
            assert!((800.0..1600.0).contains(&orb.life));
            assert_eq!(orb.life, orb.max_life);
            assert!(PALETTE.contains(&orb.color));
        }
    }

    #[test]
    fn wraps_with_radius_margin() {
        let (mut field, mut rng) = field(5);
        {
            let orb = &mut field.orbs_mut()[0];
            orb.x = -orb.radius - 1.0;
            orb.y = 720.0 + orb.radius + 1.0;
            orb.drift_x = 0.0;
            orb.drift_y = 0.0;
        }
        field.step(&tick(1.0), &mut rng);
        let orb = &field.orbs()[0];
        assert_eq!(orb.x, 1280.0 + orb.radius);
        assert_eq!(orb.y, -orb.radius);

        for _ in 0..2_000 {
            field.step(&tick(3.0), &mut rng);
            for orb in field.orbs() {
                assert!(orb.x >= -orb.radius && orb.x <= 1280.0 + orb.radius);
                assert!(orb.y >= -orb.radius && orb.y <= 720.0 + orb.radius);
            }
        }
    }

    #[test]
    fn renders_additive_glow_then_restores() {
        let (field, _) = field(2);
        let mut list = CommandList::new();
        field.render(&mut list, &tick(0.0)).unwrap();

        assert_eq!(list.blends(), vec![Blend::Additive, Blend::Normal]);
        assert_eq!(list.circles().count(), ORB_COUNT);
        // a freshly seeded orb sits at the start of its envelope: fully transparent
        for (_, _, _, paint) in list.circles() {
            let Paint::Radial { stops, .. } = paint else {
                panic!("orbs are radial gradients");
            };
            assert_eq!(stops.len(), 3);
            assert_eq!(stops[0].color.a, 0.0);
            assert_eq!(stops[1].offset, 0.6);
        }
    }
}
