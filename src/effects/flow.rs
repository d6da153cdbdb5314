//! Simplex-noise-driven particle flow field with fading trails.

use std::collections::VecDeque;
use std::f64::consts::PI;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use super::{between, Effect, EffectKind};
use crate::error::FxResult;
use crate::noise::Simplex2;
use crate::paint::{Paint, Painter, Rect, Rgba};
use crate::surface::Viewport;
use crate::timer::Tick;

pub const PARTICLE_COUNT: usize = 1000;
pub const MAX_TRAIL_POINTS: usize = 120;

const NOISE_SCALE: f64 = 0.003;
const TIME_STEP: f64 = 0.0003;
const STEER_GAIN: f64 = 0.15;
const FRICTION: f64 = 0.95;
const DOT_SIZE: f64 = 1.5;
const TRAIL_ALPHA: f64 = 0.35;

const BACKGROUND: Rgba = Rgba::opaque([10, 10, 10]);

#[derive(Debug, Clone, PartialEq)]
pub struct FlowParticle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub max_life: f64,
    /// Oldest point first.
    pub trail: VecDeque<(f64, f64)>,
}

impl FlowParticle {
    pub const LIFE_RANGE: (f64, f64) = (120.0, 370.0);

    pub fn seed(viewport: &Viewport, rng: &mut SmallRng) -> Self {
        let life = between(rng, Self::LIFE_RANGE.0, Self::LIFE_RANGE.1);
        Self {
            x: rng.gen::<f64>() * viewport.width,
            y: rng.gen::<f64>() * viewport.height,
            vx: 0.0,
            vy: 0.0,
            life,
            max_life: life,
            trail: VecDeque::with_capacity(MAX_TRAIL_POINTS + 1),
        }
    }

    pub fn push_trail(&mut self, point: (f64, f64)) {
        self.trail.push_back(point);
        while self.trail.len() > MAX_TRAIL_POINTS {
            self.trail.pop_front();
        }
    }

    fn out_of_bounds(&self, viewport: &Viewport) -> bool {
        self.x < 0.0 || self.x > viewport.width || self.y < 0.0 || self.y > viewport.height
    }
}

#[derive(Debug)]
pub struct FlowField {
    viewport: Viewport,
    noise: Option<Simplex2>,
    particles: Vec<FlowParticle>,
    time: f64,
}

impl FlowField {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            noise: None,
            particles: Vec::new(),
            time: 0.0,
        }
    }

    /// Uses a prebuilt noise table instead of shuffling one on first seed.
    pub fn with_noise(noise: Simplex2) -> Self {
        Self {
            noise: Some(noise),
            ..Self::new()
        }
    }

    pub fn particles(&self) -> &[FlowParticle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [FlowParticle] {
        &mut self.particles
    }

    /// Slowly advancing offset along the noise field's y axis.
    pub fn time(&self) -> f64 {
        self.time
    }

    fn steering_angle(noise: &Simplex2, x: f64, y: f64, time: f64) -> f64 {
        noise.sample(x * NOISE_SCALE, y * NOISE_SCALE + time) * PI * 4.0
    }
}

impl Default for FlowField {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for FlowField {
    fn kind(&self) -> EffectKind {
        EffectKind::Flow
    }

    fn reseed(&mut self, viewport: Viewport, rng: &mut SmallRng) {
        // the table is built once and survives resizes
        if self.noise.is_none() {
            self.noise = Some(Simplex2::new(rng));
        }
        self.viewport = viewport;
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| FlowParticle::seed(&viewport, rng))
            .collect();
        debug!("flow: seeded {} particles", self.particles.len());
    }

    fn step(&mut self, tick: &Tick, rng: &mut SmallRng) {
        let Some(noise) = self.noise.as_ref() else {
            return;
        };
        let dt = tick.dt;
        let friction = FRICTION.powf(dt);
        let viewport = self.viewport;

        for p in &mut self.particles {
            let angle = Self::steering_angle(noise, p.x, p.y, self.time);
            p.vx += angle.cos() * STEER_GAIN * dt;
            p.vy += angle.sin() * STEER_GAIN * dt;
            p.vx *= friction;
            p.vy *= friction;
            p.x += p.vx * dt;
            p.y += p.vy * dt;

            p.push_trail((p.x, p.y));
            p.life -= dt;

            if p.life <= 0.0 || p.out_of_bounds(&viewport) {
                *p = FlowParticle::seed(&viewport, rng);
            }
        }

        self.time += TIME_STEP * dt;
    }

    fn render(&self, painter: &mut dyn Painter, _tick: &Tick) -> FxResult<()> {
        let Viewport { width, height, .. } = self.viewport;
        painter.fill_rect(Rect::new(0.0, 0.0, width, height), &Paint::Solid(BACKGROUND))?;

        for p in &self.particles {
            let life_alpha = if p.max_life > 0.0 {
                (p.life / p.max_life) * TRAIL_ALPHA
            } else {
                0.0
            };
            let count = p.trail.len() as f64;
            for (i, &(x, y)) in p.trail.iter().enumerate() {
                let alpha = (i + 1) as f64 / count * life_alpha;
                let paint = Paint::Solid(Rgba::new(255, 255, 255, alpha));
                painter.fill_rect(Rect::new(x, y, DOT_SIZE, DOT_SIZE), &paint)?;
            }
        }
        Ok(())
    }
}
