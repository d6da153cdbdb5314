//! A running effect: population, clock, viewport and randomness in one owner.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::effects::{Effect, EffectKind};
use crate::error::FxResult;
use crate::paint::Painter;
use crate::surface::Viewport;
use crate::timer::{FrameTimer, Tick};

pub struct Scene {
    effect: Box<dyn Effect>,
    timer: FrameTimer,
    viewport: Viewport,
    rng: SmallRng,
}

impl Scene {
    /// Creates and seeds a scene. `seed` fixes all random placement.
    pub fn new(kind: EffectKind, viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_effect(kind.build(), viewport, rng)
    }

    pub fn with_effect(effect: Box<dyn Effect>, viewport: Viewport, rng: SmallRng) -> Self {
        let mut scene = Self {
            effect,
            timer: FrameTimer::new(),
            viewport,
            rng,
        };
        scene.resize(viewport);
        scene
    }

    pub fn kind(&self) -> EffectKind {
        self.effect.kind()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    pub fn effect_mut(&mut self) -> &mut dyn Effect {
        self.effect.as_mut()
    }

    /// Re-establishes the population for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        debug!(
            "{}: resize to {}x{} @{}x",
            self.effect.kind(),
            viewport.width,
            viewport.height,
            viewport.dpr
        );
        self.viewport = viewport;
        self.effect.reseed(viewport, &mut self.rng);
        self.timer.reset();
    }

    /// Advances the effect to `now_ms` and paints the frame.
    pub fn frame(&mut self, now_ms: f64, painter: &mut dyn Painter) -> FxResult<Tick> {
        let tick = self.timer.tick(now_ms);
        self.effect.step(&tick, &mut self.rng);
        self.effect.render(painter, &tick)?;
        Ok(tick)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("effect", &self.effect.kind())
            .field("timer", &self.timer)
            .field("viewport", &self.viewport)
            .finish()
    }
}
