//! The five background effects and the trait they share.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::error::{FxError, FxResult};
use crate::paint::Painter;
use crate::surface::Viewport;
use crate::timer::Tick;

pub mod bokeh;
pub mod dust;
pub mod flow;
pub mod stars;
pub mod twilight;

pub use bokeh::{BokehField, Orb};
pub use dust::{DustField, Mote};
pub use flow::{FlowField, FlowParticle};
pub use stars::{Star, StarField};
pub use twilight::{Lobe, TwilightField};

/// A self-contained animated background.
pub trait Effect {
    fn kind(&self) -> EffectKind;

    /// Rebuild the whole population for `viewport`.
    fn reseed(&mut self, viewport: Viewport, rng: &mut SmallRng);

    /// Advance one frame.
    fn step(&mut self, tick: &Tick, rng: &mut SmallRng);

    /// Paint a full frame, background included.
    fn render(&self, painter: &mut dyn Painter, tick: &Tick) -> FxResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Bokeh,
    Twilight,
    Flow,
    Stars,
    Dust,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Bokeh,
        EffectKind::Twilight,
        EffectKind::Flow,
        EffectKind::Stars,
        EffectKind::Dust,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Bokeh => "bokeh",
            EffectKind::Twilight => "twilight",
            EffectKind::Flow => "flow",
            EffectKind::Stars => "stars",
            EffectKind::Dust => "dust",
        }
    }

    /// Whether pointer movement updates the coordinate readout.
    pub fn tracks_pointer(self) -> bool {
        matches!(self, EffectKind::Bokeh | EffectKind::Flow)
    }

    /// Visible fraction at which `[data-reveal]` targets are revealed.
    pub fn reveal_threshold(self) -> f64 {
        match self {
            EffectKind::Stars => 0.15,
            _ => 0.12,
        }
    }

    pub fn build(self) -> Box<dyn Effect> {
        match self {
            EffectKind::Bokeh => Box::new(BokehField::new()),
            EffectKind::Twilight => Box::new(TwilightField::new()),
            EffectKind::Flow => Box::new(FlowField::new()),
            EffectKind::Stars => Box::new(StarField::new()),
            EffectKind::Dust => Box::new(DustField::new()),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EffectKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FxError::UnknownEffect(s.to_string()))
    }
}

/// Sine-shaped fade-in/fade-out over a lifetime. Exactly zero at birth and expiry.
pub fn fade(life: f64, max_life: f64) -> f64 {
    if max_life <= 0.0 {
        return 0.0;
    }
    let ratio = life / max_life;
    if ratio <= 0.0 || ratio >= 1.0 || ratio.is_nan() {
        return 0.0;
    }
    (PI * ratio).sin()
}

/// Uniform sample in `[min, max)`; a degenerate range yields `min`.
pub(crate) fn between(rng: &mut SmallRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Wrap into `[0, 1)`.
pub(crate) fn wrap_unit(v: f64) -> f64 {
    let w = v.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// Wrap into `[0, len)`; a zero-sized axis collapses to 0.
pub(crate) fn wrap_len(v: f64, len: f64) -> f64 {
    if len <= 0.0 {
        return 0.0;
    }
    let w = v.rem_euclid(len);
    if w >= len {
        0.0
    } else {
        w
    }
}
