//! Page-level configuration, read from `data-*` attributes on the drawing surface.

use crate::effects::EffectKind;
use crate::error::{FxError, FxResult};

pub const ATTR_EFFECT: &str = "data-effect";
pub const ATTR_SEED: &str = "data-seed";
pub const ATTR_REVEAL_THRESHOLD: &str = "data-reveal-threshold";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Id of the `<canvas>` to paint on. Without it nothing runs.
    pub canvas_id: String,
    /// Id of the optional coordinate readout element.
    pub coords_id: String,
    /// Selector for scroll-reveal targets.
    pub reveal_selector: String,
    pub effect: EffectKind,
    /// Fixed RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Overrides the effect's own reveal threshold.
    pub reveal_threshold: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            coords_id: "coords".to_string(),
            reveal_selector: "[data-reveal]".to_string(),
            effect: EffectKind::Flow,
            seed: None,
            reveal_threshold: None,
        }
    }
}

impl Config {
    /// Builds a config from attribute lookups. Absent attributes keep defaults;
    /// an invalid attribute keeps its default and is reported in the returned
    /// list while every other attribute still applies.
    pub fn from_attributes<F>(lookup: F) -> (Self, Vec<FxError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut errors = Vec::new();

        if let Some(effect) = lookup(ATTR_EFFECT) {
            match effect.parse() {
                Ok(kind) => config.effect = kind,
                Err(err) => errors.push(err),
            }
        }
        if let Some(seed) = lookup(ATTR_SEED) {
            match seed.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => errors.push(FxError::InvalidAttribute {
                    name: ATTR_SEED,
                    value: seed,
                }),
            }
        }
        if let Some(raw) = lookup(ATTR_REVEAL_THRESHOLD) {
            match raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| (0.0..=1.0).contains(t))
            {
                Some(threshold) => config.reveal_threshold = Some(threshold),
                None => errors.push(FxError::InvalidAttribute {
                    name: ATTR_REVEAL_THRESHOLD,
                    value: raw,
                }),
            }
        }

        (config, errors)
    }

    /// Applies an `effect=` query parameter, e.g. from `?effect=stars`. An unknown
    /// name leaves the current effect in place.
    pub fn apply_query_effect(&mut self, query_effect: Option<&str>) -> FxResult<()> {
        if let Some(name) = query_effect {
            self.effect = name.parse()?;
        }
        Ok(())
    }

    /// Threshold the reveal observer should use.
    pub fn effective_reveal_threshold(&self) -> f64 {
        self.reveal_threshold
            .unwrap_or_else(|| self.effect.reveal_threshold())
    }
}
