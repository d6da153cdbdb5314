#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Decorative full-viewport canvas backgrounds: bokeh orbs, a twilight gradient
//! field, a noise-driven flow field, a starfield and floating dust.
//!
//! Simulation and painting are host-compilable; the browser glue lives in the
//! `wasm` module and only builds for `wasm32`.

pub mod config;
pub mod effects;
pub mod error;
pub mod noise;
pub mod paint;
pub mod reveal;
pub mod scene;
pub mod surface;
pub mod timer;

pub use config::Config;
pub use effects::{fade, Effect, EffectKind};
pub use error::{FxError, FxResult};
pub use paint::{Blend, CommandList, Paint, Painter, Rgba};
pub use reveal::RevealTracker;
pub use scene::Scene;
pub use surface::{pointer_readout, Viewport};
pub use timer::{FrameTimer, Tick};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod observer;
    mod render;

    pub use render::mount;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or(crate::FxError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(crate::FxError::MissingGlobal("document"))?;

        let canvas_id = crate::Config::default().canvas_id;
        // No drawing surface on this page: nothing to animate.
        let Some(element) = document.get_element_by_id(&canvas_id) else {
            log::debug!("#{canvas_id} not found, backdrop idle");
            return Ok(());
        };
        let canvas = element.dyn_into::<web_sys::HtmlCanvasElement>()?;

        let query_effect = window
            .location()
            .search()
            .ok()
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("effect"));

        let (mut config, errors) =
            crate::Config::from_attributes(|name| canvas.get_attribute(name));
        for err in errors {
            log::warn!("backdrop config value ignored: {err}");
        }
        if let Err(err) = config.apply_query_effect(query_effect.as_deref()) {
            log::warn!("backdrop ?effect ignored: {err}");
        }

        mount(canvas, config)?;
        Ok(())
    }
}
