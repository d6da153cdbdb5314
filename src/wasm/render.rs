use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::canvas::CanvasPainter;
use super::observer;
use crate::config::Config;
use crate::error::{FxError, FxResult};
use crate::scene::Scene;
use crate::surface::{pointer_readout, Viewport};

fn current_viewport(win: &Window) -> FxResult<Viewport> {
    let width = win.inner_width()?.as_f64().unwrap_or(0.0);
    let height = win.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height, win.device_pixel_ratio()))
}

/// Sizes the backing store to physical pixels and maps drawing onto CSS pixels.
fn apply_viewport(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    viewport: &Viewport,
) -> FxResult<()> {
    let (w, h) = viewport.backing_size();
    canvas.set_width(w);
    canvas.set_height(h);
    let (css_w, css_h) = viewport.css_size();
    let style = canvas.style();
    style.set_property("width", &css_w)?;
    style.set_property("height", &css_h)?;
    let [a, b, c, d, e, f] = viewport.transform();
    ctx.set_transform(a, b, c, d, e, f)?;
    Ok(())
}

/// Start the configured effect on `canvas` and run it for the life of the page.
pub fn mount(canvas: HtmlCanvasElement, config: Config) -> Result<(), JsValue> {
    let win = window().ok_or(FxError::MissingGlobal("window"))?;
    let document = win.document().ok_or(FxError::MissingGlobal("document"))?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| FxError::NoContext(config.canvas_id.clone()))?
        .dyn_into()?;

    let viewport = current_viewport(&win)?;
    apply_viewport(&canvas, &ctx, &viewport)?;

    let scene = Rc::new(RefCell::new(Scene::new(config.effect, viewport, config.seed)));
    log::info!(
        "backdrop: {} on #{} ({}x{} @{}x)",
        config.effect,
        config.canvas_id,
        viewport.width,
        viewport.height,
        viewport.dpr
    );

    // Resize re-seeds the population for the new viewport.
    let resize_closure = {
        let scene = scene.clone();
        let canvas = canvas.clone();
        let ctx = ctx.clone();
        Closure::wrap(Box::new(move || {
            let Some(win) = window() else { return };
            let resized = current_viewport(&win)
                .and_then(|vp| apply_viewport(&canvas, &ctx, &vp).map(|()| vp));
            match resized {
                Ok(vp) => scene.borrow_mut().resize(vp),
                Err(err) => log::warn!("backdrop: resize failed: {err}"),
            }
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    if config.effect.tracks_pointer() {
        if let Some(coords) = document.get_element_by_id(&config.coords_id) {
            let scene = scene.clone();
            let move_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let viewport = scene.borrow().viewport();
                let text = pointer_readout(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    &viewport,
                );
                coords.set_text_content(Some(&text));
            }) as Box<dyn FnMut(MouseEvent)>);
            document.add_event_listener_with_callback(
                "mousemove",
                move_closure.as_ref().unchecked_ref(),
            )?;
            move_closure.forget();
        }
    }

    observer::watch(
        &document,
        &config.reveal_selector,
        config.effective_reveal_threshold(),
    )?;

    // Animation loop
    // `f` holds the animation-frame closure so that the loop can keep calling
    // `request_animation_frame` on itself. Storing it inside an `Option` allows
    // the `Closure` to be created first and referenced from within afterwards.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut painter = CanvasPainter::new(ctx);
    let mut failing = false;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        match scene.borrow_mut().frame(now_ms, &mut painter) {
            Ok(_) => failing = false,
            Err(err) => {
                if !failing {
                    log::error!("backdrop: frame failed: {err}");
                }
                failing = true;
            }
        }

        // schedule next
        if let (Some(win), Some(next)) = (window(), f.borrow().as_ref()) {
            if let Err(err) = win.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("backdrop: could not schedule frame: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        win.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    Ok(())
}
