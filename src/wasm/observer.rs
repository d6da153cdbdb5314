use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::reveal::{RevealTracker, REVEALED_CLASS};

/// Watches every element matching `selector` and marks each revealed the first
/// time it is at least `threshold` visible.
pub fn watch(document: &Document, selector: &str, threshold: f64) -> Result<usize, JsValue> {
    let tracker = Rc::new(RefCell::new(RevealTracker::<usize>::new(threshold)));

    let matches = document.query_selector_all(selector)?;
    let targets: Rc<Vec<Element>> = Rc::new(
        (0..matches.length())
            .filter_map(|i| matches.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
    );

    let callback = {
        let tracker = tracker.clone();
        let targets = targets.clone();
        Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let target_value: &JsValue = target.as_ref();
                // JsValue equality is `===`, so this matches the node itself.
                let Some(id) = targets.iter().position(|el| {
                    let el: &JsValue = el.as_ref();
                    el == target_value
                }) else {
                    continue;
                };
                let fired = tracker.borrow_mut().on_intersection(
                    &id,
                    entry.is_intersecting(),
                    entry.intersection_ratio(),
                );
                if fired {
                    if let Err(err) = target.class_list().add_1(REVEALED_CLASS) {
                        log::warn!("reveal: could not add class: {err:?}");
                    }
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(tracker.borrow().threshold()));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    // The observer lives as long as the page.
    callback.forget();

    let mut watched = 0;
    for (id, el) in targets.iter().enumerate() {
        if tracker.borrow_mut().observe(id) {
            observer.observe(el);
            watched += 1;
        }
    }
    log::debug!("reveal: watching {watched} targets at threshold {threshold}");
    Ok(watched)
}
