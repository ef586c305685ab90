//! DOM-backed container: an `HtmlElement` watched by a `ResizeObserver`.

use fv_core::Size;
use fv_editor::{Container, Observation, ResizeCallback};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ResizeObserver};

pub struct DomContainer {
    element: HtmlElement,
}

impl DomContainer {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl Container for DomContainer {
    fn content_size(&self) -> Size {
        Size::new(
            f64::from(self.element.offset_width()),
            f64::from(self.element.offset_height()),
        )
    }

    fn observe(&self, mut on_resize: ResizeCallback) -> Result<Observation, String> {
        let closure = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| on_resize(),
        );
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|e| format!("ResizeObserver: {e:?}"))?;
        observer.observe(&self.element);

        Ok(Observation::new(move || {
            observer.disconnect();
            // The JS callback must outlive the observer.
            drop(closure);
        }))
    }
}
