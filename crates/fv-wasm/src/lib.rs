//! WASM bridge for FV: binds a `<canvas>` to the panel that hosts it.
//!
//! Compiled via `wasm-pack build --target web`. The host page creates an
//! `FvCanvas`, attaches it to the container element, and calls
//! `render_if_needed` from its animation frame loop.

mod container;
mod render2d;

use container::DomContainer;
use fv_core::model::{Color, Shape};
use fv_core::{FitConfig, Surface, snapshot};
use fv_editor::{FitOutcome, ResizeSync, SurfaceHandle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

/// The JS-facing controller: one surface, one canvas, at most one container.
#[wasm_bindgen]
pub struct FvCanvas {
    surface: SurfaceHandle,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sync: ResizeSync<DomContainer>,
}

#[wasm_bindgen]
impl FvCanvas {
    /// Create a controller for `canvas`. `config_json` overrides the fit
    /// settings, e.g. `{"zoom_ratio": 0.9}`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<FvCanvas, JsValue> {
        console_error_panic_hook_setup();

        let config = match config_json.as_deref() {
            Some(json) => FitConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?,
            None => FitConfig::default(),
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let surface = Surface::new(f64::from(canvas.width()), f64::from(canvas.height()));
        let surface = Rc::new(RefCell::new(surface));

        let mut sync = ResizeSync::new(config);
        sync.set_surface(Some(Rc::clone(&surface)));

        Ok(Self {
            surface,
            canvas,
            ctx,
            sync,
        })
    }

    /// Start tracking `container`. Replaces any previous container.
    pub fn attach(&mut self, container: HtmlElement) {
        self.sync
            .set_container(Some(Rc::new(DomContainer::new(container))));
        log::debug!("attach: observing={}", self.sync.is_observing());
    }

    /// Stop tracking the container. The surface keeps its last fit.
    pub fn detach(&mut self) {
        self.sync.set_container(None);
    }

    pub fn is_attached(&self) -> bool {
        self.sync.is_observing()
    }

    /// Add a rectangle. `name` of `"clip"` makes it the workspace marker.
    pub fn add_rect(
        &mut self,
        name: Option<String>,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        fill: Option<String>,
    ) {
        self.add_shape(Shape::rect(left, top, width, height), name, fill);
    }

    pub fn add_ellipse(
        &mut self,
        name: Option<String>,
        left: f64,
        top: f64,
        rx: f64,
        ry: f64,
        fill: Option<String>,
    ) {
        self.add_shape(Shape::ellipse(left, top, rx, ry), name, fill);
    }

    /// Remove every shape. The clip region stays until the next fit.
    pub fn clear(&mut self) {
        let mut surface = self.surface.borrow_mut();
        surface.objects.clear();
        surface.request_render();
    }

    /// Replace all shapes from a JSON array.
    /// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn load_objects_json(&mut self, json: &str) -> String {
        match snapshot::from_json(json) {
            Ok(objects) => {
                let mut surface = self.surface.borrow_mut();
                surface.replace_objects(objects);
                surface.request_render();
                serde_json::json!({ "ok": true }).to_string()
            }
            Err(e) => {
                log::warn!("load_objects_json: {e}");
                serde_json::json!({ "ok": false, "error": e }).to_string()
            }
        }
    }

    /// Current shapes as a JSON array.
    pub fn objects_json(&self) -> String {
        snapshot::to_json(&self.surface.borrow().objects).unwrap_or_else(|_| "[]".to_string())
    }

    /// Fit now, without waiting for a resize notification.
    /// Returns `skipped`, `degenerate`, `unmarked`, or `fitted`.
    pub fn recompute_view(&self) -> String {
        outcome_name(self.sync.recompute_view()).to_string()
    }

    /// Paint if anything requested a render since the last call.
    pub fn render_if_needed(&self) -> Result<bool, JsValue> {
        if !self.surface.borrow_mut().take_render_request() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    pub fn render(&self) -> Result<(), JsValue> {
        render2d::render_surface(&self.ctx, &self.canvas, &self.surface.borrow())
    }

    /// `{"width","height","zoom","transform":[a,b,c,d,e,f],"clipped"}`.
    pub fn view_state_json(&self) -> String {
        let surface = self.surface.borrow();
        serde_json::json!({
            "width": surface.width(),
            "height": surface.height(),
            "zoom": surface.zoom(),
            "transform": surface.viewport_transform().as_coeffs(),
            "clipped": surface.clip_path().is_some(),
        })
        .to_string()
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl FvCanvas {
    fn add_shape(&mut self, mut shape: Shape, name: Option<String>, fill: Option<String>) {
        if let Some(name) = name.as_deref() {
            shape = shape.named(name);
        }
        if let Some(color) = fill.as_deref().and_then(Color::from_hex) {
            shape = shape.with_fill(color);
        }
        let mut surface = self.surface.borrow_mut();
        surface.objects.add(shape);
        surface.request_render();
    }
}

fn outcome_name(outcome: FitOutcome) -> &'static str {
    match outcome {
        FitOutcome::Skipped => "skipped",
        FitOutcome::Degenerate => "degenerate",
        FitOutcome::Unmarked => "unmarked",
        FitOutcome::Fitted { .. } => "fitted",
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("FV WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::Point;
    use pretty_assertions::assert_eq;

    #[test]
    fn outcome_names() {
        assert_eq!(outcome_name(FitOutcome::Skipped), "skipped");
        assert_eq!(
            outcome_name(FitOutcome::Fitted {
                zoom: 1.0,
                center: Point::ZERO
            }),
            "fitted"
        );
    }
}
