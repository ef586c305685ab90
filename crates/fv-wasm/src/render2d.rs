//! Canvas2D renderer for a fitted surface.
//!
//! Applies the viewport transform, clips to the workspace marker copy, and
//! paints shapes in order. Used in the browser where Vello isn't set up.

use fv_core::model::{ObjectSet, Shape, ShapeKind};
use fv_core::{Affine, NodeIndex, PathEl, Surface};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Color behind the workspace.
const BACKGROUND: &str = "#E5E5EA";

/// Render the surface. Resizes the backing canvas first if its pixel size
/// no longer matches the surface.
pub fn render_surface(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    surface: &Surface,
) -> Result<(), JsValue> {
    let (width, height) = pixel_size(surface);
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, f64::from(width), f64::from(height));

    apply(ctx, surface.viewport_transform(), true)?;

    ctx.save();
    if let Some(clip) = surface.clip_path() {
        ctx.save();
        apply(ctx, clip.local_transform(), false)?;
        ctx.begin_path();
        trace(ctx, clip);
        ctx.restore();
        ctx.clip();
    }

    for idx in surface.objects.top_level() {
        render_node(ctx, &surface.objects, idx)?;
    }
    ctx.restore();
    Ok(())
}

fn render_node(
    ctx: &CanvasRenderingContext2d,
    objects: &ObjectSet,
    idx: NodeIndex,
) -> Result<(), JsValue> {
    let Some(shape) = objects.get(idx) else {
        return Ok(());
    };
    if matches!(shape.kind, ShapeKind::Root) {
        return Ok(());
    }

    ctx.save();
    apply(ctx, shape.local_transform(), false)?;
    ctx.set_global_alpha(f64::from(shape.style.opacity.unwrap_or(1.0).clamp(0.0, 1.0)));

    ctx.begin_path();
    trace(ctx, shape);
    if let Some(fill) = shape.style.fill {
        ctx.set_fill_style_str(&fill.to_css());
        ctx.fill();
    }
    if let Some(stroke) = shape.style.stroke {
        ctx.set_line_width(stroke.width);
        ctx.set_stroke_style_str(&stroke.color.to_css());
        ctx.stroke();
    }

    for child in objects.children(idx) {
        render_node(ctx, objects, child)?;
    }
    ctx.restore();
    Ok(())
}

/// Append the shape outline to the current path, in the current transform.
fn trace(ctx: &CanvasRenderingContext2d, shape: &Shape) {
    for el in shape.outline().elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

/// Multiply `transform` onto the context, or replace it when `reset` is set.
fn apply(ctx: &CanvasRenderingContext2d, transform: Affine, reset: bool) -> Result<(), JsValue> {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    if reset {
        ctx.set_transform(a, b, c, d, e, f)
    } else {
        ctx.transform(a, b, c, d, e, f)
    }
}

/// Whole pixels for the backing store; negative or NaN sizes become 0.
pub fn pixel_size(surface: &Surface) -> (u32, u32) {
    let px = |v: f64| if v.is_finite() && v > 0.0 { v.round() as u32 } else { 0 };
    (px(surface.width()), px(surface.height()))
}
