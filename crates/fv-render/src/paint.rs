//! Surface → Vello drawing commands.
//!
//! Paints every shape through the surface's viewport transform. When the
//! surface has a clip region, the shapes go into a clip layer shaped like
//! it, so nothing outside the workspace shows.

use fv_core::model::{Color as FvColor, ObjectSet, Shape, ShapeKind, Style};
use fv_core::{NodeIndex, Surface};
use kurbo::{Affine, BezPath, Stroke};
use peniko::{Color, Fill, Mix};
use vello::Scene;

/// Paint the whole surface into a freshly-cleared `Scene`.
pub fn paint_surface(scene: &mut Scene, surface: &Surface) {
    let view = surface.viewport_transform();

    let clip = surface.clip_path();
    if let Some(clip) = clip {
        scene.push_layer(Mix::Clip, 1.0, view * clip.local_transform(), &clip.outline());
    }

    for idx in surface.objects.top_level() {
        paint_node(scene, &surface.objects, idx, view);
    }

    if clip.is_some() {
        scene.pop_layer();
    }
}

fn paint_node(scene: &mut Scene, objects: &ObjectSet, idx: NodeIndex, parent: Affine) {
    let Some(shape) = objects.get(idx) else {
        return;
    };
    let transform = parent * shape.local_transform();

    match &shape.kind {
        ShapeKind::Root => {}
        ShapeKind::Group { .. } => {
            if shape.style.fill.is_some() {
                paint_shape(scene, shape, transform);
            }
            for child in objects.children(idx) {
                paint_node(scene, objects, child, transform);
            }
        }
        ShapeKind::Rect { .. } | ShapeKind::Ellipse { .. } | ShapeKind::Path { .. } => {
            log::trace!(
                "PAINT {:?} at ({}, {})",
                shape.name,
                shape.left,
                shape.top
            );
            paint_shape(scene, shape, transform);
        }
    }
}

fn paint_shape(scene: &mut Scene, shape: &Shape, transform: Affine) {
    let outline = shape.outline();
    fill_shape(scene, &outline, &shape.style, transform);
    stroke_shape(scene, &outline, &shape.style, transform);
}

// ─── Fill and stroke ─────────────────────────────────────────────────────────

fn fill_shape(scene: &mut Scene, outline: &BezPath, style: &Style, transform: Affine) {
    if let Some(fill) = style.fill {
        scene.fill(
            Fill::NonZero,
            transform,
            to_peniko(fill, style.opacity),
            None,
            outline,
        );
    }
}

fn stroke_shape(scene: &mut Scene, outline: &BezPath, style: &Style, transform: Affine) {
    if let Some(stroke) = style.stroke {
        scene.stroke(
            &Stroke::new(stroke.width),
            transform,
            to_peniko(stroke.color, style.opacity),
            None,
            outline,
        );
    }
}

fn to_peniko(color: FvColor, opacity: Option<f32>) -> Color {
    let alpha = opacity.unwrap_or(1.0).clamp(0.0, 1.0);
    Color::new([color.r, color.g, color.b, color.a * alpha])
}
