//! Hit testing: screen point → shape lookup.
//!
//! Screen points go through the inverse viewport transform first. Points
//! outside the clip region never hit anything, since nothing is visible
//! there.

use fv_core::{NodeIndex, Point, Surface};

/// Topmost top-level shape under the screen position `screen`.
/// Returns `None` for background or clipped-away points.
pub fn hit_test(surface: &Surface, screen: Point) -> Option<NodeIndex> {
    let world = surface.screen_to_world(screen);

    if let Some(clip) = surface.clip_path()
        && !clip.bounding_rect().contains(world)
    {
        return None;
    }

    // Last painted = topmost
    surface
        .objects
        .top_level()
        .into_iter()
        .rev()
        .find(|&idx| {
            surface
                .objects
                .get(idx)
                .is_some_and(|shape| shape.bounding_rect().contains(world))
        })
}
