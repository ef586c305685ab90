//! Fit a surface to a container size.
//!
//! One pass does the whole job: copy the container size onto the surface,
//! zoom so the workspace marker fits with a margin, center the marker, and
//! clip to it. The marker is looked up by name on every call because the
//! object set may have been replaced since the previous one.

use fv_core::viewport::{self, find_scale_to_fit, is_usable_size};
use fv_core::{Affine, FitConfig, Point, Size, Surface};

/// Which path a fit took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// Surface or container missing; nothing was touched.
    Skipped,
    /// Container or marker has no usable size. Dimensions were copied,
    /// camera and clip left as they were.
    Degenerate,
    /// No workspace marker. Dimensions copied, camera reset to identity.
    Unmarked,
    /// Marker fitted and centered at `center` (world coordinates).
    Fitted { zoom: f64, center: Point },
}

pub fn fit_surface(surface: &mut Surface, container: Size, config: &FitConfig) -> FitOutcome {
    surface.set_dimensions(container);
    surface.request_render();

    if !is_usable_size(container) {
        log::debug!(
            "fit: container {}x{} has no area, camera unchanged",
            container.width,
            container.height
        );
        return FitOutcome::Degenerate;
    }

    let Some(marker_idx) = surface.objects.find_by_name(&config.workspace_tag) else {
        surface.set_viewport_transform(Affine::IDENTITY);
        log::debug!("fit: no `{}` marker, camera reset", config.workspace_tag);
        return FitOutcome::Unmarked;
    };
    let marker = surface.objects.graph[marker_idx].clone();

    let marker_size = marker.intrinsic_size();
    if !is_usable_size(marker_size) {
        log::debug!(
            "fit: marker `{}` is {}x{}, camera unchanged",
            config.workspace_tag,
            marker_size.width,
            marker_size.height
        );
        return FitOutcome::Degenerate;
    }

    let zoom = config.zoom_ratio * find_scale_to_fit(marker_size, container);

    surface.set_viewport_transform(Affine::IDENTITY);
    surface.zoom_to_point(surface.center(), zoom);

    let center = marker.center_point();
    let centered = viewport::center_on(surface.viewport_transform(), center, surface.center());
    surface.set_viewport_transform(centered);

    log::debug!(
        "fit: {}x{} zoom={zoom:.4} translate=({:.2}, {:.2})",
        container.width,
        container.height,
        centered.translation().x,
        centered.translation().y
    );

    surface.set_clip_path(Some(marker));
    FitOutcome::Fitted { zoom, center }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::Shape;

    const EPS: f64 = 1e-9;

    fn surface_with_marker(marker: Shape) -> Surface {
        let mut s = Surface::new(10.0, 10.0);
        s.objects.add(Shape::rect(-50.0, -50.0, 20.0, 20.0));
        s.objects.add(marker.named("clip"));
        s
    }

    #[test]
    fn fits_scenario_800x600() {
        let mut s = surface_with_marker(Shape::rect(0.0, 0.0, 400.0, 300.0));
        let outcome = fit_surface(&mut s, Size::new(800.0, 600.0), &FitConfig::default());

        let FitOutcome::Fitted { zoom, center } = outcome else {
            panic!("expected fitted, got {outcome:?}");
        };
        assert!((zoom - 1.7).abs() < EPS);
        assert_eq!(center, Point::new(200.0, 150.0));

        let [a, _, _, d, e, f] = s.viewport_transform().as_coeffs();
        assert!((a - 1.7).abs() < EPS && (d - 1.7).abs() < EPS);
        assert!((e - (400.0 - 200.0 * 1.7)).abs() < EPS);
        assert!((f - (300.0 - 150.0 * 1.7)).abs() < EPS);

        let mapped = s.world_to_screen(center);
        assert!((mapped.x - 400.0).abs() < EPS);
        assert!((mapped.y - 300.0).abs() < EPS);
        assert_eq!(s.size(), Size::new(800.0, 600.0));
        assert!(s.take_render_request());
    }

    #[test]
    fn clip_is_an_independent_copy_of_the_marker() {
        let mut s = surface_with_marker(Shape::rect(10.0, 10.0, 100.0, 50.0));
        fit_surface(&mut s, Size::new(300.0, 300.0), &FitConfig::default());

        let idx = s.objects.find_by_name("clip").unwrap();
        s.objects.get_mut(idx).unwrap().left = 999.0;

        let clip = s.clip_path().unwrap();
        assert_eq!(clip.left, 10.0);
        assert_eq!(clip.name.map(|n| n.as_str().to_string()), Some("clip".into()));
    }

    #[test]
    fn scaled_marker_uses_intrinsic_size_and_scaled_center() {
        let mut marker = Shape::rect(0.0, 0.0, 100.0, 100.0);
        marker.scale_x = 2.0;
        marker.scale_y = 2.0;
        let mut s = surface_with_marker(marker);
        let outcome = fit_surface(&mut s, Size::new(500.0, 1000.0), &FitConfig::default());

        let FitOutcome::Fitted { zoom, center } = outcome else {
            panic!("expected fitted, got {outcome:?}");
        };
        assert!((zoom - 0.85 * 5.0).abs() < EPS);
        assert_eq!(center, Point::new(100.0, 100.0));
        let mapped = s.world_to_screen(center);
        assert!((mapped.x - 250.0).abs() < EPS);
        assert!((mapped.y - 500.0).abs() < EPS);
    }

    #[test]
    fn no_marker_resets_camera_and_leaves_clip_alone() {
        let mut s = Surface::new(10.0, 10.0);
        s.objects.add(Shape::rect(0.0, 0.0, 400.0, 300.0).named("not_clip"));
        s.set_viewport_transform(Affine::scale(3.0));

        let outcome = fit_surface(&mut s, Size::new(640.0, 480.0), &FitConfig::default());
        assert_eq!(outcome, FitOutcome::Unmarked);
        assert_eq!(s.viewport_transform(), Affine::IDENTITY);
        assert!(s.clip_path().is_none());
        assert_eq!(s.size(), Size::new(640.0, 480.0));
    }

    #[test]
    fn zero_sized_container_copies_size_but_keeps_camera() {
        let mut s = surface_with_marker(Shape::rect(0.0, 0.0, 400.0, 300.0));
        let before = Affine::new([2.0, 0.0, 0.0, 2.0, 5.0, 5.0]);
        s.set_viewport_transform(before);

        let outcome = fit_surface(&mut s, Size::new(0.0, 600.0), &FitConfig::default());
        assert_eq!(outcome, FitOutcome::Degenerate);
        assert_eq!(s.viewport_transform(), before);
        assert_eq!(s.width(), 0.0);
        assert!(s.clip_path().is_none());
    }

    #[test]
    fn zero_sized_marker_is_degenerate() {
        let mut s = surface_with_marker(Shape::rect(0.0, 0.0, 0.0, 300.0));
        let outcome = fit_surface(&mut s, Size::new(800.0, 600.0), &FitConfig::default());
        assert_eq!(outcome, FitOutcome::Degenerate);
        assert_eq!(s.viewport_transform(), Affine::IDENTITY);
    }

    #[test]
    fn custom_ratio_and_tag() {
        let mut s = Surface::new(1.0, 1.0);
        s.objects.add(Shape::rect(0.0, 0.0, 100.0, 100.0).named("workspace"));
        let config = FitConfig {
            zoom_ratio: 1.0,
            workspace_tag: "workspace".into(),
        };
        let outcome = fit_surface(&mut s, Size::new(200.0, 400.0), &config);
        assert!(matches!(outcome, FitOutcome::Fitted { zoom, .. } if (zoom - 2.0).abs() < EPS));
    }
}
