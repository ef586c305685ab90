//! Camera math for the surface viewport transform.
//!
//! The viewport transform maps world coordinates to surface pixels. It is
//! kept as a pure scale + translation: `[a, 0, 0, d, e, f]` in kurbo's
//! coefficient order, where `a`/`d` are the horizontal/vertical zoom and
//! `e`/`f` the translation.

use kurbo::{Affine, Point, Size, Vec2};

/// Largest uniform scale that fits `source` inside `destination`,
/// aspect ratio preserved.
///
/// Zero-sized inputs yield `0`, `inf`, or `NaN`; callers guard with
/// [`is_usable_size`] first.
pub fn find_scale_to_fit(source: Size, destination: Size) -> f64 {
    (destination.width / source.width).min(destination.height / source.height)
}

/// Both dimensions finite and strictly positive.
pub fn is_usable_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Set the zoom of `transform` to `zoom`, keeping the world point under the
/// screen position `point` fixed on screen.
pub fn zoom_to_point(transform: Affine, point: Point, zoom: f64) -> Affine {
    let world = transform.inverse() * point;
    let [_, b, c, _, _, _] = transform.as_coeffs();
    let scaled = Affine::new([zoom, b, c, zoom, 0.0, 0.0]);
    let drift = point - scaled * world;
    Affine::translate(drift) * scaled
}

/// Replace the translation of `transform` so `world` lands on `screen`,
/// using the current zoom.
pub fn center_on(transform: Affine, world: Point, screen: Point) -> Affine {
    let [a, b, c, d, _, _] = transform.as_coeffs();
    Affine::new([a, b, c, d, screen.x - world.x * a, screen.y - world.y * d])
}

/// Horizontal zoom component.
pub fn zoom_of(transform: Affine) -> f64 {
    transform.as_coeffs()[0]
}

pub fn translation_of(transform: Affine) -> Vec2 {
    transform.translation()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scale_to_fit_picks_tighter_axis() {
        let s = find_scale_to_fit(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        assert!(approx(s, 2.0));
        let s = find_scale_to_fit(Size::new(400.0, 100.0), Size::new(800.0, 600.0));
        assert!(approx(s, 2.0));
        let s = find_scale_to_fit(Size::new(100.0, 300.0), Size::new(800.0, 600.0));
        assert!(approx(s, 2.0));
        let s = find_scale_to_fit(Size::new(1000.0, 300.0), Size::new(800.0, 600.0));
        assert!(approx(s, 0.8));
    }

    #[test]
    fn usable_size_rejects_degenerate() {
        assert!(is_usable_size(Size::new(1.0, 1.0)));
        assert!(!is_usable_size(Size::new(0.0, 600.0)));
        assert!(!is_usable_size(Size::new(800.0, -1.0)));
        assert!(!is_usable_size(Size::new(f64::NAN, 1.0)));
        assert!(!is_usable_size(Size::new(f64::INFINITY, 1.0)));
    }

    #[test]
    fn zoom_from_identity_keeps_point_fixed() {
        let p = Point::new(400.0, 300.0);
        let t = zoom_to_point(Affine::IDENTITY, p, 1.7);
        let mapped = t * p;
        assert!(approx(mapped.x, 400.0));
        assert!(approx(mapped.y, 300.0));
        let [a, _, _, d, e, f] = t.as_coeffs();
        assert!(approx(a, 1.7) && approx(d, 1.7));
        assert!(approx(e, 400.0 - 400.0 * 1.7));
        assert!(approx(f, 300.0 - 300.0 * 1.7));
    }

    #[test]
    fn zoom_from_panned_transform_keeps_world_point_under_screen_point() {
        let start = Affine::new([2.0, 0.0, 0.0, 2.0, 50.0, -20.0]);
        let p = Point::new(120.0, 80.0);
        let world_before = start.inverse() * p;
        let t = zoom_to_point(start, p, 0.5);
        let screen_after = t * world_before;
        assert!(approx(screen_after.x, p.x));
        assert!(approx(screen_after.y, p.y));
        assert!(approx(zoom_of(t), 0.5));
    }

    #[test]
    fn center_on_maps_world_to_screen() {
        let t = Affine::new([1.7, 0.0, 0.0, 1.7, 12.0, 34.0]);
        let t = center_on(t, Point::new(200.0, 150.0), Point::new(400.0, 300.0));
        let mapped = t * Point::new(200.0, 150.0);
        assert!(approx(mapped.x, 400.0));
        assert!(approx(mapped.y, 300.0));
        assert!(approx(zoom_of(t), 1.7));
        assert!(approx(translation_of(t).x, 400.0 - 200.0 * 1.7));
    }
}
