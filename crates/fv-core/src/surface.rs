//! The drawing surface: pixel size, camera, clip region, and object set.

use crate::model::{ObjectSet, Shape};
use crate::viewport;
use kurbo::{Affine, Point, Size};

#[derive(Debug, Clone)]
pub struct Surface {
    width: f64,
    height: f64,
    viewport_transform: Affine,
    /// Everything outside this shape is masked out when painting.
    clip_path: Option<Shape>,
    pub objects: ObjectSet,
    render_requested: bool,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            viewport_transform: Affine::IDENTITY,
            clip_path: None,
            objects: ObjectSet::new(),
            render_requested: false,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_dimensions(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    /// Geometric center in surface pixels.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn viewport_transform(&self) -> Affine {
        self.viewport_transform
    }

    pub fn set_viewport_transform(&mut self, transform: Affine) {
        self.viewport_transform = transform;
    }

    pub fn zoom(&self) -> f64 {
        viewport::zoom_of(self.viewport_transform)
    }

    /// Zoom about a surface-pixel point.
    pub fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        self.viewport_transform = viewport::zoom_to_point(self.viewport_transform, point, zoom);
    }

    pub fn clip_path(&self) -> Option<&Shape> {
        self.clip_path.as_ref()
    }

    pub fn set_clip_path(&mut self, clip: Option<Shape>) {
        self.clip_path = clip;
    }

    /// Swap the whole object set. Anything that held indices into the old
    /// set must look its shapes up again.
    pub fn replace_objects(&mut self, objects: ObjectSet) -> ObjectSet {
        std::mem::replace(&mut self.objects, objects)
    }

    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Returns whether a render was requested since the last call, and clears it.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.viewport_transform * world
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.viewport_transform.inverse() * screen
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
