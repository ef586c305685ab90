//! Shapes and the object set a surface draws.
//!
//! The object set is a tree rooted at a synthetic node: top-level shapes
//! are the surface's children, and `Group` shapes own nested children whose
//! coordinates are relative to the group origin. Shapes carry an optional
//! interned name; the workspace marker is found by that name on demand.

use crate::id::NameTag;
use kurbo::{Affine, BezPath, Ellipse, Point, Rect, Shape as _, Size};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Colors & Style ──────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let channel = |i: usize| -> Option<f32> {
            let v = hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?;
            Some(v as f32 / 255.0)
        };
        match bytes.len() {
            6 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 1.0)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// CSS `rgba(...)` string for Canvas2D fill/stroke styles.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Visual style of a shape. Everything is optional; unset means "don't paint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub opacity: Option<f32>,
}

// ─── Path data ───────────────────────────────────────────────────────────

/// A single path command in shape-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64),            // control, end
    CubicTo(f64, f64, f64, f64, f64, f64), // c1, c2, end
    Close,
}

/// Build a kurbo path from commands, offset by `origin`.
pub fn bez_path(commands: &[PathCmd], origin: Point) -> BezPath {
    let (dx, dy) = (origin.x, origin.y);
    let mut bez = BezPath::new();
    for cmd in commands {
        match *cmd {
            PathCmd::MoveTo(x, y) => bez.move_to((dx + x, dy + y)),
            PathCmd::LineTo(x, y) => bez.line_to((dx + x, dy + y)),
            PathCmd::QuadTo(cx, cy, ex, ey) => bez.quad_to((dx + cx, dy + cy), (dx + ex, dy + ey)),
            PathCmd::CubicTo(c1x, c1y, c2x, c2y, ex, ey) => bez.curve_to(
                (dx + c1x, dy + c1y),
                (dx + c2x, dy + c2y),
                (dx + ex, dy + ey),
            ),
            PathCmd::Close => bez.close_path(),
        }
    }
    bez
}

// ─── Shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Synthetic root of an object set. Never drawn.
    Root,

    /// Container with a declared size; children are positioned relative
    /// to its top-left corner.
    Group { width: f64, height: f64 },

    Rect { width: f64, height: f64 },

    Ellipse { rx: f64, ry: f64 },

    /// Freeform path. Commands are relative to the shape's `left`/`top`.
    Path { commands: SmallVec<[PathCmd; 8]> },
}

/// A drawable object placed on the surface.
///
/// `left`/`top` is the top-left corner in world coordinates; `scale_x` and
/// `scale_y` stretch the intrinsic size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default)]
    pub name: Option<NameTag>,
    pub kind: ShapeKind,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    #[serde(default)]
    pub style: Style,
}

fn one() -> f64 {
    1.0
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            name: None,
            kind,
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            style: Style::default(),
        }
    }

    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rect { width, height }).at(left, top)
    }

    pub fn ellipse(left: f64, top: f64, rx: f64, ry: f64) -> Self {
        Self::new(ShapeKind::Ellipse { rx, ry }).at(left, top)
    }

    #[must_use]
    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(NameTag::intern(name));
        self
    }

    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn has_name(&self, tag: NameTag) -> bool {
        self.name == Some(tag)
    }

    /// Unscaled width and height.
    pub fn intrinsic_size(&self) -> Size {
        match &self.kind {
            ShapeKind::Root => Size::ZERO,
            ShapeKind::Group { width, height } | ShapeKind::Rect { width, height } => {
                Size::new(*width, *height)
            }
            ShapeKind::Ellipse { rx, ry } => Size::new(rx * 2.0, ry * 2.0),
            ShapeKind::Path { commands } => {
                if commands.is_empty() {
                    return Size::ZERO;
                }
                bez_path(commands, Point::ZERO).bounding_box().size()
            }
        }
    }

    /// Axis-aligned bounds in world coordinates, scale applied.
    pub fn bounding_rect(&self) -> Rect {
        let size = self.intrinsic_size();
        Rect::new(
            self.left,
            self.top,
            self.left + size.width * self.scale_x,
            self.top + size.height * self.scale_y,
        )
    }

    pub fn center_point(&self) -> Point {
        self.bounding_rect().center()
    }

    /// Maps shape-local coordinates (origin at the top-left corner, unscaled)
    /// into the parent's coordinates.
    pub fn local_transform(&self) -> Affine {
        Affine::translate((self.left, self.top)) * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Outline in shape-local coordinates.
    pub fn outline(&self) -> BezPath {
        const TOLERANCE: f64 = 0.1;
        match &self.kind {
            ShapeKind::Root => BezPath::new(),
            ShapeKind::Group { width, height } | ShapeKind::Rect { width, height } => {
                Rect::new(0.0, 0.0, *width, *height).to_path(TOLERANCE)
            }
            ShapeKind::Ellipse { rx, ry } => {
                Ellipse::new((*rx, *ry), (*rx, *ry), 0.0).to_path(TOLERANCE)
            }
            ShapeKind::Path { commands } => bez_path(commands, Point::ZERO),
        }
    }
}

// ─── Object set ──────────────────────────────────────────────────────────

/// The shapes a surface draws, in paint order.
///
/// Indices stay valid across removals of other shapes, but consumers that
/// react to resize events resolve shapes by name each time instead of
/// keeping indices around.
#[derive(Debug, Clone)]
pub struct ObjectSet {
    pub graph: StableDiGraph<Shape, ()>,
    pub root: NodeIndex,
}

impl ObjectSet {
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(Shape::new(ShapeKind::Root));
        Self { graph, root }
    }

    /// Append a top-level shape. Returns its index.
    pub fn add(&mut self, shape: Shape) -> NodeIndex {
        self.add_child(self.root, shape)
    }

    /// Append `shape` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeIndex, shape: Shape) -> NodeIndex {
        let idx = self.graph.add_node(shape);
        self.graph.add_edge(parent, idx, ());
        idx
    }

    /// Remove a shape and everything below it.
    pub fn remove(&mut self, idx: NodeIndex) -> Option<Shape> {
        if idx == self.root {
            return None;
        }
        for child in self.children(idx) {
            self.remove(child);
        }
        self.graph.remove_node(idx)
    }

    /// Drop every shape, keeping the root.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&Shape> {
        self.graph.node_weight(idx)
    }

    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut Shape> {
        self.graph.node_weight_mut(idx)
    }

    /// Children of a node in insertion (paint) order.
    ///
    /// Sorted by `NodeIndex` so the order doesn't depend on how petgraph
    /// walks its adjacency list.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Top-level shapes in paint order.
    pub fn top_level(&self) -> Vec<NodeIndex> {
        self.children(self.root)
    }

    /// First top-level shape carrying `name`, in paint order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        let tag = NameTag::get(name)?;
        self.top_level()
            .into_iter()
            .find(|&idx| self.graph[idx].has_name(tag))
    }

    /// Number of shapes, root excluded.
    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ObjectSet {
    fn default() -> Self {
        Self::new()
    }
}
