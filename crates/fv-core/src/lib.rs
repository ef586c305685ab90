pub mod config;
pub mod id;
pub mod model;
pub mod snapshot;
pub mod surface;
pub mod viewport;

pub use config::FitConfig;
pub use id::NameTag;
pub use model::*;
pub use surface::Surface;

// Re-export geometry types so downstream crates don't need direct dependencies
pub use kurbo::{Affine, PathEl, Point, Rect, Size};
pub use petgraph::graph::NodeIndex;
