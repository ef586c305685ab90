pub mod fit;
pub mod resize;

pub use fit::{FitOutcome, fit_surface};
pub use resize::{Container, Observation, ResizeCallback, ResizeSync, SurfaceHandle};
