//! Keeps a surface bound to the size of its container.
//!
//! `ResizeSync` holds two optional handles. While both are present it owns
//! exactly one resize observation on the container; each notification runs
//! [`fit_surface`] synchronously. The observation is dropped as soon as
//! either handle goes away or is swapped for a different one, so no
//! callback ever reaches a stale surface.

use crate::fit::{FitOutcome, fit_surface};
use fv_core::{FitConfig, Size, Surface};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared, single-threaded handle to a host-owned surface.
pub type SurfaceHandle = Rc<RefCell<Surface>>;

/// Invoked by a container whenever its size changes.
pub type ResizeCallback = Box<dyn FnMut()>;

/// A host panel whose size drives the surface.
pub trait Container {
    /// Current content-box size in pixels.
    fn content_size(&self) -> Size;

    /// Start delivering size-change notifications to `on_resize` until the
    /// returned guard is dropped.
    ///
    /// # Errors
    /// Returns a message if the platform refuses the subscription.
    fn observe(&self, on_resize: ResizeCallback) -> Result<Observation, String>;
}

/// An active resize subscription. Dropping it unsubscribes.
#[must_use = "dropping an Observation stops it immediately"]
pub struct Observation {
    release: Option<Box<dyn FnOnce()>>,
}

impl Observation {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("active", &self.release.is_some())
            .finish()
    }
}

pub struct ResizeSync<C: Container + 'static> {
    surface: Option<SurfaceHandle>,
    container: Option<Rc<C>>,
    config: Rc<FitConfig>,
    observation: Option<Observation>,
}

impl<C: Container + 'static> ResizeSync<C> {
    pub fn new(config: FitConfig) -> Self {
        Self {
            surface: None,
            container: None,
            config: Rc::new(config),
            observation: None,
        }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Set or clear the surface. Re-binds only if the handle identity changed.
    pub fn set_surface(&mut self, surface: Option<SurfaceHandle>) {
        if same_handle(&self.surface, &surface) {
            return;
        }
        self.surface = surface;
        self.rebind();
    }

    /// Set or clear the container. Re-binds only if the handle identity changed.
    pub fn set_container(&mut self, container: Option<Rc<C>>) {
        if same_handle(&self.container, &container) {
            return;
        }
        self.container = container;
        self.rebind();
    }

    /// Fit the surface to the container now. No-op unless both are present.
    pub fn recompute_view(&self) -> FitOutcome {
        match (&self.surface, &self.container) {
            (Some(surface), Some(container)) => {
                recompute(surface, container.as_ref(), &self.config)
            }
            _ => FitOutcome::Skipped,
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    /// Stop observing and forget both handles.
    pub fn dispose(&mut self) {
        self.observation = None;
        self.surface = None;
        self.container = None;
    }

    fn rebind(&mut self) {
        // Release first so the old callback can't fire during re-subscription.
        self.observation = None;

        let (Some(surface), Some(container)) = (&self.surface, &self.container) else {
            return;
        };

        let weak_surface: Weak<RefCell<Surface>> = Rc::downgrade(surface);
        let weak_container: Weak<C> = Rc::downgrade(container);
        let config = Rc::clone(&self.config);
        let on_resize: ResizeCallback = Box::new(move || {
            let (Some(surface), Some(container)) = (weak_surface.upgrade(), weak_container.upgrade())
            else {
                return;
            };
            recompute(&surface, container.as_ref(), &config);
        });

        match container.observe(on_resize) {
            Ok(observation) => self.observation = Some(observation),
            Err(e) => log::warn!("resize: could not observe container: {e}"),
        }
    }
}

impl<C: Container + 'static> Drop for ResizeSync<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn recompute<C: Container + ?Sized>(
    surface: &RefCell<Surface>,
    container: &C,
    config: &FitConfig,
) -> FitOutcome {
    let size = container.content_size();
    match surface.try_borrow_mut() {
        Ok(mut surface) => fit_surface(&mut surface, size, config),
        Err(_) => {
            log::warn!("resize: surface is borrowed, skipping fit");
            FitOutcome::Skipped
        }
    }
}

fn same_handle<T: ?Sized>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
