//! Viewport dimension sources and enable-gated tracking.
//!
//! The hosting application owns the real dimension API. This module only
//! defines the boundary it must satisfy ([`ViewportSource`]: a synchronous
//! `get` plus a change subscription with a remove handle) and the tracker
//! that style sheets use to follow it.
//!
//! A [`ViewportTracker`] attaches its listener only while enabled. Style
//! sheets enable it when styles resolve on the client, so a markup surface
//! that has not mounted yet never reads live dimensions.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Current window metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub font_scale: f64,
}

impl Dimensions {
    /// Dimensions with unit pixel ratio and font scale.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            font_scale: 1.0,
        }
    }

    /// Returns a copy with the given font scale.
    pub fn with_font_scale(mut self, font_scale: f64) -> Self {
        self.font_scale = font_scale;
        self
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Push source of viewport dimensions.
pub trait ViewportSource {
    /// Returns the current dimensions.
    fn get(&self) -> Dimensions;

    /// Registers a change listener. Dropping the returned [`Subscription`]
    /// removes it.
    fn subscribe(&self, listener: Rc<dyn Fn(Dimensions)>) -> Subscription;
}

/// Handle for a registered listener; removes it when dropped.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// A subscription with nothing to remove.
    pub fn noop() -> Self {
        Self { remove: None }
    }

    /// Removes the listener now.
    pub fn remove(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

type Listeners = Vec<(u64, Rc<dyn Fn(Dimensions)>)>;

/// An in-process viewport whose size is set explicitly.
///
/// Used by hosts that drive dimensions themselves and by tests.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{Dimensions, ManualViewport, ViewportSource};
/// use std::rc::Rc;
/// use std::cell::Cell;
///
/// let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
/// let seen = Rc::new(Cell::new(0.0));
/// let sink = seen.clone();
/// let sub = viewport.subscribe(Rc::new(move |d: Dimensions| sink.set(d.width)));
///
/// viewport.set(Dimensions::new(600.0, 800.0));
/// assert_eq!(seen.get(), 600.0);
/// drop(sub);
/// assert_eq!(viewport.listener_count(), 0);
/// ```
#[derive(Clone)]
pub struct ManualViewport {
    dimensions: Rc<Cell<Dimensions>>,
    listeners: Rc<RefCell<Listeners>>,
    next_id: Rc<Cell<u64>>,
}

impl ManualViewport {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions: Rc::new(Cell::new(dimensions)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Updates the dimensions and notifies every listener.
    pub fn set(&self, dimensions: Dimensions) {
        self.dimensions.set(dimensions);
        // Snapshot so listeners may subscribe or unsubscribe while notified.
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(dimensions);
        }
    }

    /// Number of currently attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Default for ManualViewport {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

impl ViewportSource for ManualViewport {
    fn get(&self) -> Dimensions {
        self.dimensions.get()
    }

    fn subscribe(&self, listener: Rc<dyn Fn(Dimensions)>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}

impl fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualViewport")
            .field("dimensions", &self.dimensions.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Follows a [`ViewportSource`] while enabled.
///
/// The source is not read until the tracker is first enabled; until then
/// [`ViewportTracker::dimensions`] reports zero-sized dimensions. The last
/// seen dimensions are cached; a notification carrying identical
/// dimensions is ignored so dependent memos do not recompute.
pub struct ViewportTracker {
    source: Rc<dyn ViewportSource>,
    current: Rc<Cell<Dimensions>>,
    subscription: Option<Subscription>,
}

impl ViewportTracker {
    pub fn new(source: Rc<dyn ViewportSource>) -> Self {
        Self {
            source,
            current: Rc::new(Cell::new(Dimensions::default())),
            subscription: None,
        }
    }

    /// Attaches or detaches the change listener.
    ///
    /// Enabling re-reads the source immediately so changes that happened
    /// while detached are picked up.
    pub fn set_enabled(&mut self, enabled: bool) {
        match (enabled, self.subscription.is_some()) {
            (true, false) => {
                let current = self.current.clone();
                let listener: Rc<dyn Fn(Dimensions)> = Rc::new(move |next: Dimensions| {
                    if current.get() != next {
                        log::trace!("viewport changed to {}x{}", next.width, next.height);
                        current.set(next);
                    }
                });
                self.subscription = Some(self.source.subscribe(listener.clone()));
                listener(self.source.get());
            }
            (false, true) => {
                if let Some(subscription) = self.subscription.take() {
                    subscription.remove();
                }
            }
            _ => {}
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// The dimensions last observed while enabled.
    pub fn dimensions(&self) -> Dimensions {
        self.current.get()
    }

    /// The underlying source, for live reads.
    pub fn source(&self) -> Rc<dyn ViewportSource> {
        self.source.clone()
    }

    /// The cell the listener writes to. Readers see updates without going
    /// through the tracker.
    pub fn shared(&self) -> Rc<Cell<Dimensions>> {
        self.current.clone()
    }
}

impl fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("dimensions", &self.current.get())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
