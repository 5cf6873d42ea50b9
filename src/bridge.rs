//! Scripting-bridge handles and their per-element cache.
//!
//! A bridge handle lets a script call into a running plugin or applet. The
//! handle refers to the widget it was obtained from, so its lifetime is nested
//! inside the widget's, which is in turn nested inside the element's attached
//! period. The element is the handle's only owner; dropping the handle is
//! what releases it on the host side.

use core::any::Any;
use core::fmt;

use crate::element::ElementKind;
use crate::host::{Frame, WidgetId};

/// Opaque scripting handle produced by the host's [`Frame`].
///
/// The wrapped value is whatever the host needs to keep the bridge alive; its
/// `Drop` implementation is the release hook.
pub struct BridgeHandle {
    inner: Box<dyn Any>,
}

impl BridgeHandle {
    /// Wraps a host-side bridge instance.
    pub fn new<T: Any>(instance: T) -> Self {
        Self {
            inner: Box::new(instance),
        }
    }

    /// Borrows the host-side instance if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeHandle").finish_non_exhaustive()
    }
}

/// Outcome of a cache lookup.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// Nothing has been requested since the last reset.
    Miss,
    /// A handle was obtained earlier.
    Ready(&'a BridgeHandle),
    /// The host was asked and answered that no handle exists.
    Unavailable,
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Ready(BridgeHandle),
    Unavailable,
}

/// Lazily filled, exclusively owned bridge handle of one element.
///
/// Both a handle and a definitive "unavailable" answer stay cached until
/// [`BridgeCache::clear`], which the lifecycle calls on every detach.
#[derive(Debug, Default)]
pub struct BridgeCache {
    slot: Slot,
}

impl BridgeCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: Slot::Empty }
    }

    /// Looks up the cached outcome without side effects.
    #[must_use]
    pub const fn lookup(&self) -> Lookup<'_> {
        match &self.slot {
            Slot::Empty => Lookup::Miss,
            Slot::Ready(handle) => Lookup::Ready(handle),
            Slot::Unavailable => Lookup::Unavailable,
        }
    }

    /// Returns the cached handle, if one is held.
    #[must_use]
    pub const fn handle(&self) -> Option<&BridgeHandle> {
        match &self.slot {
            Slot::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    /// Whether a live handle is held.
    #[must_use]
    pub const fn is_holding(&self) -> bool {
        matches!(self.slot, Slot::Ready(_))
    }

    /// Records the result of a host request, replacing any previous outcome.
    pub fn store(&mut self, handle: Option<BridgeHandle>) -> Option<&BridgeHandle> {
        self.slot = handle.map_or(Slot::Unavailable, Slot::Ready);
        self.handle()
    }

    /// Drops the cached handle (releasing it) and forgets any cached outcome.
    ///
    /// Returns `true` if a live handle was released.
    pub fn clear(&mut self) -> bool {
        matches!(core::mem::take(&mut self.slot), Slot::Ready(_))
    }
}

/// Requests a handle for `widget` in the order appropriate for `kind`.
///
/// Objects and embeds may host an applet, so their own request falls back to
/// the applet flavour on the same widget.
pub(crate) fn acquire(
    frame: &mut dyn Frame,
    widget: WidgetId,
    kind: ElementKind,
) -> Option<BridgeHandle> {
    match kind {
        ElementKind::Object => frame
            .object_instance_for_widget(widget)
            .or_else(|| frame.applet_instance_for_widget(widget)),
        ElementKind::Embed => frame
            .embed_instance_for_widget(widget)
            .or_else(|| frame.applet_instance_for_widget(widget)),
        ElementKind::Applet => frame.applet_instance_for_widget(widget),
        ElementKind::Param => None,
    }
}
