use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The lifecycle events a registry reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// An instance entered the collection through the creating path.
    Create,
    /// An instance was removed from the collection.
    Delete,
}

impl Lifecycle {
    /// Both events, in a fixed order.
    pub const ALL: [Self; 2] = [Self::Create, Self::Delete];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared hook handle.
///
/// The `Arc` is the hook's identity: binding a clone of an already-bound
/// handle is suppressed, and [`LifecycleHooks::unbind`] removes by the same
/// handle. Two separately constructed closures are always distinct, even if
/// their bodies are identical.
pub type Hook<S, P> = Arc<dyn Fn(&S, &P) + Send + Sync>;

/// Wraps a closure into a [`Hook`] handle.
///
/// # Examples
/// ```rust
/// use corral_hooks::{Hook, hook};
///
/// let h: Hook<(), u64> = hook(|(), id| println!("created #{id}"));
/// ```
pub fn hook<S, P>(f: impl Fn(&S, &P) + Send + Sync + 'static) -> Hook<S, P> {
    Arc::new(f)
}

/// An owned dispatcher for the two lifecycle events.
///
/// `S` is the source passed to every hook as the first argument (the
/// registry, for registry hooks) and `P` the event payload (the affected
/// entry). Dispatch is synchronous: [`emit`](Self::emit) invokes every bound
/// hook inline, in bind order, and returns only when the last one has.
///
/// Dispatch iterates a snapshot taken at emit time, and no lock is held while
/// hooks run, so a hook may bind, unbind, or emit again; such changes affect
/// the next dispatch, not the current one.
pub struct LifecycleHooks<S, P> {
    create: RwLock<Vec<Hook<S, P>>>,
    delete: RwLock<Vec<Hook<S, P>>>,
}

impl<S, P> Default for LifecycleHooks<S, P> {
    fn default() -> Self {
        Self { create: RwLock::new(Vec::new()), delete: RwLock::new(Vec::new()) }
    }
}

impl<S, P> LifecycleHooks<S, P> {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, event: Lifecycle) -> &RwLock<Vec<Hook<S, P>>> {
        match event {
            Lifecycle::Create => &self.create,
            Lifecycle::Delete => &self.delete,
        }
    }

    /// Binds a hook to an event.
    ///
    /// Returns `false` if this exact handle is already bound to the event;
    /// the hook then keeps its original position and fires once per emit.
    pub fn bind(&self, event: Lifecycle, hook: Hook<S, P>) -> bool {
        let mut slot = self.slot(event).write();
        if slot.iter().any(|bound| Arc::ptr_eq(bound, &hook)) {
            trace!(event = %event, "Hook already bound; bind suppressed");
            return false;
        }
        slot.push(hook);
        true
    }

    /// Unbinds a previously bound hook.
    ///
    /// Returns `false` (a no-op) if the handle is not bound to the event.
    pub fn unbind(&self, event: Lifecycle, hook: &Hook<S, P>) -> bool {
        let mut slot = self.slot(event).write();
        match slot.iter().position(|bound| Arc::ptr_eq(bound, hook)) {
            Some(index) => {
                slot.remove(index);
                true
            },
            None => false,
        }
    }

    /// Invokes every hook bound to `event`, in bind order.
    ///
    /// Returns the number of hooks invoked; emitting with nothing bound is a
    /// no-op. A panicking hook propagates to the caller and aborts the
    /// remaining dispatch.
    pub fn emit(&self, event: Lifecycle, source: &S, payload: &P) -> usize {
        let snapshot: Vec<Hook<S, P>> = self.slot(event).read().clone();
        for hook in &snapshot {
            hook(source, payload);
        }
        trace!(event = %event, count = snapshot.len(), "Hooks dispatched");
        snapshot.len()
    }

    /// Number of hooks currently bound to `event`.
    #[must_use]
    pub fn bound(&self, event: Lifecycle) -> usize {
        self.slot(event).read().len()
    }

    /// Unbinds everything, returning the number of hooks dropped.
    #[must_use]
    pub fn clear(&self) -> usize {
        Lifecycle::ALL.iter().map(|&event| self.slot(event).write().drain(..).len()).sum()
    }
}

impl<S, P> fmt::Debug for LifecycleHooks<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("create", &self.bound(Lifecycle::Create))
            .field("delete", &self.bound(Lifecycle::Delete))
            .finish()
    }
}
