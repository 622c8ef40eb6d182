use crate::model::Model;
use crate::registry::{Registry, RegistryInner};
use crate::value::Value;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, Weak};

/// Identity assigned to an instance when it is registered.
///
/// Identities are per-registry, monotonically increasing, assigned exactly
/// once, and never reused, even after the instance is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) u64);

impl EntryId {
    /// Returns the underlying integer value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct EntryInner<T: Model> {
    id: EntryId,
    data: RwLock<T>,
    owner: Weak<RegistryInner<T>>,
}

/// A shared handle to one registered instance.
///
/// The handle carries the instance identity and a back-reference to the
/// owning registry; the payload itself stays a plain model value. Identity is
/// therefore excluded from the payload's equality and serialization by
/// construction: serializing an `Entry` serializes the payload only, and
/// `Entry` equality is instance identity (two handles are equal when they
/// point at the same registered instance).
pub struct Entry<T: Model> {
    inner: Arc<EntryInner<T>>,
}

impl<T: Model> Entry<T> {
    pub(crate) fn new(id: EntryId, value: T, owner: Weak<RegistryInner<T>>) -> Self {
        Self { inner: Arc::new(EntryInner { id, data: RwLock::new(value), owner }) }
    }

    /// The identity assigned at registration time.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.inner.id
    }

    /// The registry this instance was registered into.
    ///
    /// Returns `None` once the registry has been dropped; the handle and its
    /// payload stay usable on their own.
    #[must_use]
    pub fn registry(&self) -> Option<Registry<T>> {
        self.inner.owner.upgrade().map(Registry::from_inner)
    }

    /// Locks the payload for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.data.read()
    }

    /// Locks the payload for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.data.write()
    }

    /// Reads a declared field of the payload as a dynamic value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        self.read().field(name)
    }

    /// Whether two handles point at the same registered instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Model> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: Model> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: Model> Eq for Entry<T> {}

impl<T: Model> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("id", &self.inner.id).finish_non_exhaustive()
    }
}

impl<T: Model + Serialize> Serialize for Entry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.read().serialize(serializer)
    }
}
