use crate::model::Model;
use crate::registry::Registry;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;

/// One registry per model type.
///
/// A model type owns exactly one registry, shared by every instance of that
/// type; this container enforces that contract across a whole application:
/// the first [`of`](Self::of) for a type creates its registry, every later
/// call hands back a handle to the same one.
///
/// # Examples
/// ```rust
/// use corral_registry::Registries;
///
/// #[corral_derive::model]
/// pub struct Person {
///     pub name: Option<String>,
/// }
///
/// let registries = Registries::new();
/// let people = registries.of::<Person>();
/// assert!(people.ptr_eq(&registries.of::<Person>()));
/// ```
#[derive(Default)]
pub struct Registries {
    slots: RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl Registries {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The one registry for `T`, created on first use.
    #[must_use]
    pub fn of<T: Model>(&self) -> Registry<T> {
        let id = TypeId::of::<T>();

        if let Some(slot) = self.slots.read().get(&id) {
            if let Some(registry) = slot.downcast_ref::<Registry<T>>() {
                return registry.clone();
            }
        }

        let mut slots = self.slots.write();
        let slot = slots.entry(id).or_insert_with(|| Box::new(Registry::<T>::new()));
        slot.downcast_ref::<Registry<T>>().expect("slot holds the registry for its type").clone()
    }

    /// Number of model types with a registry.
    #[must_use]
    pub fn models(&self) -> usize {
        self.slots.read().len()
    }
}

impl fmt::Debug for Registries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registries").field("models", &self.models()).finish()
    }
}
