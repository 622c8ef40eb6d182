use crate::builder::RegistryBuilder;
use crate::entry::{Entry, EntryId};
use crate::error::RegistryError;
use crate::model::{FieldMap, Model};
use crate::selector::Selector;
use crate::value::value_cmp;
use corral_hooks::{Hook, Lifecycle, LifecycleHooks};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub(crate) type Initializer<T> = Box<dyn Fn(&FieldMap) -> T + Send + Sync>;

struct State<T: Model> {
    items: Vec<Entry<T>>,
    index: FxHashMap<EntryId, Entry<T>>,
    next_id: u64,
}

pub(crate) struct RegistryInner<T: Model> {
    state: RwLock<State<T>>,
    hooks: LifecycleHooks<Registry<T>, Entry<T>>,
    init: Option<Initializer<T>>,
}

/// The collection of every live instance of one model type.
///
/// A registry keeps its instances in creation order, indexes them by
/// identity, and reports every `create`/`delete` through its lifecycle
/// hooks. Handles are cheap to clone and share one underlying collection.
///
/// Queries hand back [`Entry`] handles in creation order; `all`, `filter`,
/// `exclude`, and `sort` return fresh vectors, so callers never mutate the
/// registry through a query result.
///
/// Hooks run synchronously, after the internal lock has been released: a
/// hook may call back into the registry, including mutations, and a
/// panicking hook propagates to the caller of the mutating operation.
pub struct Registry<T: Model> {
    inner: Arc<RegistryInner<T>>,
}

impl<T: Model> Default for Registry<T> {
    fn default() -> Self {
        Self::from_parts(None, 0)
    }
}

impl<T: Model> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: Model> Registry<T> {
    /// Creates a fresh, empty registry with the default initializer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "The registry is not created until you call .build()"]
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(init: Option<Initializer<T>>, capacity: usize) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                state: RwLock::new(State {
                    items: Vec::with_capacity(capacity),
                    index: FxHashMap::default(),
                    next_id: 0,
                }),
                hooks: LifecycleHooks::new(),
                init,
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<RegistryInner<T>>) -> Self {
        Self { inner }
    }

    /// Whether two handles share one underlying registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Constructs an instance from `fields` and registers it.
    ///
    /// Construction goes through the custom initializer when one was
    /// configured, otherwise through [`Model::from_fields`]. Registration
    /// assigns the next identity and fires `create` exactly once, with this
    /// registry and the new entry as arguments.
    pub fn create(&self, fields: &FieldMap) -> Entry<T> {
        let value = match &self.inner.init {
            Some(init) => init(fields),
            None => T::from_fields(fields),
        };
        let entry = self.insert(value);
        debug!(id = %entry.id(), "instance created");
        self.inner.hooks.emit(Lifecycle::Create, self, &entry);
        entry
    }

    /// Registers an externally constructed value.
    ///
    /// Assigns the next identity and appends, like `create`, but does *not*
    /// fire `create`: direct registration is the lower-level primitive for
    /// pre-existing values.
    pub fn add(&self, value: T) -> Entry<T> {
        let entry = self.insert(value);
        debug!(id = %entry.id(), "instance added");
        entry
    }

    /// Re-registers an entry that already carries an identity.
    ///
    /// The identity is trusted and reused, and the identity counter advances
    /// past it so it can never be minted again. The entry is appended
    /// without deduplication — restoring an entry that is still registered
    /// duplicates it, so callers must not. Does not fire `create`.
    pub fn restore(&self, entry: Entry<T>) -> Entry<T> {
        {
            let mut state = self.inner.state.write();
            state.next_id = state.next_id.max(entry.id().as_u64() + 1);
            state.index.insert(entry.id(), entry.clone());
            state.items.push(entry.clone());
        }
        debug!(id = %entry.id(), "instance restored");
        entry
    }

    fn insert(&self, value: T) -> Entry<T> {
        let mut state = self.inner.state.write();
        let id = EntryId(state.next_id);
        state.next_id += 1;
        let entry = Entry::new(id, value, Arc::downgrade(&self.inner));
        state.index.insert(id, entry.clone());
        state.items.push(entry.clone());
        entry
    }

    /// Every registered entry, in creation order.
    #[must_use]
    pub fn all(&self) -> Vec<Entry<T>> {
        self.inner.state.read().items.clone()
    }

    /// Number of registered entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.state.read().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Entries whose fields equal *all* listed values, in creation order.
    ///
    /// An empty map matches nothing. Note the asymmetry with [`exclude`],
    /// which drops an entry when *any* listed field matches.
    ///
    /// [`exclude`]: Self::exclude
    #[must_use]
    pub fn filter(&self, fields: &FieldMap) -> Vec<Entry<T>> {
        if fields.is_empty() {
            return Vec::new();
        }
        self.all().into_iter().filter(|entry| matches_all(entry, fields)).collect()
    }

    /// Entries satisfying the predicate, in creation order.
    #[must_use]
    pub fn filter_with(&self, predicate: impl Fn(&T) -> bool) -> Vec<Entry<T>> {
        self.all().into_iter().filter(|entry| predicate(&entry.read())).collect()
    }

    /// Entries where *no* listed field matches, in creation order.
    ///
    /// One matching field among several is enough to drop an entry, so for
    /// multi-key maps this is not the complement of [`filter`] — `filter`
    /// requires all listed fields to match, `exclude` drops on any match.
    /// The two partition the collection only for single-key maps. An empty
    /// map keeps everything.
    ///
    /// [`filter`]: Self::filter
    #[must_use]
    pub fn exclude(&self, fields: &FieldMap) -> Vec<Entry<T>> {
        self.all().into_iter().filter(|entry| !matches_any(entry, fields)).collect()
    }

    /// Entries not satisfying the predicate, in creation order.
    #[must_use]
    pub fn exclude_with(&self, predicate: impl Fn(&T) -> bool) -> Vec<Entry<T>> {
        self.all().into_iter().filter(|entry| !predicate(&entry.read())).collect()
    }

    /// A copy of the collection ordered by the named field, ascending.
    ///
    /// Stable: entries with equal keys keep their creation order. The order
    /// over values is [`value_cmp`](crate::value::value_cmp). The registry
    /// itself is never reordered.
    #[must_use]
    pub fn sort(&self, field: &str) -> Vec<Entry<T>> {
        let mut items = self.all();
        items.sort_by(|a, b| value_cmp(a.field(field).as_ref(), b.field(field).as_ref()));
        items
    }

    /// A copy of the collection ordered by the comparator.
    #[must_use]
    pub fn sort_with(&self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Vec<Entry<T>> {
        let mut items = self.all();
        items.sort_by(|a, b| compare(&a.read(), &b.read()));
        items
    }

    /// Looks an entry up by identity, field map, or `(field, value)` pair.
    ///
    /// Absence is `None`, never an error — including for selectors that
    /// cannot match anything, like an empty field map. A field-map selector
    /// scans per key, in map order: the first key with any match decides,
    /// so multi-key maps are *not* conjunctive (use [`filter`] for that).
    ///
    /// [`filter`]: Self::filter
    ///
    /// # Examples
    /// ```rust
    /// use corral_registry::{Registry, fields, value::json};
    ///
    /// #[corral_derive::model]
    /// pub struct Person {
    ///     pub name: Option<String>,
    /// }
    ///
    /// let people = Registry::<Person>::new();
    /// let ada = people.create(&fields! { "name": "ada" });
    ///
    /// assert_eq!(people.get(ada.id()), Some(ada.clone()));
    /// assert_eq!(people.get(fields! { "name": "ada" }), Some(ada.clone()));
    /// assert_eq!(people.get(("name", json!("ada"))), Some(ada));
    /// assert_eq!(people.get(99_u64), None);
    /// ```
    #[must_use]
    pub fn get(&self, selector: impl Into<Selector>) -> Option<Entry<T>> {
        match selector.into() {
            Selector::Id(id) => self.inner.state.read().index.get(&id).cloned(),
            Selector::Fields(fields) => {
                let items = self.all();
                fields.iter().find_map(|(name, expected)| {
                    items.iter().find(|entry| entry.field(name).as_ref() == Some(expected)).cloned()
                })
            },
            Selector::Field(name, expected) => self
                .all()
                .into_iter()
                .find(|entry| entry.field(&name).as_ref() == Some(&expected)),
        }
    }

    /// Returns the matching entry, or creates one from the merged fields.
    ///
    /// On a miss, `extra` is merged over the search fields (`extra` wins on
    /// key collision) and the result goes through [`create`], hooks
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SelectorNotCreatable`] when the selector is
    /// an identity that names no instance: an identity cannot seed a new
    /// one. Looking up an *existing* entry by identity works fine.
    ///
    /// [`create`]: Self::create
    pub fn get_or_create(
        &self,
        selector: impl Into<Selector>,
        extra: FieldMap,
    ) -> Result<Entry<T>, RegistryError> {
        let selector = selector.into();
        if let Some(found) = self.get(selector.clone()) {
            return Ok(found);
        }

        let mut fields = match selector {
            Selector::Fields(fields) => fields,
            Selector::Field(name, value) => {
                let mut fields = FieldMap::new();
                fields.insert(name, value);
                fields
            },
            Selector::Id(id) => {
                return Err(RegistryError::SelectorNotCreatable {
                    message: format!("identity {id} names no instance").into(),
                    context: None,
                });
            },
        };
        for (name, value) in extra {
            fields.insert(name, value);
        }

        Ok(self.create(&fields))
    }

    /// Deletes the entry with the given identity.
    ///
    /// Removes it from the collection and the identity index, fires
    /// `delete` with the removed entry, and returns `true`. An identity
    /// that names nothing returns `false` and changes nothing.
    pub fn remove(&self, id: impl Into<EntryId>) -> bool {
        let id = id.into();
        let removed = {
            let mut state = self.inner.state.write();
            let Some(entry) = state.index.remove(&id) else {
                return false;
            };
            // Position is found by identity scan, never assumed.
            if let Some(position) = state.items.iter().position(|item| item.id() == id) {
                state.items.remove(position);
            }
            entry
        };
        debug!(id = %id, "instance deleted");
        self.inner.hooks.emit(Lifecycle::Delete, self, &removed);
        true
    }

    /// Deletes the given entry, located by instance identity.
    ///
    /// Returns `false` if the entry is not registered here (already deleted,
    /// or belonging to another registry).
    pub fn remove_entry(&self, entry: &Entry<T>) -> bool {
        let removed = {
            let mut state = self.inner.state.write();
            let Some(position) = state.items.iter().position(|item| item.ptr_eq(entry)) else {
                return false;
            };
            let removed = state.items.remove(position);
            state.index.remove(&removed.id());
            removed
        };
        debug!(id = %removed.id(), "instance deleted");
        self.inner.hooks.emit(Lifecycle::Delete, self, &removed);
        true
    }

    /// Binds a lifecycle hook; duplicates of one handle are suppressed.
    ///
    /// Hooks fire synchronously, in bind order, with the registry as the
    /// first argument and the affected entry as the second.
    pub fn bind(&self, event: Lifecycle, hook: Hook<Self, Entry<T>>) -> bool {
        self.inner.hooks.bind(event, hook)
    }

    /// Unbinds a previously bound hook; absent hooks are a no-op.
    pub fn unbind(&self, event: Lifecycle, hook: &Hook<Self, Entry<T>>) -> bool {
        self.inner.hooks.unbind(event, hook)
    }

    /// The registry's hook dispatcher.
    #[must_use]
    pub fn hooks(&self) -> &LifecycleHooks<Self, Entry<T>> {
        &self.inner.hooks
    }
}

fn matches_all<T: Model>(entry: &Entry<T>, fields: &FieldMap) -> bool {
    let data = entry.read();
    fields.iter().all(|(name, expected)| data.field(name).as_ref() == Some(expected))
}

fn matches_any<T: Model>(entry: &Entry<T>, fields: &FieldMap) -> bool {
    let data = entry.read();
    fields.iter().any(|(name, expected)| data.field(name).as_ref() == Some(expected))
}

impl<T: Model> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.inner.state.try_read().map(|state| state.items.len());
        f.debug_struct("Registry")
            .field("count", &count)
            .field("hooks", &self.inner.hooks)
            .finish_non_exhaustive()
    }
}
