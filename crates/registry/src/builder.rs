use crate::model::{FieldMap, Model};
use crate::registry::{Initializer, Registry};
use std::fmt;

/// Configures and builds a [`Registry`].
///
/// The one interesting knob is the custom initializer: when set, it replaces
/// the default [`Model::from_fields`] path for every subsequent
/// [`Registry::create`]. Identity assignment is unaffected either way — it
/// happens at registration, on the handle, exactly once.
pub struct RegistryBuilder<T: Model> {
    init: Option<Initializer<T>>,
    capacity: usize,
}

impl<T: Model> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self { init: None, capacity: 0 }
    }
}

impl<T: Model> RegistryBuilder<T> {
    #[must_use = "Creates a new registry builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default field-copy initializer for the `create` path.
    ///
    /// # Examples
    /// ```rust
    /// use corral_registry::{Model, Registry, fields};
    ///
    /// #[corral_derive::model]
    /// pub struct Counter {
    ///     pub label: Option<String>,
    ///     pub clicks: Option<i64>,
    /// }
    ///
    /// let counters = Registry::builder()
    ///     .initializer(|fields| {
    ///         let mut counter = Counter::from_fields(fields);
    ///         counter.clicks.get_or_insert(0);
    ///         counter
    ///     })
    ///     .build();
    ///
    /// let counter = counters.create(&fields! { "label": "saves" });
    /// assert_eq!(counter.read().clicks, Some(0));
    /// ```
    #[must_use = "Sets the initializer used by the create path"]
    pub fn initializer(mut self, init: impl Fn(&FieldMap) -> T + Send + Sync + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    /// Pre-allocates room for `capacity` instances.
    #[must_use = "Sets the initial capacity of the registry"]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Consumes the configuration and returns a fresh, empty registry.
    #[must_use]
    pub fn build(self) -> Registry<T> {
        Registry::from_parts(self.init, self.capacity)
    }
}

impl<T: Model> fmt::Debug for RegistryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("init", &self.init.is_some())
            .field("capacity", &self.capacity)
            .finish()
    }
}
