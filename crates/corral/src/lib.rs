//! Facade crate for the corral registry and its supporting modules.
//! Re-exports the core surface and the declaration macros.
//! Keep this crate thin: it should compose other crates, not implement logic.
//!
//! ## Usage
//! - Declare a model with [`model`] and keep its instances in a
//!   [`Registry`]; bind [`Lifecycle`] hooks to observe creates and deletes.
//! - Use [`prelude`] for the common imports.
//!
//! ```rust
//! use corral::prelude::*;
//!
//! #[model]
//! pub struct Person {
//!     pub name: Option<String>,
//!     pub age: Option<i64>,
//! }
//!
//! let people = Registry::<Person>::new();
//! people.bind(Lifecycle::Create, hook(|_, entry: &Entry<Person>| {
//!     assert!(entry.read().name.is_some());
//! }));
//! people.create(&fields! { "name": "david", "age": 27 });
//! assert_eq!(people.count(), 1);
//! ```

pub use corral_derive::{corral_error, model};
pub use corral_hooks as hooks;
pub use corral_registry as registry;

pub use corral_registry::{
    Entry, EntryId, FieldMap, Hook, Lifecycle, LifecycleHooks, Model, Registries, Registry,
    RegistryBuilder, RegistryError, Selector, Value, fields, hook,
};

/// The common imports, in one line.
pub mod prelude {
    pub use corral_derive::model;
    pub use corral_hooks::{Hook, Lifecycle, LifecycleHooks, hook};
    pub use corral_registry::{
        Entry, EntryId, FieldMap, Model, Registries, Registry, RegistryBuilder, RegistryError,
        Selector, Value, fields,
    };
}
