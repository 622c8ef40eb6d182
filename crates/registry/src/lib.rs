//! # Corral Registry
//!
//! An in-process, observable collection manager for plain in-memory models.
//!
//! ## Overview
//!
//! A [`Registry`] holds every live instance of one model type. It hands out
//! identity-stamped [`Entry`] handles, answers linear-scan queries
//! (filter/exclude/get/sort), and reports `create`/`delete` lifecycle events
//! through synchronous hooks. It is a single-process convenience layer, not a
//! database: nothing is persisted, queries never plan, and hooks run inline.
//!
//! ## Features
//!
//! * **Identity**: every registered instance gets a monotonically increasing
//!   [`EntryId`], assigned exactly once and never reused.
//! * **Queries**: field-map and closure predicates, stable field sorts,
//!   overloaded lookup via [`Selector`] conversions.
//! * **Hooks**: deduplicated, ordered, synchronous create/delete dispatch.
//! * **Declaration**: `#[corral_derive::model]` fixes the field list at the
//!   type boundary; no duck typing at construction time.
//!
//! # Example
//!
//! ```rust
//! use corral_registry::{Registry, fields};
//!
//! #[corral_derive::model]
//! #[derive(Clone)]
//! pub struct Person {
//!     pub name: Option<String>,
//!     pub age: Option<i64>,
//!     pub sex: Option<String>,
//! }
//!
//! let people = Registry::<Person>::new();
//! let david = people.create(&fields! { "name": "david", "age": 27, "sex": "male" });
//! people.create(&fields! { "name": "carolina", "age": 24, "sex": "female" });
//!
//! assert_eq!(people.count(), 2);
//! assert_eq!(people.filter(&fields! { "age": 27 }).len(), 1);
//! assert!(people.get(david.id()).is_some_and(|found| found == david));
//! ```

mod builder;
mod entry;
mod error;
mod model;
mod registries;
mod registry;
mod selector;
pub mod value;

pub use builder::RegistryBuilder;
pub use corral_hooks::{Hook, Lifecycle, LifecycleHooks, hook};
pub use entry::{Entry, EntryId};
pub use error::{RegistryError, RegistryErrorExt};
pub use model::{FieldMap, Model};
pub use registries::Registries;
pub use registry::Registry;
pub use selector::Selector;
pub use value::Value;

/// Builds a [`FieldMap`] from literal keys and JSON-convertible values.
///
/// # Examples
/// ```rust
/// use corral_registry::fields;
///
/// let map = fields! { "name": "diana", "age": 19 };
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::FieldMap::new() };
    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut fields = $crate::FieldMap::new();
        $( fields.insert(($key).into(), $crate::value::json!($value)); )+
        fields
    }};
}
