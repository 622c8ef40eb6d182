use crate::value::Value;

/// Initial field values for constructing an instance, in insertion order.
pub type FieldMap = serde_json::Map<String, Value>;

/// A type whose instances can live in a [`Registry`].
///
/// The field list is fixed at the type-declaration boundary: only the names
/// in [`FIELDS`](Self::FIELDS) participate in field-map queries, sorts, and
/// initialization. Implementations are normally generated with
/// `#[corral_derive::model]` on a plain struct with named fields.
///
/// [`Registry`]: crate::Registry
pub trait Model: Sized + Send + Sync + 'static {
    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Constructs an instance from initial field values.
    ///
    /// The default initializer semantics: every declared field whose name
    /// appears in `fields` with a convertible value is copied; unknown keys
    /// are ignored; everything else keeps the field's default.
    fn from_fields(fields: &FieldMap) -> Self;

    /// Reads a declared field as a dynamic value.
    ///
    /// Returns `None` for names that are not declared fields.
    fn field(&self, name: &str) -> Option<Value>;
}
