use crate::entry::EntryId;
use crate::model::FieldMap;
use crate::value::Value;

/// What to look up, in one of three shapes.
///
/// `From` conversions give [`Registry::get`] its overloaded call shape:
/// an identity (integer or [`EntryId`]), a field map, or a single
/// `(field, value)` pair.
///
/// [`Registry::get`]: crate::Registry::get
#[derive(Debug, Clone)]
pub enum Selector {
    /// Direct identity-index lookup.
    Id(EntryId),
    /// Per-key scan in map order; the first key with any match wins.
    Fields(FieldMap),
    /// First instance whose named field equals the value.
    Field(String, Value),
}

impl From<EntryId> for Selector {
    fn from(id: EntryId) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for Selector {
    fn from(id: u64) -> Self {
        Self::Id(EntryId(id))
    }
}

impl From<FieldMap> for Selector {
    fn from(fields: FieldMap) -> Self {
        Self::Fields(fields)
    }
}

impl From<(&str, Value)> for Selector {
    fn from((name, value): (&str, Value)) -> Self {
        Self::Field(name.to_owned(), value)
    }
}

impl From<(String, Value)> for Selector {
    fn from((name, value): (String, Value)) -> Self {
        Self::Field(name, value)
    }
}
