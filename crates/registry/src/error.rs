use std::borrow::Cow;

/// Errors that can occur during registry operations.
///
/// Lookups and deletions report absence through `Option`/`bool`, never
/// through this type; only operations that were asked to do something
/// impossible fail.
#[corral_derive::corral_error]
pub enum RegistryError {
    /// The selector can identify an instance but cannot seed a new one
    /// (an identity selector passed to `get_or_create` that found nothing).
    #[error("Selector cannot create{}: {message}", format_context(.context))]
    SelectorNotCreatable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
