#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the corral workspace.
//! This crate provides attribute macros that remove the boilerplate around
//! model declaration and error enums.
//!
//! ## Usage
//! Consumers normally get these through the `corral` facade; inside the
//! workspace add the crate directly:
//! ```toml
//! [dependencies]
//! corral-derive = { path = "../infra/derive" }
//! ```
//!
//! See each macro's docstring for examples; they are `ignore`d to avoid
//! compiling in this crate, but are exercised in this crate's tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro declaring a struct as a registry model.
///
/// Works on structs with named fields. Every named field becomes a declared
/// model field, fixing the field list at the type-declaration boundary.
///
/// # Injected Behaviors
///
/// * **Derives**: automatically adds `Debug`, `Default`, `Serialize`, and
///   `Deserialize` if missing (field types must support them).
/// * **`Model` impl**: `FIELDS` (declaration order), `from_fields` (copies
///   same-named, convertible values; unknown keys are ignored; anything else
///   keeps the field's default), and `field` (dynamic field read).
///
/// # Example
///
/// ```rust,ignore
/// use corral_derive::model;
///
/// #[model]
/// pub struct Person {
///     pub name: Option<String>,
///     pub age: Option<i64>,
///     pub sex: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::model::expand_model(args.into(), input).into()
}

/// Attribute macro for workspace error enums.
///
/// Variants carry `message: Cow<'static, str>` and/or a `source` error, plus
/// `context: Option<Cow<'static, str>>`. The macro injects `Debug` and
/// `thiserror::Error` derives when missing, generates `From` impls for
/// source types, and emits a `<Name>Ext` extension trait whose `context`
/// method attaches context to a `Result`.
///
/// # Example
///
/// ```rust,ignore
/// use corral_derive::corral_error;
/// use std::borrow::Cow;
///
/// #[corral_error]
/// pub enum DemoError {
///     #[error("Not found{}: {message}", format_context(.context))]
///     NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn corral_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}
