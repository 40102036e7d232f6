//! Proc macros for the criteria crate.
//!
//! # Derive Macros
//!
//! - [`Record`] - Generate field access for in-memory criteria evaluation
//!
//! The macro is re-exported by `criteria` when its `derive` feature is
//! enabled.

mod attrs;
mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for structs evaluated by criteria.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | String field (comparisons, patterns, `IN`) |
/// | `Number` | Numeric field (comparisons, `BETWEEN`, `IN`) |
/// | `Timestamp` | Timestamp field, requires a `RecordTimestamp` impl |
/// | `Bool` | Boolean field |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Use a custom field name |
///
/// Fields without a `#[record(...)]` type are not exposed. `Option<T>`
/// fields read as null when `None`.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `User::EMAIL`, `User::CREATED_AT`)
/// 2. Implementation of `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use criteria::{Criteria, Filter, FilterOperator, Record};
///
/// #[derive(Record)]
/// struct User {
///     #[record(String)]
///     email: String,
///
///     #[record(Number)]
///     age: u8,
///
///     #[record(String, rename = "nick")]
///     nickname: Option<String>,
///
///     #[record(skip)]
///     password_hash: String,
/// }
///
/// let adults = Criteria::from(
///     Filter::new(User::AGE, FilterOperator::GreaterOrEqual, 18).unwrap(),
/// );
/// let no_nick = Criteria::from(Filter::is_null(User::NICK).unwrap());
///
/// let users = vec![
///     User { email: "a@x.io".into(), age: 30, nickname: None, password_hash: String::new() },
///     User { email: "b@x.io".into(), age: 12, nickname: None, password_hash: String::new() },
/// ];
/// assert_eq!((&adults & &no_nick).apply(&users).len(), 1);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
