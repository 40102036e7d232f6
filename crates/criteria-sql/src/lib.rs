//! SQL converters for the criteria algebra.
//!
//! Two [`Converter`](criteria::Converter) implementations render a
//! [`Criteria`](criteria::Criteria) tree as a `SELECT` statement:
//!
//! - [`SqlConverter`] writes values inline as quoted literals. This is the
//!   reference output format, and it does **not** escape values.
//! - [`ParameterizedSqlConverter`] writes placeholders in the style of a
//!   [`Dialect`] and returns the values separately in a [`BoundQuery`].
//!
//! # Rendering
//!
//! Every AND, OR and NOT node renders inside one pair of parentheses, so a
//! nested composite can never be re-associated by SQL precedence:
//!
//! ```rust
//! use criteria::{Converter, Criteria, Filter, FilterOperator};
//! use criteria_sql::SqlConverter;
//!
//! let is_adult = Criteria::from(
//!     Filter::new("age", FilterOperator::GreaterOrEqual, 18).unwrap(),
//! );
//! let gmail = Criteria::from(
//!     Filter::new("email", FilterOperator::EndsWith, "@gmail.com").unwrap(),
//! );
//! let yahoo = Criteria::from(
//!     Filter::new("email", FilterOperator::EndsWith, "@yahoo.com").unwrap(),
//! );
//!
//! let sql = SqlConverter::new()
//!     .convert(&(&is_adult & &(&gmail | &yahoo)), "user")
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM user WHERE (age >= '18' AND (email LIKE '%@gmail.com' OR email LIKE '%@yahoo.com'));"
//! );
//! ```
//!
//! A leaf with several filters joins them with `AND`. It is wrapped in
//! parentheses only under `OR` or `NOT`. A tree without any filter renders
//! without a `WHERE` clause.

mod dialect;
mod options;
mod parameterized;
mod renderer;
mod sql;

pub use dialect::{Dialect, MySql, Postgres, PyFormat, Sqlite};
pub use options::SelectOptions;
pub use parameterized::{BoundQuery, ParameterizedSqlConverter};
pub use sql::SqlConverter;
