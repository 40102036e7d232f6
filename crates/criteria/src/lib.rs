//! Criteria - backend-agnostic filtering, ordering and pagination.
//!
//! Criteria provides an immutable expression tree for describing which
//! records a query should return, independent of where those records live.
//! It supports:
//!
//! - Atomic filters: equality, comparison, pattern, set, range and null checks
//! - Boolean composition: AND, OR and NOT, with `&`, `|` and `!` overloads
//! - Ordering and pagination directives with a deterministic merge policy
//! - A [`Converter`] protocol for rendering trees into backend queries
//! - In-memory evaluation against any [`Record`]
//! - JSON rule documents (see [`rules`])
//!
//! # Quick Start
//!
//! ```rust
//! use criteria::{Criteria, Filter, FilterOperator};
//! use serde_json::json;
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
//! let criteria = (&is_adult & &(&gmail | &yahoo)).order_desc("age");
//!
//! let users = vec![
//!     json!({"age": 34, "email": "ann@gmail.com"}),
//!     json!({"age": 15, "email": "bob@gmail.com"}),
//!     json!({"age": 52, "email": "cid@yahoo.com"}),
//!     json!({"age": 40, "email": "dee@example.com"}),
//! ];
//!
//! let results = criteria.apply(&users);
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0]["email"], "cid@yahoo.com");
//! ```
//!
//! # Tree Semantics
//!
//! ```text
//! Leaf(f1, f2, ...)  = f1 ∧ f2 ∧ ...      (empty leaf = true)
//! And(l, r)          = l ∧ r
//! Or(l, r)           = l ∨ r
//! Not(c)             = ¬c
//! ```
//!
//! A tree with no filters at all matches everything. Double negation is kept
//! as written; trees are never simplified.
//!
//! # Operators
//!
//! | Arity | Operators |
//! |-------|-----------|
//! | none | `IsNull`, `IsNotNull` |
//! | single | `Equal`, `NotEqual`, `Greater`, `GreaterOrEqual`, `Less`, `LessOrEqual`, `Like`, `NotLike`, `Contains`, `NotContains`, `StartsWith`, `NotStartsWith`, `EndsWith`, `NotEndsWith` |
//! | two values | `Between`, `NotBetween` |
//! | non-empty list | `In`, `NotIn` |
//!
//! # Directives
//!
//! Ordering and pagination can be attached to any node. When several nodes
//! carry them, the shallowest one wins, and the right-most one wins between
//! nodes at the same depth. Ordering and pagination resolve independently.

mod converter;
mod criteria;
mod error;
mod evaluate;
mod filter;
mod operator;
mod ordering;
mod pagination;
mod record;
pub mod rules;
mod value;

// Re-export public API
pub use converter::{validate_target, Converter};
pub use criteria::{BooleanOperator, Criteria, Node};
pub use error::{CriteriaError, Result};
pub use evaluate::Validation;
pub use filter::Filter;
pub use operator::{Arity, FilterOperator};
pub use ordering::{compare_by_orders, compare_values, Order, OrderDirection};
pub use pagination::Pagination;
pub use record::{json_value, Record, RecordTimestamp};
pub use value::{FilterValue, Number, Scalar, Timestamp, Value};

#[cfg(feature = "derive")]
pub use criteria_macros::Record;
