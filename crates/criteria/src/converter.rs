//! The conversion protocol.
//!
//! A [`Converter`] turns a [`Criteria`] tree plus a target identifier (a
//! table or collection name) into a backend-specific query artifact. Backends
//! live outside this crate; `criteria-sql` provides the SQL ones.

use crate::criteria::Criteria;
use crate::error::{CriteriaError, Result};

/// Renders criteria into a backend query.
///
/// Implementations must keep the boolean structure of the tree intact: a
/// composite child is never flattened into a parent with a different
/// operator.
///
/// # Example
///
/// A converter that only counts filters:
///
/// ```
/// use criteria::{Converter, Criteria, Filter, FilterOperator, Node, Result};
///
/// struct FilterCount;
///
/// fn count(criteria: &Criteria) -> usize {
///     match criteria.node() {
///         Node::Leaf(filters) => filters.len(),
///         Node::And(l, r) | Node::Or(l, r) => count(l) + count(r),
///         Node::Not(child) => count(child),
///     }
/// }
///
/// impl Converter for FilterCount {
///     type Output = usize;
///
///     fn convert(&self, criteria: &Criteria, target: &str) -> Result<usize> {
///         criteria::validate_target(target)?;
///         Ok(count(criteria))
///     }
/// }
///
/// let c = Criteria::from(Filter::new("a", FilterOperator::Equal, 1).unwrap());
/// assert_eq!(FilterCount.convert(&(&c & &!&c), "t").unwrap(), 2);
/// assert!(FilterCount.convert(&c, "").is_err());
/// ```
pub trait Converter {
    /// The query artifact this converter produces.
    type Output;

    /// Converts `criteria` into a query against `target`.
    fn convert(&self, criteria: &Criteria, target: &str) -> Result<Self::Output>;
}

/// Checks that a conversion target is a non-empty identifier.
pub fn validate_target(target: &str) -> Result<&str> {
    if target.trim().is_empty() {
        return Err(CriteriaError::validation(
            "target",
            "target must not be empty",
        ));
    }
    Ok(target)
}
