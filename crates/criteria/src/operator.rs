//! Comparison operators for filters.
//!
//! The [`FilterOperator`] enum is closed: every operator has one canonical
//! SQL symbol, one rule code and one value [`Arity`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CriteriaError, Result};
use crate::value::FilterValue;

/// Comparison operator applied by a [`Filter`](crate::Filter).
///
/// Operators are grouped by the value shape they require:
/// - **No value**: `IsNull`, `IsNotNull`
/// - **Single value**: comparisons and pattern operators
/// - **Two values**: `Between`, `NotBetween`
/// - **Non-empty list**: `In`, `NotIn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FilterOperator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,

    /// Raw SQL `LIKE` pattern (`%` and `_` wildcards).
    Like,
    NotLike,
    /// Substring match, rendered as `LIKE '%v%'`.
    Contains,
    NotContains,
    /// Prefix match, rendered as `LIKE 'v%'`.
    StartsWith,
    NotStartsWith,
    /// Suffix match, rendered as `LIKE '%v'`.
    EndsWith,
    NotEndsWith,

    In,
    NotIn,

    IsNull,
    IsNotNull,

    /// Inclusive range.
    Between,
    NotBetween,
}

/// Value shape an operator requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value at all.
    None,
    /// Exactly one scalar.
    Single,
    /// A list of exactly two scalars.
    Pair,
    /// A list with at least one scalar.
    NonEmptyList,
}

impl FilterOperator {
    /// Every operator, in declaration order.
    pub const ALL: [FilterOperator; 20] = [
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::Greater,
        FilterOperator::GreaterOrEqual,
        FilterOperator::Less,
        FilterOperator::LessOrEqual,
        FilterOperator::Like,
        FilterOperator::NotLike,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::StartsWith,
        FilterOperator::NotStartsWith,
        FilterOperator::EndsWith,
        FilterOperator::NotEndsWith,
        FilterOperator::In,
        FilterOperator::NotIn,
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
        FilterOperator::Between,
        FilterOperator::NotBetween,
    ];

    /// Returns the value shape this operator requires.
    pub fn arity(self) -> Arity {
        match self {
            FilterOperator::IsNull | FilterOperator::IsNotNull => Arity::None,
            FilterOperator::Between | FilterOperator::NotBetween => Arity::Pair,
            FilterOperator::In | FilterOperator::NotIn => Arity::NonEmptyList,
            _ => Arity::Single,
        }
    }

    /// Checks that `value` has the shape this operator requires.
    ///
    /// `field` is only used to label the error.
    pub fn validate(self, field: &str, value: &FilterValue) -> Result<()> {
        let ok = match (self.arity(), value) {
            (Arity::None, FilterValue::None) => true,
            (Arity::Single, FilterValue::Scalar(_)) => true,
            (Arity::Pair, FilterValue::List(items)) => items.len() == 2,
            (Arity::NonEmptyList, FilterValue::List(items)) => !items.is_empty(),
            _ => false,
        };

        if ok {
            return Ok(());
        }

        let expected = match self.arity() {
            Arity::None => "no value",
            Arity::Single => "a single value",
            Arity::Pair => "a list of exactly 2 values",
            Arity::NonEmptyList => "a non-empty list of values",
        };
        Err(CriteriaError::validation(
            field,
            format!(
                "operator {} expects {expected}, got {}",
                self.code(),
                value.shape()
            ),
        ))
    }

    /// Returns `true` for the negated operators (`NotEqual`, `NotLike`, ...).
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            FilterOperator::NotEqual
                | FilterOperator::NotLike
                | FilterOperator::NotContains
                | FilterOperator::NotStartsWith
                | FilterOperator::NotEndsWith
                | FilterOperator::NotIn
                | FilterOperator::IsNotNull
                | FilterOperator::NotBetween
        )
    }

    /// Returns `true` for operators rendered as SQL `LIKE` patterns.
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            FilterOperator::Like
                | FilterOperator::NotLike
                | FilterOperator::Contains
                | FilterOperator::NotContains
                | FilterOperator::StartsWith
                | FilterOperator::NotStartsWith
                | FilterOperator::EndsWith
                | FilterOperator::NotEndsWith
        )
    }

    /// Wraps a pattern value with the `%` wildcards this operator implies.
    ///
    /// `Like` and `NotLike` pass the pattern through unchanged; non-pattern
    /// operators return `None`.
    pub fn like_pattern(self, value: &str) -> Option<String> {
        match self {
            FilterOperator::Like | FilterOperator::NotLike => Some(value.to_string()),
            FilterOperator::Contains | FilterOperator::NotContains => Some(format!("%{value}%")),
            FilterOperator::StartsWith | FilterOperator::NotStartsWith => Some(format!("{value}%")),
            FilterOperator::EndsWith | FilterOperator::NotEndsWith => Some(format!("%{value}")),
            _ => None,
        }
    }

    /// Evaluates a comparison given an ordering result.
    ///
    /// Only meaningful for the six comparison operators.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            FilterOperator::Equal => ordering == Ordering::Equal,
            FilterOperator::NotEqual => ordering != Ordering::Equal,
            FilterOperator::Greater => ordering == Ordering::Greater,
            FilterOperator::GreaterOrEqual => ordering != Ordering::Less,
            FilterOperator::Less => ordering == Ordering::Less,
            FilterOperator::LessOrEqual => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the canonical SQL symbol of this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            FilterOperator::Equal => "=",
            FilterOperator::NotEqual => "!=",
            FilterOperator::Greater => ">",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::Less => "<",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::Like
            | FilterOperator::Contains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith => "LIKE",
            FilterOperator::NotLike
            | FilterOperator::NotContains
            | FilterOperator::NotStartsWith
            | FilterOperator::NotEndsWith => "NOT LIKE",
            FilterOperator::In => "IN",
            FilterOperator::NotIn => "NOT IN",
            FilterOperator::IsNull => "IS NULL",
            FilterOperator::IsNotNull => "IS NOT NULL",
            FilterOperator::Between => "BETWEEN",
            FilterOperator::NotBetween => "NOT BETWEEN",
        }
    }

    /// Returns the short rule code of this operator (`eq`, `ge`, `in`, ...).
    pub fn code(self) -> &'static str {
        match self {
            FilterOperator::Equal => "eq",
            FilterOperator::NotEqual => "ne",
            FilterOperator::Greater => "gt",
            FilterOperator::GreaterOrEqual => "ge",
            FilterOperator::Less => "lt",
            FilterOperator::LessOrEqual => "le",
            FilterOperator::Like => "like",
            FilterOperator::NotLike => "not_like",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::NotStartsWith => "not_starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::NotEndsWith => "not_ends_with",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not_in",
            FilterOperator::IsNull => "is_null",
            FilterOperator::IsNotNull => "is_not_null",
            FilterOperator::Between => "between",
            FilterOperator::NotBetween => "not_between",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FilterOperator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.code() == s)
            .ok_or_else(|| CriteriaError::Rule(format!("unknown operator: {s}")))
    }
}
