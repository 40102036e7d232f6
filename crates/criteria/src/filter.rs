//! Atomic filter predicates.
//!
//! A [`Filter`] is a single condition: a field name, an operator, and a
//! value whose shape matches the operator's arity.

use regex::Regex;
use tracing::warn;

use crate::error::{CriteriaError, Result};
use crate::operator::FilterOperator;
use crate::value::{FilterValue, Number, Scalar, Value};

/// A single, validated filter predicate.
///
/// Filters are immutable once built. Two filters are equal when field,
/// operator and value are equal; the optional message is not compared.
///
/// # Example
///
/// ```
/// use criteria::{Filter, FilterOperator};
///
/// let adult = Filter::new("age", FilterOperator::GreaterOrEqual, 18).unwrap();
/// assert_eq!(adult.field(), "age");
///
/// // BETWEEN needs exactly two values
/// assert!(Filter::new("age", FilterOperator::Between, [18]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    field: String,
    operator: FilterOperator,
    value: FilterValue,
    message: Option<String>,
}

impl Filter {
    /// Creates a new filter, validating the field name and value arity.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(CriteriaError::validation(
                field,
                "field name must not be empty",
            ));
        }

        let value = value.into();
        operator.validate(&field, &value)?;

        let scalars = value
            .as_scalar()
            .map(std::slice::from_ref)
            .or(value.as_list())
            .unwrap_or_default();
        if scalars
            .iter()
            .any(|s| matches!(s, Scalar::Number(Number::F64(n)) if !n.is_finite()))
        {
            return Err(CriteriaError::validation(
                field,
                "numeric values must be finite",
            ));
        }

        Ok(Filter {
            field,
            operator,
            value,
            message: None,
        })
    }

    /// Creates an `IS NULL` filter.
    pub fn is_null(field: impl Into<String>) -> Result<Self> {
        Filter::new(field, FilterOperator::IsNull, FilterValue::None)
    }

    /// Creates an `IS NOT NULL` filter.
    pub fn is_not_null(field: impl Into<String>) -> Result<Self> {
        Filter::new(field, FilterOperator::IsNotNull, FilterValue::None)
    }

    /// Returns a copy of this filter carrying a failure message.
    ///
    /// The message is reported by [`Criteria::validate`](crate::Criteria::validate)
    /// when the filter does not match.
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Filter {
            message: Some(message.into()),
            ..self.clone()
        }
    }

    /// The field name this filter tests.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison operator.
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// The value payload.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// The failure message, if one was attached.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Message reported when this filter fails validation.
    pub fn failure_message(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("Field '{}' failed {} check", self.field, self.operator),
        }
    }

    /// Evaluates this filter against a field value.
    ///
    /// Null checks look at [`Value::Null`]; every other operator is false on
    /// a null field. Ordering comparisons between mismatched types are false.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match self.operator {
            FilterOperator::IsNull => return field_value.is_null(),
            FilterOperator::IsNotNull => return !field_value.is_null(),
            _ => {}
        }

        if field_value.is_null() {
            return false;
        }

        match (self.operator, &self.value) {
            (FilterOperator::Equal, FilterValue::Scalar(s)) => s.equals(field_value),
            (FilterOperator::NotEqual, FilterValue::Scalar(s)) => !s.equals(field_value),

            (
                FilterOperator::Greater
                | FilterOperator::GreaterOrEqual
                | FilterOperator::Less
                | FilterOperator::LessOrEqual,
                FilterValue::Scalar(s),
            ) => s
                .compare(field_value)
                .is_some_and(|ordering| self.operator.eval_ordering(ordering)),

            (op, FilterValue::Scalar(s)) if op.is_pattern() => {
                let matched = self.match_pattern(field_value, s);
                if op.is_negated() {
                    matched.map(|m| !m).unwrap_or(false)
                } else {
                    matched.unwrap_or(false)
                }
            }

            (FilterOperator::In, FilterValue::List(items)) => {
                items.iter().any(|item| item.equals(field_value))
            }
            (FilterOperator::NotIn, FilterValue::List(items)) => {
                !items.iter().any(|item| item.equals(field_value))
            }

            (FilterOperator::Between, FilterValue::List(items)) => in_range(field_value, items),
            (FilterOperator::NotBetween, FilterValue::List(items)) => {
                !in_range(field_value, items)
            }

            _ => false,
        }
    }

    /// Pattern match on a string field. `None` if the field is not a string.
    fn match_pattern(&self, field_value: &Value<'_>, pattern: &Scalar) -> Option<bool> {
        let haystack = field_value.as_str()?;
        let needle = pattern.to_string();

        let matched = match self.operator {
            FilterOperator::Contains | FilterOperator::NotContains => haystack.contains(&needle),
            FilterOperator::StartsWith | FilterOperator::NotStartsWith => {
                haystack.starts_with(&needle)
            }
            FilterOperator::EndsWith | FilterOperator::NotEndsWith => haystack.ends_with(&needle),
            _ => match like_regex(&needle) {
                Ok(regex) => regex.is_match(haystack),
                Err(err) => {
                    warn!(field = %self.field, pattern = %needle, error = %err, "unusable LIKE pattern");
                    return None;
                }
            },
        };
        Some(matched)
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.operator == other.operator && self.value == other.value
    }
}

/// Inclusive range check against a two-element list.
fn in_range(field_value: &Value<'_>, bounds: &[Scalar]) -> bool {
    match bounds {
        [low, high] => {
            let above = low
                .compare(field_value)
                .is_some_and(|o| FilterOperator::GreaterOrEqual.eval_ordering(o));
            let below = high
                .compare(field_value)
                .is_some_and(|o| FilterOperator::LessOrEqual.eval_ordering(o));
            above && below
        }
        _ => false,
    }
}

/// Translates a SQL `LIKE` pattern into an anchored regex.
///
/// `%` matches any run of characters and `_` exactly one; everything else is
/// literal.
pub(crate) fn like_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?s)^");
    for c in pattern.chars() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');
    Regex::new(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    fn filter(field: &str, op: FilterOperator, value: impl Into<FilterValue>) -> Filter {
        Filter::new(field, op, value).unwrap()
    }

    #[test]
    fn construction_round_trips_accessors() {
        let f = filter("age", FilterOperator::GreaterOrEqual, 18);
        assert_eq!(f.field(), "age");
        assert_eq!(f.operator(), FilterOperator::GreaterOrEqual);
        assert_eq!(f.value(), &FilterValue::from(18));
        assert_eq!(f.message(), None);
    }

    #[test]
    fn empty_field_is_rejected() {
        for field in ["", "   "] {
            let err = Filter::new(field, FilterOperator::Equal, 1).unwrap_err();
            assert!(matches!(err, CriteriaError::Validation { .. }));
        }
    }

    #[test]
    fn arity_is_validated() {
        assert!(Filter::new("deleted_at", FilterOperator::IsNull, "x").is_err());
        assert!(Filter::new("age", FilterOperator::Between, [1]).is_err());
        assert!(Filter::new("tag", FilterOperator::In, Vec::<&str>::new()).is_err());
        assert!(Filter::is_null("deleted_at").is_ok());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Filter::new("ratio", FilterOperator::Less, bad).unwrap_err();
            assert!(matches!(err, CriteriaError::Validation { .. }));
        }
        assert!(Filter::new("ratio", FilterOperator::Between, [0.0, f64::NAN]).is_err());
        assert!(Filter::new("ratio", FilterOperator::Less, 0.5).is_ok());
    }

    #[test]
    fn equality_ignores_message() {
        let a = filter("age", FilterOperator::Less, 10);
        let b = a.with_message("too old");
        assert_eq!(a, b);
        assert_eq!(b.message(), Some("too old"));
        assert_ne!(a, filter("age", FilterOperator::Less, 11));
        assert_ne!(a, filter("age", FilterOperator::LessOrEqual, 10));
    }

    #[test]
    fn list_equality_is_structural() {
        let a = filter("tag", FilterOperator::In, vec!["a", "b"]);
        assert_eq!(a, filter("tag", FilterOperator::In, ["a", "b"]));
        assert_ne!(a, filter("tag", FilterOperator::In, ["b", "a"]));
    }

    #[test]
    fn failure_message_defaults() {
        let f = filter("age", FilterOperator::Greater, 1);
        assert_eq!(f.failure_message(), "Field 'age' failed gt check");
        assert_eq!(f.with_message("custom").failure_message(), "custom");
    }

    #[test]
    fn comparisons() {
        let gte = filter("age", FilterOperator::GreaterOrEqual, 18);
        assert!(gte.matches(&Value::Number(Number::I64(18))));
        assert!(gte.matches(&Value::Number(Number::U64(30))));
        assert!(!gte.matches(&Value::Number(Number::F64(17.5))));
        assert!(!gte.matches(&Value::String("18")));

        let ne = filter("name", FilterOperator::NotEqual, "bob");
        assert!(ne.matches(&Value::String("alice")));
        assert!(!ne.matches(&Value::String("bob")));
    }

    #[test]
    fn null_handling() {
        assert!(Filter::is_null("x").unwrap().matches(&Value::Null));
        assert!(!Filter::is_null("x").unwrap().matches(&Value::Bool(false)));
        assert!(Filter::is_not_null("x").unwrap().matches(&Value::Bool(false)));

        // Non-null operators never match a null field
        assert!(!filter("x", FilterOperator::NotEqual, 1).matches(&Value::Null));
        assert!(!filter("x", FilterOperator::NotIn, [1]).matches(&Value::Null));
    }

    #[test]
    fn string_patterns() {
        let text = Value::String("lorem ipsum dolor sit amet");
        assert!(filter("s", FilterOperator::Contains, "sit").matches(&text));
        assert!(!filter("s", FilterOperator::Contains, "loremipsum").matches(&text));
        assert!(filter("s", FilterOperator::NotContains, "loremipsum").matches(&text));
        assert!(filter("s", FilterOperator::StartsWith, "lorem").matches(&text));
        assert!(filter("s", FilterOperator::NotStartsWith, "ipsum").matches(&text));
        assert!(filter("s", FilterOperator::EndsWith, "amet").matches(&text));
        assert!(!filter("s", FilterOperator::NotEndsWith, "amet").matches(&text));
    }

    #[test]
    fn like_wildcards() {
        let text = Value::String("lorem ipsum dolor sit amet");
        assert!(filter("s", FilterOperator::Like, "%lorem_ipsum%").matches(&text));
        assert!(filter("s", FilterOperator::NotLike, "%lorem__ipsum%").matches(&text));
        assert!(!filter("s", FilterOperator::Like, "lorem").matches(&text));
        // Regex metacharacters are literal
        assert!(filter("s", FilterOperator::Like, "a.c").matches(&Value::String("a.c")));
        assert!(!filter("s", FilterOperator::Like, "a.c").matches(&Value::String("abc")));
    }

    #[test]
    fn patterns_on_non_strings_never_match() {
        let n = Value::Number(Number::I64(5));
        assert!(!filter("s", FilterOperator::Contains, "5").matches(&n));
        assert!(!filter("s", FilterOperator::NotContains, "5").matches(&n));
    }

    #[test]
    fn membership() {
        let f = filter("status", FilterOperator::In, ["open", "pending"]);
        assert!(f.matches(&Value::String("open")));
        assert!(!f.matches(&Value::String("closed")));

        let f = filter("status", FilterOperator::NotIn, ["open", "pending"]);
        assert!(f.matches(&Value::String("closed")));
    }

    #[test]
    fn between_is_inclusive() {
        let f = filter("n", FilterOperator::Between, [4, 16]);
        assert!(f.matches(&Value::Number(Number::I64(4))));
        assert!(f.matches(&Value::Number(Number::I64(16))));
        assert!(!f.matches(&Value::Number(Number::I64(17))));

        let f = filter("n", FilterOperator::NotBetween, [4, 16]);
        assert!(f.matches(&Value::Number(Number::I64(3))));
        assert!(!f.matches(&Value::Number(Number::I64(10))));
    }

    #[test]
    fn timestamps() {
        let f = filter("created", FilterOperator::Less, Timestamp(1000));
        assert!(f.matches(&Value::Timestamp(Timestamp(500))));
        assert!(!f.matches(&Value::Timestamp(Timestamp(1000))));
    }

    #[test]
    fn like_regex_translation() {
        let re = like_regex("a%b_c").unwrap();
        assert!(re.is_match("a---bXc"));
        assert!(re.is_match("abXc"));
        assert!(!re.is_match("abc"));
        assert!(!re.is_match("xa-bXc"));
    }
}
