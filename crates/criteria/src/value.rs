//! Value types carried by filters and extracted from records.
//!
//! - [`Scalar`] is an owned literal stored inside a [`Filter`](crate::Filter).
//! - [`FilterValue`] is the payload of a filter: nothing, one scalar, or a list.
//! - [`Value`] is a borrowed runtime value read from a [`Record`](crate::Record)
//!   during in-memory evaluation.

use std::cmp::Ordering;
use std::fmt;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use criteria::{Value, Number};
///
/// struct User {
///     email: String,
///     age: u8,
/// }
///
/// fn accessor<'a>(user: &'a User, field: &str) -> Value<'a> {
///     match field {
///         "email" => Value::String(&user.email),
///         "age" => Value::Number(Number::U64(user.age as u64)),
///         _ => Value::Null,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or not comparable.
    Null,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Comparisons between different numeric variants fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            // Debug form keeps `.0` on whole floats
            Number::F64(n) => write!(f, "{n:?}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as _)
                }
            }
        )*
    };
}

number_from!(I64: i8, i16, i32, i64, isize);
number_from!(U64: u8, u16, u32, u64, usize);
number_from!(F64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// ```
/// use criteria::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

/// Owned literal stored in a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
    Timestamp(Timestamp),
}

impl Scalar {
    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compares a record value against this literal.
    ///
    /// Returns `None` for null values and type mismatches.
    pub fn compare(&self, value: &Value<'_>) -> Option<Ordering> {
        match (value, self) {
            (Value::String(v), Scalar::String(s)) => Some((*v).cmp(s.as_str())),
            (Value::Number(v), Scalar::Number(n)) => v.compare(*n),
            (Value::Bool(v), Scalar::Bool(b)) => Some(v.cmp(b)),
            (Value::Timestamp(v), Scalar::Timestamp(t)) => Some(v.cmp(t)),
            _ => None,
        }
    }

    /// Returns `true` if the record value equals this literal.
    pub fn equals(&self, value: &Value<'_>) -> bool {
        self.compare(value) == Some(Ordering::Equal)
    }
}

/// Renders the bare literal, without quoting or escaping.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Timestamp(t) => write!(f, "{}", t.as_millis()),
        }
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl From<Timestamp> for Scalar {
    fn from(t: Timestamp) -> Self {
        Scalar::Timestamp(t)
    }
}

/// Payload of a filter.
///
/// The shape must match the arity of the filter's operator; see
/// [`FilterOperator::validate`](crate::FilterOperator::validate).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    /// No value (null checks).
    #[default]
    None,
    /// A single literal.
    Scalar(Scalar),
    /// An ordered sequence of literals (`IN`, `BETWEEN`).
    List(Vec<Scalar>),
}

impl FilterValue {
    /// Returns the single literal, if this is a scalar payload.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FilterValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the literals, if this is a list payload.
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            FilterValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if there is no payload.
    pub fn is_none(&self) -> bool {
        matches!(self, FilterValue::None)
    }

    /// Short description of the payload shape, used in error messages.
    pub fn shape(&self) -> String {
        match self {
            FilterValue::None => "no value".to_string(),
            FilterValue::Scalar(_) => "a single value".to_string(),
            FilterValue::List(items) => format!("a list of {} values", items.len()),
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(s: Scalar) -> Self {
        FilterValue::Scalar(s)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for FilterValue {
    fn from(items: [T; N]) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::None, |v| FilterValue::Scalar(v.into()))
    }
}

macro_rules! scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(n: $ty) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! filter_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(v: $ty) -> Self {
                    FilterValue::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

filter_value_from!(
    String, &str, bool, Number, Timestamp, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize,
    f32, f64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert!(Value::Null.is_null());

        // Wrong type returns None
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::from(18).to_string(), "18");
        assert_eq!(Number::from(7u8).to_string(), "7");
        assert_eq!(Number::from(1.5).to_string(), "1.5");
        assert_eq!(Number::from(18.0).to_string(), "18.0");
        assert_ne!(Number::from(18.0).to_string(), Number::from(18).to_string());
    }

    #[test]
    fn scalar_display_is_verbatim() {
        assert_eq!(Scalar::from("O'Brien").to_string(), "O'Brien");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(Timestamp(1500)).to_string(), "1500");
    }

    #[test]
    fn scalar_compare_against_values() {
        let age = Scalar::from(18);
        assert_eq!(
            age.compare(&Value::Number(Number::U64(20))),
            Some(Ordering::Greater)
        );
        assert!(age.equals(&Value::Number(Number::F64(18.0))));
        assert_eq!(age.compare(&Value::String("18")), None);
        assert_eq!(age.compare(&Value::Null), None);
    }

    #[test]
    fn filter_value_conversions() {
        assert_eq!(FilterValue::from(18), FilterValue::Scalar(Scalar::from(18)));
        assert_eq!(
            FilterValue::from(vec!["a", "b"]),
            FilterValue::List(vec![Scalar::from("a"), Scalar::from("b")])
        );
        assert_eq!(
            FilterValue::from([1, 2]),
            FilterValue::List(vec![Scalar::from(1), Scalar::from(2)])
        );
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::None);
        assert_eq!(FilterValue::from(Some("x")).as_scalar(), Some(&Scalar::from("x")));
    }

    #[test]
    fn filter_value_shape() {
        assert_eq!(FilterValue::None.shape(), "no value");
        assert_eq!(FilterValue::from(1).shape(), "a single value");
        assert_eq!(FilterValue::from([1, 2, 3]).shape(), "a list of 3 values");
    }
}
