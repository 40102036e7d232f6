//! Field access for in-memory evaluation.
//!
//! This module provides the [`Record`] trait, implemented by the
//! `#[derive(Record)]` macro and for JSON objects.

use crate::value::{Number, Timestamp, Value};

/// Types whose fields can be tested by a [`Criteria`](crate::Criteria).
///
/// This trait is typically derived using `#[derive(Record)]` (feature
/// `derive`), but can also be implemented manually.
///
/// # Manual Implementation
///
/// ```
/// use criteria::{Record, Value, Number};
///
/// struct User {
///     email: String,
///     age: u8,
/// }
///
/// impl Record for User {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "email" => Value::String(&self.email),
///             "age" => Value::Number(Number::U64(self.age as u64)),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::Null`] if the field is
    /// missing or not comparable.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Static accessor suitable for the ordering helpers.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Helper trait for converting types to timestamps.
///
/// Used by `#[derive(Record)]` for fields marked `#[record(Timestamp)]`.
///
/// ```
/// use criteria::{RecordTimestamp, Timestamp};
///
/// struct MyDateTime(i64);
///
/// impl RecordTimestamp for MyDateTime {
///     fn record_timestamp(&self) -> Timestamp {
///         Timestamp::from_millis(self.0)
///     }
/// }
/// ```
pub trait RecordTimestamp {
    /// Converts this value to a [`Timestamp`] for comparison.
    fn record_timestamp(&self) -> Timestamp;
}

impl RecordTimestamp for i64 {
    fn record_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl RecordTimestamp for u64 {
    fn record_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl RecordTimestamp for Timestamp {
    fn record_timestamp(&self) -> Timestamp {
        *self
    }
}

/// Borrows a JSON value as a comparable [`Value`].
///
/// Arrays and nested objects are not comparable and read as null.
pub fn json_value(value: &serde_json::Value) -> Value<'_> {
    match value {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else {
                n.as_f64()
                    .map_or(Value::Null, |f| Value::Number(Number::F64(f)))
            }
        }
        _ => Value::Null,
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::Null, json_value)
    }
}

/// Non-object JSON values have no fields.
impl Record for serde_json::Value {
    fn field_value(&self, field: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field_value(field),
            _ => Value::Null,
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}
