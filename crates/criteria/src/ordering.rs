//! Ordering directives.
//!
//! Provides [`OrderDirection`] for sort direction and [`Order`] for
//! field-based ordering, plus the comparison helpers the in-memory evaluator
//! sorts with.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CriteriaError;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl OrderDirection {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        }
    }

    /// Returns the SQL keyword of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(CriteriaError::Rule(format!(
                "unknown order direction: {other}"
            ))),
        }
    }
}

/// A single ordering directive: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: OrderDirection,
}

impl Order {
    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Order {
            field: field.into(),
            direction,
        }
    }

    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Order::new(field, OrderDirection::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Order::new(field, OrderDirection::Desc)
    }

    /// Compares two values according to this ordering.
    ///
    /// Returns `None` if the values cannot be compared (type mismatch or NaN).
    /// Nulls sort last regardless of direction.
    pub fn compare<'a>(&self, a: &Value<'a>, b: &Value<'a>) -> Option<Ordering> {
        match (a.is_null(), b.is_null()) {
            (false, false) => compare_values(a, b).map(|o| self.direction.apply(o)),
            _ => compare_values(a, b),
        }
    }
}

/// Compares two values of the same type.
///
/// Returns `None` if the types don't match or comparison is not possible (NaN).
pub fn compare_values<'a>(a: &Value<'a>, b: &Value<'a>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        // Nulls sort last
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Greater),
        (_, Value::Null) => Some(Ordering::Less),

        _ => None,
    }
}

/// Compares two items using a list of orderings.
///
/// The first ordering is the primary key, the next ones break ties.
pub fn compare_by_orders<T, F>(a: &T, b: &T, orders: &[Order], accessor: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    for order in orders {
        let val_a = accessor(a, &order.field);
        let val_b = accessor(b, &order.field);

        if let Some(ordering) = order.compare(&val_a, &val_b) {
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // Incomparable values count as equal and fall through to the next key
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn direction_apply() {
        assert_eq!(OrderDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(OrderDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(OrderDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn direction_display_and_parse() {
        assert_eq!(OrderDirection::Asc.to_string(), "ASC");
        assert_eq!(OrderDirection::Desc.to_string(), "DESC");
        assert_eq!("desc".parse::<OrderDirection>().unwrap(), OrderDirection::Desc);
        assert_eq!("ASC".parse::<OrderDirection>().unwrap(), OrderDirection::Asc);
        assert!("sideways".parse::<OrderDirection>().is_err());
    }

    #[test]
    fn order_constructors() {
        let asc = Order::asc("name");
        assert_eq!(asc.field, "name");
        assert_eq!(asc.direction, OrderDirection::Asc);
        assert_eq!(Order::desc("age").direction, OrderDirection::Desc);
    }

    #[test]
    fn compare_mixed_and_null() {
        let s = Value::String("a");
        let n = Value::Number(Number::I64(1));
        assert_eq!(compare_values(&s, &n), None);
        assert_eq!(compare_values(&Value::Null, &s), Some(Ordering::Greater));
        assert_eq!(compare_values(&s, &Value::Null), Some(Ordering::Less));
    }

    #[test]
    fn nulls_last_even_descending() {
        let desc = Order::desc("x");
        let one = Value::Number(Number::I64(1));
        assert_eq!(desc.compare(&Value::Null, &one), Some(Ordering::Greater));
        assert_eq!(
            desc.compare(&one, &Value::Number(Number::I64(2))),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn compare_by_multiple_orders() {
        struct Item {
            name: &'static str,
            priority: i64,
        }

        fn accessor<'a>(item: &'a Item, field: &str) -> Value<'a> {
            match field {
                "name" => Value::String(item.name),
                "priority" => Value::Number(Number::I64(item.priority)),
                _ => Value::Null,
            }
        }

        let a = Item { name: "a", priority: 1 };
        let b = Item { name: "b", priority: 1 };
        let c = Item { name: "a", priority: 2 };
        let orders = [Order::asc("priority"), Order::asc("name")];

        assert_eq!(compare_by_orders(&a, &b, &orders, &accessor), Ordering::Less);
        assert_eq!(compare_by_orders(&c, &a, &orders, &accessor), Ordering::Greater);
    }
}
