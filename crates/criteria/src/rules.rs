//! JSON rule documents.
//!
//! A rule document describes a single leaf of filters plus optional ordering
//! and pagination:
//!
//! ```json
//! {
//!   "filters": {
//!     "age": {"operator": "ge", "value": 18, "message": "Must be an adult"},
//!     "email": {"operator": "ends_with", "value": "@gmail.com"}
//!   },
//!   "order": [{"field": "age", "direction": "desc"}],
//!   "page": {"page": 1, "size": 20}
//! }
//! ```
//!
//! Filters keep document order. Operators are given by their code (see
//! [`FilterOperator::code`]). `page` also accepts `{"limit": n, "offset": m}`.

use serde::Deserialize;
use serde_json::Value as Json;

use crate::criteria::Criteria;
use crate::error::{CriteriaError, Result};
use crate::filter::Filter;
use crate::operator::FilterOperator;
use crate::ordering::OrderDirection;
use crate::value::{FilterValue, Number, Scalar};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDocument {
    filters: serde_json::Map<String, Json>,
    #[serde(default)]
    order: Vec<OrderRule>,
    #[serde(default)]
    page: Option<PageRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterRule {
    operator: String,
    #[serde(default)]
    value: Json,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrderRule {
    field: String,
    #[serde(default)]
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageRule {
    Page {
        page: usize,
        size: usize,
    },
    Limit {
        limit: usize,
        #[serde(default)]
        offset: usize,
    },
}

/// Builds a criteria from a parsed rule document.
///
/// ```
/// use criteria::rules::parse_rules;
/// use serde_json::json;
///
/// let criteria = parse_rules(&json!({
///     "filters": {"age": {"operator": "ge", "value": 18}}
/// }))
/// .unwrap();
///
/// assert!(criteria.matches(&json!({"age": 21})));
/// ```
pub fn parse_rules(document: &Json) -> Result<Criteria> {
    let document = RuleDocument::deserialize(document)
        .map_err(|e| CriteriaError::Rule(e.to_string()))?;

    let mut filters = Vec::with_capacity(document.filters.len());
    for (field, definition) in &document.filters {
        filters.push(parse_filter(field, definition)?);
    }

    let mut criteria = Criteria::new(filters);
    for order in document.order {
        let direction = match order.direction {
            Some(direction) => direction.parse()?,
            None => OrderDirection::Asc,
        };
        criteria = criteria.order_by(order.field, direction);
    }

    criteria = match document.page {
        Some(PageRule::Page { page, size }) => criteria.paginate(page, size)?,
        Some(PageRule::Limit { limit, offset }) => criteria.limit(limit, offset)?,
        None => criteria,
    };

    Ok(criteria)
}

/// Parses a JSON string into a criteria.
pub fn from_str(document: &str) -> Result<Criteria> {
    let document: Json = serde_json::from_str(document)?;
    parse_rules(&document)
}

fn parse_filter(field: &str, definition: &Json) -> Result<Filter> {
    let rule = FilterRule::deserialize(definition)
        .map_err(|e| CriteriaError::Rule(format!("filter '{field}': {e}")))?;

    let operator: FilterOperator = rule.operator.parse()?;
    let filter = Filter::new(field, operator, filter_value(field, &rule.value)?)?;

    Ok(match rule.message {
        Some(message) => filter.with_message(message),
        None => filter,
    })
}

fn filter_value(field: &str, value: &Json) -> Result<FilterValue> {
    match value {
        Json::Null => Ok(FilterValue::None),
        Json::Array(items) => items
            .iter()
            .map(|item| scalar(field, item))
            .collect::<Result<Vec<_>>>()
            .map(FilterValue::List),
        other => scalar(field, other).map(FilterValue::Scalar),
    }
}

fn scalar(field: &str, value: &Json) -> Result<Scalar> {
    match value {
        Json::String(s) => Ok(Scalar::String(s.clone())),
        Json::Bool(b) => Ok(Scalar::Bool(*b)),
        Json::Number(n) => {
            let number = if let Some(i) = n.as_i64() {
                Number::I64(i)
            } else if let Some(u) = n.as_u64() {
                Number::U64(u)
            } else {
                Number::F64(n.as_f64().unwrap_or(f64::NAN))
            };
            Ok(Scalar::Number(number))
        }
        other => Err(CriteriaError::Rule(format!(
            "filter '{field}': unsupported value {other}"
        ))),
    }
}
