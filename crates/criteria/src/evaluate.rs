//! In-memory evaluation of criteria against records.

use tracing::trace;

use crate::criteria::{Criteria, Node};
use crate::ordering::compare_by_orders;
use crate::record::Record;

/// Outcome of [`Criteria::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the record satisfies the criteria.
    pub valid: bool,
    /// Failure messages collected along the way.
    pub messages: Vec<String>,
}

impl Validation {
    fn pass() -> Self {
        Validation {
            valid: true,
            messages: Vec::new(),
        }
    }
}

impl Criteria {
    /// Returns `true` if the record satisfies this criteria.
    ///
    /// A tree without filters matches every record, including under `NOT`.
    ///
    /// Evaluation is two-valued: a filter on a null or missing field is
    /// simply false, so `NOT` over it is true. SQL uses three-valued logic,
    /// where `NOT (x != 1)` on a `NULL` column is unknown and selects no
    /// row. Results can differ from the converted query under `NOT` when
    /// fields are null; add an explicit `IS NOT NULL` filter to align them.
    ///
    /// ```
    /// use criteria::{Criteria, Filter, FilterOperator};
    /// use serde_json::json;
    ///
    /// let adult = Criteria::from(Filter::new("age", FilterOperator::GreaterOrEqual, 18).unwrap());
    /// assert!(adult.matches(&json!({"age": 30})));
    /// assert!(!adult.matches(&json!({"age": 12})));
    /// assert!(!adult.matches(&json!({})));
    /// ```
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self.node() {
            Node::Leaf(filters) => filters
                .iter()
                .all(|filter| filter.matches(&record.field_value(filter.field()))),
            Node::And(left, right) => left.matches(record) && right.matches(record),
            Node::Or(left, right) => left.matches(record) || right.matches(record),
            Node::Not(child) => !child.has_filters() || !child.matches(record),
        }
    }

    /// Evaluates the record and collects failure messages.
    ///
    /// Failing filters report their message, or
    /// `Field '<field>' failed <op> check`. `AND` keeps messages from both
    /// sides. `OR` keeps the messages of the left side if it passed, otherwise
    /// those of the right side. `NOT` inverts validity and keeps the child's
    /// messages.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Validation {
        if !self.has_filters() {
            return Validation::pass();
        }

        match self.node() {
            Node::Leaf(filters) => {
                let messages: Vec<String> = filters
                    .iter()
                    .filter(|filter| !filter.matches(&record.field_value(filter.field())))
                    .map(|filter| filter.failure_message())
                    .collect();
                Validation {
                    valid: messages.is_empty(),
                    messages,
                }
            }
            Node::And(left, right) => {
                let mut left = left.validate(record);
                let right = right.validate(record);
                left.messages.extend(right.messages);
                Validation {
                    valid: left.valid && right.valid,
                    messages: left.messages,
                }
            }
            Node::Or(left, right) => {
                let left = left.validate(record);
                let right = right.validate(record);
                Validation {
                    valid: left.valid || right.valid,
                    messages: if left.valid {
                        left.messages
                    } else {
                        right.messages
                    },
                }
            }
            Node::Not(child) => {
                let child = child.validate(record);
                Validation {
                    valid: !child.valid,
                    messages: child.messages,
                }
            }
        }
    }

    /// Filters, sorts and paginates a slice of records.
    ///
    /// Sorting uses the effective ordering (nulls last, stable for ties) and
    /// pagination is applied after sorting.
    pub fn apply<'a, R: Record>(&self, items: &'a [R]) -> Vec<&'a R> {
        let mut results: Vec<&R> = items.iter().filter(|item| self.matches(*item)).collect();

        let orders = self.effective_orders();
        if !orders.is_empty() {
            results.sort_by(|a, b| compare_by_orders(*a, *b, orders, &R::accessor));
        }

        let matched = results.len();
        let results = match self.effective_pagination() {
            Some(pagination) => pagination.apply(results),
            None => results,
        };

        trace!(
            total = items.len(),
            matched,
            returned = results.len(),
            "applied criteria"
        );
        results
    }

    /// Counts matching records.
    pub fn count<R: Record>(&self, items: &[R]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Finds the first matching record, ignoring ordering and pagination.
    pub fn find<'a, R: Record>(&self, items: &'a [R]) -> Option<&'a R> {
        items.iter().find(|item| self.matches(*item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::operator::FilterOperator;
    use crate::value::{Number, Value};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        name: String,
        priority: i64,
        archived: bool,
    }

    impl Record for Task {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(&self.name),
                "priority" => Value::Number(Number::I64(self.priority)),
                "archived" => Value::Bool(self.archived),
                _ => Value::Null,
            }
        }
    }

    fn task(name: &str, priority: i64, archived: bool) -> Task {
        Task {
            name: name.to_string(),
            priority,
            archived,
        }
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("Task A", 1, false),
            task("Task B", 2, false),
            task("Urgent Task", 5, false),
            task("Critical Task", 5, true),
            task("Done Task", 3, true),
        ]
    }

    fn filter(field: &str, op: FilterOperator, value: impl Into<crate::FilterValue>) -> Criteria {
        Criteria::from(Filter::new(field, op, value).unwrap())
    }

    #[test]
    fn not_over_null_field_is_two_valued() {
        let not_one = !filter("x", FilterOperator::NotEqual, 1);
        assert!(not_one.matches(&json!({})));
        assert!(not_one.matches(&json!({"x": null})));
        assert!(not_one.matches(&json!({"x": 1})));
        assert!(!not_one.matches(&json!({"x": 2})));

        let present = Criteria::from(Filter::is_not_null("x").unwrap());
        let aligned = &present & &not_one;
        assert!(!aligned.matches(&json!({"x": null})));
        assert!(aligned.matches(&json!({"x": 1})));
    }

    #[test]
    fn empty_criteria_matches_all() {
        let tasks = sample_tasks();
        assert_eq!(Criteria::empty().apply(&tasks).len(), 5);
        assert_eq!((!Criteria::empty()).apply(&tasks).len(), 5);
    }

    #[test]
    fn leaf_ands_filters() {
        let tasks = sample_tasks();
        let criteria = Criteria::new(vec![
            Filter::new("priority", FilterOperator::Equal, 5).unwrap(),
            Filter::new("archived", FilterOperator::Equal, false).unwrap(),
        ]);

        let results = criteria.apply(&tasks);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Urgent Task");
    }

    #[test]
    fn and_with_or() {
        let tasks = sample_tasks();
        let criteria = filter("priority", FilterOperator::Equal, 5)
            & (filter("name", FilterOperator::Contains, "Urgent")
                | filter("name", FilterOperator::Contains, "Critical"));

        assert_eq!(criteria.count(&tasks), 2);
    }

    #[test]
    fn not_inverts() {
        let tasks = sample_tasks();
        let criteria = !filter("archived", FilterOperator::Equal, true);

        let results = criteria.apply(&tasks);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|t| !t.archived));
    }

    #[test]
    fn ordering_and_pagination() {
        let tasks = sample_tasks();
        let criteria = Criteria::empty()
            .order_desc("priority")
            .order_asc("name")
            .paginate(1, 3)
            .unwrap();

        let names: Vec<&str> = criteria
            .apply(&tasks)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["Critical Task", "Urgent Task", "Done Task"]);

        let second_page = Criteria::empty()
            .order_desc("priority")
            .order_asc("name")
            .paginate(2, 3)
            .unwrap();
        assert_eq!(second_page.apply(&tasks).len(), 2);
    }

    #[test]
    fn limit_offset_beyond_results() {
        let tasks = sample_tasks();
        let criteria = Criteria::empty().limit(10, 100).unwrap();
        assert!(criteria.apply(&tasks).is_empty());
    }

    #[test]
    fn find_first_match() {
        let tasks = sample_tasks();
        let criteria = filter("priority", FilterOperator::GreaterOrEqual, 3);
        assert_eq!(criteria.find(&tasks).unwrap().name, "Urgent Task");
        assert!(filter("priority", FilterOperator::Greater, 9)
            .find(&tasks)
            .is_none());
    }

    #[test]
    fn validate_collects_messages() {
        let criteria = Criteria::new(vec![
            Filter::new("age", FilterOperator::GreaterOrEqual, 18)
                .unwrap()
                .with_message("must be an adult"),
            Filter::new("name", FilterOperator::StartsWith, "J").unwrap(),
        ]);

        let result = criteria.validate(&json!({"age": 12, "name": "Ann"}));
        assert!(!result.valid);
        assert_eq!(
            result.messages,
            ["must be an adult", "Field 'name' failed starts_with check"]
        );

        let ok = criteria.validate(&json!({"age": 30, "name": "Jo"}));
        assert!(ok.valid);
        assert!(ok.messages.is_empty());
    }

    #[test]
    fn validate_or_reports_right_branch() {
        let left = Criteria::from(
            Filter::new("a", FilterOperator::Equal, 1)
                .unwrap()
                .with_message("left"),
        );
        let right = Criteria::from(
            Filter::new("b", FilterOperator::Equal, 1)
                .unwrap()
                .with_message("right"),
        );
        let criteria = &left | &right;

        let failed = criteria.validate(&json!({"a": 0, "b": 0}));
        assert!(!failed.valid);
        assert_eq!(failed.messages, ["right"]);

        let passed = criteria.validate(&json!({"a": 0, "b": 1}));
        assert!(passed.valid);
        assert!(passed.messages.is_empty());
    }

    #[test]
    fn validate_and_keeps_both_sides() {
        let a = filter("a", FilterOperator::Equal, 1);
        let b = filter("b", FilterOperator::Equal, 1);

        let result = (&a & &b).validate(&json!({}));
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn validate_not_keeps_child_messages() {
        let criteria = !filter("a", FilterOperator::Equal, 1);

        let result = criteria.validate(&json!({"a": 2}));
        assert!(result.valid);
        assert_eq!(result.messages, ["Field 'a' failed eq check"]);

        let result = criteria.validate(&json!({"a": 1}));
        assert!(!result.valid);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn validate_agrees_with_matches() {
        let record = json!({"age": 40, "email": "x@yahoo.com"});
        let criteria = filter("age", FilterOperator::GreaterOrEqual, 18)
            & !(filter("email", FilterOperator::EndsWith, "@gmail.com")
                | filter("age", FilterOperator::Greater, 65));

        assert!(criteria.matches(&record));
        assert!(criteria.validate(&record).valid);
    }
}
