//! Property-based tests for the criteria algebra using proptest.

use criteria::{Criteria, Filter, FilterOperator, FilterValue, Scalar};
use proptest::prelude::*;
use serde_json::{json, Value as Json};

// ============================================================================
// Test helpers
// ============================================================================

fn operator_strategy() -> impl Strategy<Value = FilterOperator> {
    prop::sample::select(vec![
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::Greater,
        FilterOperator::GreaterOrEqual,
        FilterOperator::Less,
        FilterOperator::LessOrEqual,
    ])
}

fn leaf_strategy() -> impl Strategy<Value = Criteria> {
    (
        prop::sample::select(vec!["x", "y"]),
        operator_strategy(),
        -5i64..5,
    )
        .prop_map(|(field, op, value)| {
            Criteria::from(Filter::new(field, op, value).expect("valid comparison filter"))
        })
}

// Random trees of AND / OR / NOT over comparison leaves
fn criteria_strategy() -> impl Strategy<Value = Criteria> {
    leaf_strategy().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a & b),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a | b),
            inner.prop_map(|c| !c),
        ]
    })
}

fn record_strategy() -> impl Strategy<Value = Json> {
    (-6i64..6, -6i64..6).prop_map(|(x, y)| json!({"x": x, "y": y}))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// AND is associative in its evaluated result.
    #[test]
    fn and_is_associative(
        a in criteria_strategy(),
        b in criteria_strategy(),
        c in criteria_strategy(),
        record in record_strategy(),
    ) {
        let left = (&a & &b) & c.clone();
        let right = a & (b & c);
        prop_assert_eq!(left.matches(&record), right.matches(&record));
    }

    /// OR is associative in its evaluated result.
    #[test]
    fn or_is_associative(
        a in criteria_strategy(),
        b in criteria_strategy(),
        c in criteria_strategy(),
        record in record_strategy(),
    ) {
        let left = (&a | &b) | c.clone();
        let right = a | (b | c);
        prop_assert_eq!(left.matches(&record), right.matches(&record));
    }

    /// NOT(NOT(c)) evaluates like c, though the tree is kept as written.
    #[test]
    fn double_negation(c in criteria_strategy(), record in record_strategy()) {
        let twice = !!c.clone();
        prop_assert_eq!(twice.matches(&record), c.matches(&record));
        prop_assert_eq!(twice.depth(), c.depth() + 2);
    }

    /// De Morgan's laws hold for evaluation.
    #[test]
    fn de_morgan(
        a in criteria_strategy(),
        b in criteria_strategy(),
        record in record_strategy(),
    ) {
        prop_assert_eq!(
            (!(&a & &b)).matches(&record),
            (!&a | !&b).matches(&record)
        );
        prop_assert_eq!(
            (!(&a | &b)).matches(&record),
            (!&a & !&b).matches(&record)
        );
    }

    /// Validation agrees with matching.
    #[test]
    fn validate_agrees_with_matches(c in criteria_strategy(), record in record_strategy()) {
        prop_assert_eq!(c.validate(&record).valid, c.matches(&record));
    }

    /// Combining never changes the operands.
    #[test]
    fn combinators_are_pure(a in criteria_strategy(), b in criteria_strategy()) {
        let (a0, b0) = (a.clone(), b.clone());
        let _ = &a & &b;
        let _ = &a | &b;
        let _ = !&a;
        prop_assert_eq!(a, a0);
        prop_assert_eq!(b, b0);
    }

    /// Apply returns exactly the matching records when not paginated.
    #[test]
    fn apply_returns_matches(
        c in criteria_strategy(),
        records in prop::collection::vec(record_strategy(), 0..40),
    ) {
        let results = c.apply(&records);
        prop_assert_eq!(results.len(), c.count(&records));
        prop_assert!(results.iter().all(|r| c.matches(*r)));
    }

    /// Pagination bounds the result size.
    #[test]
    fn pagination_bounds_results(
        records in prop::collection::vec(record_strategy(), 0..60),
        page in 1usize..6,
        size in 1usize..15,
    ) {
        let criteria = Criteria::empty().order_asc("x").paginate(page, size).unwrap();
        let results = criteria.apply(&records);

        let expected = records.len().saturating_sub((page - 1) * size).min(size);
        prop_assert_eq!(results.len(), expected);
    }

    /// Valid filters round-trip their parts through the accessors.
    #[test]
    fn filter_accessors_round_trip(
        field in "[a-z_]{1,12}",
        op in operator_strategy(),
        value in any::<i64>(),
    ) {
        let filter = Filter::new(field.clone(), op, value).unwrap();
        prop_assert_eq!(filter.field(), field.as_str());
        prop_assert_eq!(filter.operator(), op);
        prop_assert_eq!(filter.value(), &FilterValue::Scalar(Scalar::from(value)));
    }

    /// BETWEEN accepts exactly two values.
    #[test]
    fn between_requires_pair(values in prop::collection::vec(any::<i32>(), 0..6)) {
        let result = Filter::new("n", FilterOperator::Between, values.clone());
        prop_assert_eq!(result.is_ok(), values.len() == 2);
    }

    /// IN accepts any non-empty list.
    #[test]
    fn in_requires_non_empty(values in prop::collection::vec("[a-z]{1,4}", 0..6)) {
        let result = Filter::new("tag", FilterOperator::In, values.clone());
        prop_assert_eq!(result.is_ok(), !values.is_empty());
    }
}
