//! Criteria expression trees.
//!
//! A [`Criteria`] is an immutable boolean expression over [`Filter`]s. Leaves
//! hold filters that are implicitly AND-ed together; internal nodes combine
//! child criteria with AND, OR or NOT. Any node may carry ordering and
//! pagination directives.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::sync::Arc;

use crate::error::{CriteriaError, Result};
use crate::filter::Filter;
use crate::ordering::{Order, OrderDirection};
use crate::pagination::Pagination;

/// Boolean connective of an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And,
    Or,
    /// Unary.
    Not,
}

impl BooleanOperator {
    /// Returns the SQL keyword of this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
            BooleanOperator::Not => "NOT",
        }
    }

    /// Returns `true` for `And` and `Or`.
    pub fn is_binary(self) -> bool {
        !matches!(self, BooleanOperator::Not)
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Shape of a criteria node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Filters AND-ed together, in order.
    Leaf(Vec<Filter>),
    And(Arc<Criteria>, Arc<Criteria>),
    Or(Arc<Criteria>, Arc<Criteria>),
    Not(Arc<Criteria>),
}

impl Node {
    /// The boolean operator of an internal node, `None` for leaves.
    pub fn operator(&self) -> Option<BooleanOperator> {
        match self {
            Node::Leaf(_) => None,
            Node::And(..) => Some(BooleanOperator::And),
            Node::Or(..) => Some(BooleanOperator::Or),
            Node::Not(_) => Some(BooleanOperator::Not),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Leaf(Vec::new())
    }
}

/// A composable boolean expression over filters.
///
/// Combinators never touch their operands; they return new trees that share
/// the operands behind [`Arc`].
///
/// # Example
///
/// ```
/// use criteria::{Criteria, Filter, FilterOperator};
///
/// let is_adult = Criteria::new(vec![
///     Filter::new("age", FilterOperator::GreaterOrEqual, 18).unwrap(),
/// ]);
/// let gmail = Criteria::new(vec![
///     Filter::new("email", FilterOperator::EndsWith, "@gmail.com").unwrap(),
/// ]);
/// let yahoo = Criteria::new(vec![
///     Filter::new("email", FilterOperator::EndsWith, "@yahoo.com").unwrap(),
/// ]);
///
/// let criteria = &is_adult & &(&gmail | &yahoo);
/// assert_eq!(criteria.depth(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    node: Node,
    orders: Vec<Order>,
    pagination: Option<Pagination>,
}

impl Criteria {
    /// Creates a leaf whose filters are AND-ed together.
    ///
    /// An empty list is allowed and matches everything.
    pub fn new(filters: Vec<Filter>) -> Self {
        Criteria::from_node(Node::Leaf(filters))
    }

    /// Creates a criteria with no filters.
    pub fn empty() -> Self {
        Criteria::default()
    }

    fn from_node(node: Node) -> Self {
        Criteria {
            node,
            orders: Vec::new(),
            pagination: None,
        }
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// Returns `self AND other`.
    pub fn and(&self, other: &Criteria) -> Criteria {
        Criteria::from_node(Node::And(Arc::new(self.clone()), Arc::new(other.clone())))
    }

    /// Returns `self OR other`.
    pub fn or(&self, other: &Criteria) -> Criteria {
        Criteria::from_node(Node::Or(Arc::new(self.clone()), Arc::new(other.clone())))
    }

    /// Returns `NOT self`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Criteria {
        Criteria::from_node(Node::Not(Arc::new(self.clone())))
    }

    /// Combines operands with an explicit boolean operator.
    ///
    /// `Not` takes only `left`; `And` and `Or` need both operands.
    ///
    /// ```
    /// use criteria::{BooleanOperator, Criteria};
    ///
    /// let a = Criteria::empty();
    /// assert!(Criteria::combine(BooleanOperator::Not, a.clone(), None).is_ok());
    /// assert!(Criteria::combine(BooleanOperator::Not, a.clone(), Some(a.clone())).is_err());
    /// assert!(Criteria::combine(BooleanOperator::And, a, None).is_err());
    /// ```
    pub fn combine(
        operator: BooleanOperator,
        left: Criteria,
        right: Option<Criteria>,
    ) -> Result<Criteria> {
        match (operator, right) {
            (BooleanOperator::And, Some(right)) => Ok(left & right),
            (BooleanOperator::Or, Some(right)) => Ok(left | right),
            (BooleanOperator::Not, None) => Ok(!left),
            (BooleanOperator::Not, Some(_)) => Err(CriteriaError::InvalidComposition(
                "NOT is unary and takes no right operand".to_string(),
            )),
            (operator, None) => Err(CriteriaError::InvalidComposition(format!(
                "{operator} requires a right operand"
            ))),
        }
    }

    // ========================================================================
    // Ordering and pagination
    // ========================================================================

    /// Appends an ordering directive to this node.
    pub fn order_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.orders.push(Order::new(field, direction));
        self
    }

    /// Appends an ascending ordering directive.
    pub fn order_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, OrderDirection::Asc)
    }

    /// Appends a descending ordering directive.
    pub fn order_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, OrderDirection::Desc)
    }

    /// Sets page-based pagination. `page` is one-based.
    pub fn paginate(self, page: usize, size: usize) -> Result<Self> {
        self.with_pagination(Pagination::page(page, size)?)
    }

    /// Sets limit/offset pagination.
    pub fn limit(self, limit: usize, offset: usize) -> Result<Self> {
        self.with_pagination(Pagination::limit_offset(limit, offset)?)
    }

    /// Replaces the pagination directive of this node.
    ///
    /// Directives built from their fields are checked like
    /// [`Pagination::page`] and [`Pagination::limit_offset`].
    pub fn with_pagination(mut self, pagination: Pagination) -> Result<Self> {
        self.pagination = Some(pagination.validate()?);
        Ok(self)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The shape of this node.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Filters of a leaf, or an empty slice for internal nodes.
    pub fn filters(&self) -> &[Filter] {
        match &self.node {
            Node::Leaf(filters) => filters,
            _ => &[],
        }
    }

    /// Returns `true` if any node of the tree holds a filter.
    pub fn has_filters(&self) -> bool {
        match &self.node {
            Node::Leaf(filters) => !filters.is_empty(),
            Node::And(left, right) | Node::Or(left, right) => {
                left.has_filters() || right.has_filters()
            }
            Node::Not(child) => child.has_filters(),
        }
    }

    /// Ordering directives attached to this node only.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Pagination attached to this node only.
    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Ordering that applies to the whole tree.
    ///
    /// Directives on the shallowest annotated node win; between nodes at the
    /// same depth the right-most one wins.
    ///
    /// ```
    /// use criteria::Criteria;
    ///
    /// let inner = Criteria::empty().order_asc("name");
    /// let outer = (&inner & &Criteria::empty()).order_desc("age");
    /// assert_eq!(outer.effective_orders()[0].field, "age");
    ///
    /// let unordered = &inner & &Criteria::empty();
    /// assert_eq!(unordered.effective_orders()[0].field, "name");
    /// ```
    pub fn effective_orders(&self) -> &[Order] {
        self.shallowest(0, |c| {
            (!c.orders.is_empty()).then_some(c.orders.as_slice())
        })
        .map(|(_, orders)| orders)
        .unwrap_or_default()
    }

    /// Pagination that applies to the whole tree, resolved like
    /// [`effective_orders`](Self::effective_orders).
    pub fn effective_pagination(&self) -> Option<Pagination> {
        self.shallowest(0, |c| c.pagination)
            .map(|(_, pagination)| pagination)
    }

    /// Number of node levels; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        match &self.node {
            Node::Leaf(_) => 1,
            Node::And(left, right) | Node::Or(left, right) => {
                1 + left.depth().max(right.depth())
            }
            Node::Not(child) => 1 + child.depth(),
        }
    }

    fn shallowest<'a, T>(
        &'a self,
        depth: usize,
        pick: fn(&'a Criteria) -> Option<T>,
    ) -> Option<(usize, T)> {
        if let Some(found) = pick(self) {
            return Some((depth, found));
        }
        match &self.node {
            Node::Leaf(_) => None,
            Node::Not(child) => child.shallowest(depth + 1, pick),
            Node::And(left, right) | Node::Or(left, right) => {
                let left = left.shallowest(depth + 1, pick);
                let right = right.shallowest(depth + 1, pick);
                match (left, right) {
                    (Some(l), Some(r)) => Some(if l.0 < r.0 { l } else { r }),
                    (l, r) => r.or(l),
                }
            }
        }
    }
}

impl From<Filter> for Criteria {
    fn from(filter: Filter) -> Self {
        Criteria::new(vec![filter])
    }
}

impl From<Vec<Filter>> for Criteria {
    fn from(filters: Vec<Filter>) -> Self {
        Criteria::new(filters)
    }
}

// ============================================================================
// Operator overloads
// ============================================================================

impl BitAnd for Criteria {
    type Output = Criteria;

    fn bitand(self, rhs: Criteria) -> Criteria {
        Criteria::from_node(Node::And(Arc::new(self), Arc::new(rhs)))
    }
}

impl BitAnd<&Criteria> for &Criteria {
    type Output = Criteria;

    fn bitand(self, rhs: &Criteria) -> Criteria {
        self.and(rhs)
    }
}

impl BitOr for Criteria {
    type Output = Criteria;

    fn bitor(self, rhs: Criteria) -> Criteria {
        Criteria::from_node(Node::Or(Arc::new(self), Arc::new(rhs)))
    }
}

impl BitOr<&Criteria> for &Criteria {
    type Output = Criteria;

    fn bitor(self, rhs: &Criteria) -> Criteria {
        self.or(rhs)
    }
}

impl std::ops::Not for Criteria {
    type Output = Criteria;

    fn not(self) -> Criteria {
        Criteria::from_node(Node::Not(Arc::new(self)))
    }
}

impl std::ops::Not for &Criteria {
    type Output = Criteria;

    fn not(self) -> Criteria {
        Criteria::not(self)
    }
}
