//! Tree walk shared by the SQL converters.
//!
//! The renderer accumulates the SQL text and, in bound mode, the parameters.
//! Inline mode writes every value as a quoted literal instead.

use criteria::{
    validate_target, Criteria, CriteriaError, Filter, FilterOperator, FilterValue, Node, Result,
    Scalar,
};

use crate::dialect::Dialect;
use crate::options::SelectOptions;

/// How filter values reach the query.
#[derive(Clone, Copy)]
pub(crate) enum Values<'a> {
    /// `'value'`, unescaped.
    Inline,
    /// Placeholders from a dialect, values collected in order.
    Bound(&'a dyn Dialect),
}

/// Position of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Root,
    And,
    Or,
    Not,
}

pub(crate) struct Renderer<'a> {
    sql: String,
    params: Vec<Scalar>,
    values: Values<'a>,
    options: &'a SelectOptions,
    converter: &'static str,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a SelectOptions, values: Values<'a>, converter: &'static str) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            values,
            options,
            converter,
        }
    }

    /// Consumes the renderer and returns the SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Scalar>) {
        (self.sql, self.params)
    }

    /// Renders a complete `SELECT` statement.
    pub fn render_select(&mut self, criteria: &Criteria, target: &str) -> Result<()> {
        let target = validate_target(target)?;
        self.sql.push_str("SELECT ");
        self.sql.push_str(&self.options.select_list());
        self.sql.push_str(" FROM ");
        self.sql.push_str(target);

        // A tree without filters selects everything
        if criteria.has_filters() {
            self.sql.push_str(" WHERE ");
            self.render_node(criteria, Parent::Root)?;
        }

        let orders = criteria.effective_orders();
        if !orders.is_empty() {
            self.sql.push_str(" ORDER BY ");
            for (i, order) in orders.iter().enumerate() {
                if i > 0 {
                    self.sql.push_str(", ");
                }
                self.sql.push_str(self.options.column_for(&order.field));
                self.sql.push(' ');
                self.sql.push_str(order.direction.as_str());
            }
        }

        if let Some(pagination) = criteria.effective_pagination() {
            self.sql.push_str(&format!(
                " LIMIT {} OFFSET {}",
                pagination.limit(),
                pagination.offset()
            ));
        }

        self.sql.push(';');
        Ok(())
    }

    fn render_node(&mut self, criteria: &Criteria, parent: Parent) -> Result<()> {
        match criteria.node() {
            Node::Leaf(filters) => {
                if filters.is_empty() {
                    return Err(CriteriaError::EmptyCriteria);
                }
                let wrap = filters.len() > 1 && matches!(parent, Parent::Or | Parent::Not);
                if wrap {
                    self.sql.push('(');
                }
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(" AND ");
                    }
                    self.render_filter(filter)?;
                }
                if wrap {
                    self.sql.push(')');
                }
            }
            Node::And(left, right) => self.render_binary(Parent::And, left, right)?,
            Node::Or(left, right) => self.render_binary(Parent::Or, left, right)?,
            Node::Not(child) => {
                self.sql.push_str("(NOT ");
                self.render_node(child, Parent::Not)?;
                self.sql.push(')');
            }
        }
        Ok(())
    }

    fn render_binary(&mut self, position: Parent, left: &Criteria, right: &Criteria) -> Result<()> {
        let keyword = if position == Parent::Or { " OR " } else { " AND " };
        self.sql.push('(');
        self.render_node(left, position)?;
        self.sql.push_str(keyword);
        self.render_node(right, position)?;
        self.sql.push(')');
        Ok(())
    }

    fn render_filter(&mut self, filter: &Filter) -> Result<()> {
        let operator = filter.operator();
        let options = self.options;
        let column = options.column_for(filter.field());

        match (operator, filter.value()) {
            (FilterOperator::IsNull | FilterOperator::IsNotNull, FilterValue::None) => {
                self.push_predicate(column, operator);
            }

            (
                FilterOperator::Equal
                | FilterOperator::NotEqual
                | FilterOperator::Greater
                | FilterOperator::GreaterOrEqual
                | FilterOperator::Less
                | FilterOperator::LessOrEqual,
                FilterValue::Scalar(value),
            ) => {
                self.push_predicate(column, operator);
                self.sql.push(' ');
                self.add_value(value.clone());
            }

            (op, FilterValue::Scalar(value)) if op.is_pattern() => {
                let pattern = op
                    .like_pattern(&value.to_string())
                    .ok_or_else(|| self.unsupported(op))?;
                self.push_predicate(column, op);
                self.sql.push(' ');
                self.add_value(Scalar::String(pattern));
            }

            (FilterOperator::In | FilterOperator::NotIn, FilterValue::List(items)) => {
                self.push_predicate(column, operator);
                self.sql.push_str(" (");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(", ");
                    }
                    self.add_value(item.clone());
                }
                self.sql.push(')');
            }

            (FilterOperator::Between | FilterOperator::NotBetween, FilterValue::List(items)) => {
                let [low, high] = items.as_slice() else {
                    return Err(self.unsupported(operator));
                };
                self.push_predicate(column, operator);
                self.sql.push(' ');
                self.add_value(low.clone());
                self.sql.push_str(" AND ");
                self.add_value(high.clone());
            }

            (op, _) => return Err(self.unsupported(op)),
        }
        Ok(())
    }

    fn push_predicate(&mut self, column: &str, operator: FilterOperator) {
        self.sql.push_str(column);
        self.sql.push(' ');
        self.sql.push_str(operator.symbol());
    }

    fn add_value(&mut self, value: Scalar) {
        match self.values {
            Values::Inline => {
                self.sql.push('\'');
                self.sql.push_str(&value.to_string());
                self.sql.push('\'');
            }
            Values::Bound(dialect) => {
                self.params.push(value);
                let placeholder = dialect.placeholder(self.params.len() - 1);
                self.sql.push_str(&placeholder);
            }
        }
    }

    fn unsupported(&self, operator: FilterOperator) -> CriteriaError {
        CriteriaError::UnsupportedOperator {
            operator: operator.to_string(),
            converter: self.converter,
        }
    }
}
