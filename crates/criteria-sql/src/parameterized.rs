//! SQL converter with bound parameters.

use criteria::{Converter, Criteria, Result, Scalar};
use tracing::debug;

use crate::dialect::{Dialect, PyFormat};
use crate::options::SelectOptions;
use crate::renderer::{Renderer, Values};

/// SQL text plus the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<Scalar>,
}

/// Renders criteria as SQL with placeholders instead of literals.
///
/// Same grammar as [`SqlConverter`](crate::SqlConverter), but each value
/// becomes a placeholder from the [`Dialect`]. Pattern operators bind the
/// wildcard-wrapped string (`%v%`), `IN` binds one parameter per element,
/// and `LIMIT`/`OFFSET` stay inline.
///
/// ```
/// use criteria::{Converter, Criteria, Filter, FilterOperator, Scalar};
/// use criteria_sql::{ParameterizedSqlConverter, Postgres};
///
/// let criteria = Criteria::new(vec![
///     Filter::new("name", FilterOperator::Equal, "O'Brien").unwrap(),
///     Filter::new("age", FilterOperator::Between, [18, 65]).unwrap(),
/// ]);
///
/// let query = ParameterizedSqlConverter::new(Postgres)
///     .convert(&criteria, "user")
///     .unwrap();
/// assert_eq!(
///     query.sql,
///     "SELECT * FROM user WHERE name = $1 AND age BETWEEN $2 AND $3;"
/// );
/// assert_eq!(query.params[0], Scalar::from("O'Brien"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParameterizedSqlConverter<D: Dialect = PyFormat> {
    dialect: D,
    options: SelectOptions,
}

impl<D: Dialect> ParameterizedSqlConverter<D> {
    pub fn new(dialect: D) -> Self {
        ParameterizedSqlConverter {
            dialect,
            options: SelectOptions::default(),
        }
    }

    /// Uses the given select and mapping options.
    pub fn with_options(mut self, options: SelectOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the selected columns.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.columns(columns);
        self
    }

    /// Renders `field` as `column`.
    pub fn map_column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.options = self.options.map_column(field, column);
        self
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }
}

impl<D: Dialect> Converter for ParameterizedSqlConverter<D> {
    type Output = BoundQuery;

    fn convert(&self, criteria: &Criteria, target: &str) -> Result<BoundQuery> {
        let mut renderer =
            Renderer::new(&self.options, Values::Bound(&self.dialect), "parameterized sql");
        renderer.render_select(criteria, target)?;
        let (sql, params) = renderer.finish();

        debug!(
            target_name = target,
            dialect = self.dialect.name(),
            sql = %sql,
            params = params.len(),
            "converted criteria"
        );
        Ok(BoundQuery { sql, params })
    }
}
