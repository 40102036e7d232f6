//! The reference SQL converter with inline literals.

use criteria::{Converter, Criteria, Result};
use tracing::debug;

use crate::options::SelectOptions;
use crate::renderer::{Renderer, Values};

/// Renders criteria as a single SQL string with inline literals.
///
/// ```text
/// SELECT <columns> FROM <target>[ WHERE <expr>][ ORDER BY <fields>][ LIMIT <n> OFFSET <m>];
/// ```
///
/// Values are wrapped in single quotes and **not escaped**. A value that
/// contains a quote produces broken or injectable SQL. Use
/// [`ParameterizedSqlConverter`](crate::ParameterizedSqlConverter) for any
/// value that does not come from trusted code.
///
/// # Example
///
/// ```
/// use criteria::{Converter, Criteria, Filter, FilterOperator};
/// use criteria_sql::SqlConverter;
///
/// let is_adult = Criteria::from(
///     Filter::new("age", FilterOperator::GreaterOrEqual, 18).unwrap(),
/// );
///
/// let sql = SqlConverter::new().convert(&is_adult, "user").unwrap();
/// assert_eq!(sql, "SELECT * FROM user WHERE age >= '18';");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlConverter {
    options: SelectOptions,
}

impl SqlConverter {
    /// Selects `*` with no column mapping.
    pub fn new() -> Self {
        SqlConverter::default()
    }

    /// Uses the given select and mapping options.
    pub fn with_options(options: SelectOptions) -> Self {
        SqlConverter { options }
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

    /// The current options.
    pub fn options(&self) -> &SelectOptions {
        &self.options
    }
}

impl Converter for SqlConverter {
    type Output = String;

    fn convert(&self, criteria: &Criteria, target: &str) -> Result<String> {
        let mut renderer = Renderer::new(&self.options, Values::Inline, "sql");
        renderer.render_select(criteria, target)?;
        let (sql, _) = renderer.finish();

        debug!(target_name = target, sql = %sql, "converted criteria");
        Ok(sql)
    }
}
