//! Select-list and column-mapping options shared by the SQL converters.

use std::collections::HashMap;

/// Which columns to select and how criteria fields map to columns.
///
/// ```
/// use criteria_sql::SelectOptions;
///
/// let options = SelectOptions::new()
///     .columns(["id", "email"])
///     .map_column("email", "email_address");
///
/// assert_eq!(options.select_list(), "id, email");
/// assert_eq!(options.column_for("email"), "email_address");
/// assert_eq!(options.column_for("age"), "age");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    columns: Vec<String>,
    mapping: HashMap<String, String>,
}

impl SelectOptions {
    /// Selects `*` with no column mapping.
    pub fn new() -> Self {
        SelectOptions::default()
    }

    /// Replaces the selected columns. An empty list selects `*`.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Renders `field` as `column` in WHERE and ORDER BY clauses.
    pub fn map_column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.mapping.insert(field.into(), column.into());
        self
    }

    /// The column a criteria field renders as.
    pub fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.mapping.get(field).map_or(field, String::as_str)
    }

    /// The comma-separated select list.
    pub fn select_list(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        }
    }
}
