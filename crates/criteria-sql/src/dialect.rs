//! Placeholder styles for parameterized SQL.

/// Database-specific syntax used by the parameterized converter.
pub trait Dialect: Send + Sync {
    /// Returns the placeholder for the parameter at zero-based `index`.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL and SQLite use `?`
    /// - Python DB-API drivers use `%(parameter_0)s`
    fn placeholder(&self, index: usize) -> String;

    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;
}

/// Named `pyformat` placeholders: `%(parameter_0)s`, `%(parameter_1)s`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct PyFormat;

impl Dialect for PyFormat {
    fn placeholder(&self, index: usize) -> String {
        format!("%(parameter_{index})s")
    }

    fn name(&self) -> &'static str {
        "pyformat"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn name(&self) -> &'static str {
        "SQLite"
    }
}
