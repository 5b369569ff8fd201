use serde_json::Value;

use crate::error::Result;
use crate::local_storage::schema::TableSchema;

enum Term {
    Eq(String, Value),
    IsNull(String),
}

/// Structured WHERE predicate: terms joined with `AND`.
///
/// Column names are checked against the target table before the clause is
/// rendered; values are always bound as parameters.
#[derive(Default)]
pub struct Filter {
    terms: Vec<Term>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `Filter::new().eq("id", id)`.
    pub fn by_id(id: i64) -> Self {
        Self::new().eq("id", id)
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if value.is_null() {
            self.terms.push(Term::IsNull(column.to_string()));
        } else {
            self.terms.push(Term::Eq(column.to_string(), value));
        }
        self
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.terms.push(Term::IsNull(column.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Renders the clause (without the `WHERE` keyword) and its arguments.
    pub fn render(&self, table: &TableSchema) -> Result<(String, Vec<Value>)> {
        let mut clauses = Vec::with_capacity(self.terms.len());
        let mut args = Vec::new();

        for term in &self.terms {
            match term {
                Term::Eq(column, value) => {
                    table.check_column(column)?;
                    clauses.push(format!("{} = ?", column));
                    args.push(value.clone());
                }
                Term::IsNull(column) => {
                    table.check_column(column)?;
                    clauses.push(format!("{} IS NULL", column));
                }
            }
        }

        Ok((clauses.join(" AND "), args))
    }
}
