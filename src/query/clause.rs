use log::warn;

use super::{Error, quote_ident};
use crate::types::Value;

/// An ordered `column -> value` mapping describing exact-match conditions.
///
/// Insertion order is preserved so the compiled clause and its bind values
/// line up deterministically.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Conditions {
    entries: Vec<(String, Value)>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((column.into(), value.into()));
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A compiled WHERE clause and its bind values, in placeholder order.
#[derive(Debug)]
pub struct CompiledClause {
    pub clause: String,
    pub values: Vec<Value>,
}

impl CompiledClause {
    pub fn new(clause: String, values: Vec<Value>) -> Self {
        Self { clause, values }
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.clause, self.values)
    }
}

/// Compiles the conjunction of `column = value` for every named column,
/// numbering placeholders from `$1`.
///
/// Every named column must have a condition value; condition values whose
/// column is not named are skipped with a warning.
pub fn compile_eq(columns: &[&str], conditions: &Conditions) -> Result<CompiledClause, Error> {
    let mut clauses = Vec::with_capacity(columns.len());
    let mut values = Vec::with_capacity(columns.len());

    for (i, column) in columns.iter().enumerate() {
        let value = conditions
            .get(column)
            .ok_or_else(|| Error::MissingCondition((*column).to_owned()))?;
        clauses.push(format!("{} = ${}", quote_ident(column), i + 1));
        values.push(value.clone());
    }

    for (name, _) in conditions.iter() {
        if !columns.iter().any(|column| *column == name) {
            warn!("condition on `{name}` skipped: column was not named for filtering");
        }
    }

    Ok(CompiledClause::new(clauses.join(" AND "), values))
}
