//! # Filter Compilation
//!
//! This module builds the parameterized WHERE clauses used by conditional
//! deletion. A filter is purely conjunctive: a set of `column = value`
//! equality conditions joined with `AND`, with every value carried as a bind
//! parameter rather than interpolated into the SQL text.

mod clause;
pub use clause::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A column was named for filtering but no condition value was supplied
    /// for it.
    #[error("column `{0}` has no matching condition value")]
    MissingCondition(String),
}

/// Quotes a table or column identifier for PostgreSQL, doubling any embedded
/// quote characters.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
