//! Tabular data exchanged with the database.

mod dataset;
pub use dataset::*;

mod mode;
pub use mode::*;

mod value;
pub use value::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown insert mode `{0}`")]
    UnknownMode(String),
    #[error("duplicate column name `{0}`")]
    DuplicateColumn(String),
    #[error("row has {got} values, dataset has {expected} columns")]
    ColumnCountMismatch { expected: usize, got: usize },
    #[error("column `{name}` has {got} values, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        got: usize,
    },
}
