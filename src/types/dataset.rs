use std::fmt;

use super::{Error, Value};

/// An in-memory, ordered collection of named columns and row-major rows.
///
/// Datasets are the exchange format of the table facade: they describe the
/// layout of a table to create, carry the rows to write, and hold the rows
/// read back. Row order is preserved exactly as given; no schema validation
/// happens beyond column arity checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Creates an empty dataset with the given column layout.
    pub fn new<S>(columns: impl IntoIterator<Item = S>) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Builds a dataset column-by-column, the way a dict-of-lists literal
    /// reads. All columns must have the same number of values.
    pub fn from_columns<S>(
        columns: impl IntoIterator<Item = (S, Vec<Value>)>,
    ) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        let columns: Vec<(String, Vec<Value>)> = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .collect();

        let mut data = Self::new(columns.iter().map(|(name, _)| name.clone()))?;

        let expected = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        for (name, values) in &columns {
            if values.len() != expected {
                return Err(Error::RaggedColumn {
                    name: name.clone(),
                    expected,
                    got: values.len(),
                });
            }
        }

        for i in 0..expected {
            let row = columns.iter().map(|(_, values)| values[i].clone()).collect();
            data.push_row(row)?;
        }

        Ok(data)
    }

    /// Appends a row. The row must have exactly one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), Error> {
        if row.len() != self.columns.len() {
            return Err(Error::ColumnCountMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// DDL column types inferred from the first non-null value of each
    /// column. A column with no non-null values falls back to `TEXT`.
    pub(crate) fn column_types(&self) -> Vec<&'static str> {
        (0..self.width())
            .map(|i| {
                self.rows
                    .iter()
                    .find_map(|row| row[i].pg_type())
                    .unwrap_or("TEXT")
            })
            .collect()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "(empty dataset)");
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let render = |f: &mut fmt::Formatter<'_>, row: &[String]| -> fmt::Result {
            let line = row
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())
        };

        render(f, &self.columns)?;
        for row in &cells {
            render(f, row)?;
        }
        write!(f, "({} rows)", self.rows.len())
    }
}
