use log::{info, warn};
use sqlx::postgres::PgRow;

use super::FacadeError;
use crate::{config, query, repo, timing, types};

/// Outcome of a guarded operation.
///
/// Guard failures are benign: the operation returns `Ok` with a status other
/// than [`OpStatus::Applied`], so callers can tell a trivial success from an
/// effective one without treating either as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    /// The statement ran and was committed.
    Applied,
    /// The table already exists; nothing was created.
    AlreadyExists,
    /// The target table does not exist; nothing was executed.
    MissingTable,
    /// No columns or condition values were supplied; nothing was deleted.
    EmptyFilter,
}

impl OpStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Guarded facade over a single PostgreSQL database.
///
/// Every table-level operation re-queries the live catalog for table names
/// immediately before acting. Nothing is cached between calls: the database
/// is external shared state and its schema can change out from under us.
/// Each mutating operation runs inside one transaction committed before
/// returning, and every operation reports its wall-clock duration through
/// [`crate::timing::timed`].
pub struct FacadeTable {
    repo: repo::Repository,
}

impl FacadeTable {
    /// Opens the connection described by `config` and wraps it.
    pub async fn connect(config: &config::DbConfig) -> Result<Self, FacadeError> {
        Ok(Self::new(repo::Repository::connect(config).await?))
    }

    pub fn new(repo: repo::Repository) -> Self {
        Self { repo }
    }

    /// Creates a table laid out after the dataset and writes all its rows.
    ///
    /// An existing table of the same name is left untouched and reported as
    /// [`OpStatus::AlreadyExists`]. No index or key column is added.
    pub async fn create_table(
        &self,
        table: &str,
        data: &types::Dataset,
    ) -> Result<OpStatus, FacadeError> {
        timing::timed("create_table", async {
            if self.exists(table).await? {
                warn!("table `{table}` already exists, nothing to create");
                return Ok(OpStatus::AlreadyExists);
            }

            let mut tx = self.repo.transaction().await?;
            repo::create_table(&mut tx, table, data).await?;
            repo::insert_rows(&mut tx, table, data).await?;
            tx.commit().await.map_err(repo::Error::from)?;

            info!("table `{table}` created with {} rows", data.len());
            Ok(OpStatus::Applied)
        })
        .await
    }

    /// Writes the dataset into an existing table, appending to or replacing
    /// its current contents depending on `mode`.
    pub async fn insert(
        &self,
        table: &str,
        data: &types::Dataset,
        mode: types::Mode,
    ) -> Result<OpStatus, FacadeError> {
        timing::timed("insert", async {
            if !self.exists(table).await? {
                warn!("table `{table}` does not exist, nothing to insert");
                return Ok(OpStatus::MissingTable);
            }

            let mut tx = self.repo.transaction().await?;
            match mode {
                types::Mode::Append => {
                    repo::insert_rows(&mut tx, table, data).await?;
                }
                types::Mode::Replace => {
                    repo::drop_table(&mut tx, table).await?;
                    repo::create_table(&mut tx, table, data).await?;
                    repo::insert_rows(&mut tx, table, data).await?;
                }
            }
            tx.commit().await.map_err(repo::Error::from)?;

            info!("{} rows written to table `{table}` ({mode})", data.len());
            Ok(OpStatus::Applied)
        })
        .await
    }

    /// Removes all rows from a table, preserving its schema.
    pub async fn truncate(&self, table: &str) -> Result<OpStatus, FacadeError> {
        timing::timed("truncate", async {
            if !self.exists(table).await? {
                warn!("table `{table}` does not exist, nothing to truncate");
                return Ok(OpStatus::MissingTable);
            }

            let mut tx = self.repo.transaction().await?;
            repo::truncate(&mut tx, table).await?;
            tx.commit().await.map_err(repo::Error::from)?;

            info!("table `{table}` truncated");
            Ok(OpStatus::Applied)
        })
        .await
    }

    /// Reads the whole table back as a dataset, or `None` when the table
    /// does not exist.
    pub async fn read(&self, table: &str) -> Result<Option<types::Dataset>, FacadeError> {
        timing::timed("read", async {
            if !self.exists(table).await? {
                warn!("table `{table}` does not exist, nothing to read");
                return Ok(None);
            }

            let mut cx = self.repo.connection().await?;
            let data = repo::select_all(&mut cx, table).await?;
            Ok(Some(data))
        })
        .await
    }

    /// Deletes the rows matching the conjunction of `column = value` for
    /// every named column.
    ///
    /// Empty `columns` or `conditions` skip with [`OpStatus::EmptyFilter`];
    /// a named column with no condition value is a hard error.
    pub async fn delete(
        &self,
        table: &str,
        columns: &[&str],
        conditions: &query::Conditions,
    ) -> Result<OpStatus, FacadeError> {
        timing::timed("delete", async {
            if !self.exists(table).await? {
                warn!("table `{table}` does not exist, nothing to delete");
                return Ok(OpStatus::MissingTable);
            }
            if columns.is_empty() || conditions.is_empty() {
                warn!("no columns or conditions specified, nothing to delete");
                return Ok(OpStatus::EmptyFilter);
            }

            let clause = query::compile_eq(columns, conditions)?;

            let mut tx = self.repo.transaction().await?;
            let removed = repo::delete_where(&mut tx, table, clause).await?;
            tx.commit().await.map_err(repo::Error::from)?;

            info!("{removed} rows deleted from table `{table}`");
            Ok(OpStatus::Applied)
        })
        .await
    }

    /// Escape hatch: runs an arbitrary SQL string with no guard, commits,
    /// and returns the driver's raw rows. Driver failures surface to the
    /// caller unmodified.
    pub async fn execute(&self, sql: &str) -> Result<Vec<PgRow>, FacadeError> {
        timing::timed("execute", async {
            let mut tx = self.repo.transaction().await?;
            let rows = repo::execute_raw(&mut tx, sql).await?;
            tx.commit().await.map_err(repo::Error::from)?;
            Ok(rows)
        })
        .await
    }

    /// Live catalog membership check, performed anew on every operation.
    async fn exists(&self, table: &str) -> Result<bool, FacadeError> {
        let mut cx = self.repo.connection().await?;
        let names = repo::table_names(&mut cx).await?;
        Ok(names.iter().any(|name| name == table))
    }
}
