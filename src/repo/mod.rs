//! Repository layer: the connection handle and the single-statement queries
//! issued against the live database. Higher-level guarded operations live in
//! the [`facades`] submodule and are re-exported here.

mod facades;
pub use facades::*;

mod pg_queries;
pub use pg_queries::*;

use sqlx::Postgres;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};

use crate::config::DbConfig;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("database error :: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("configuration error :: {0}")]
    Config(#[from] crate::config::Error),
    #[error("dataset error :: {0}")]
    Dataset(#[from] crate::types::Error),
    #[error("unsupported column type `{ty}` for column `{column}`")]
    UnsupportedColumnType { column: String, ty: String },
}

/// A connection checked out from the pool.
pub type Cx = PoolConnection<Postgres>;

/// An open transaction; dropped without [`Tx::commit`] it rolls back.
pub type Tx = sqlx::Transaction<'static, Postgres>;

/// Lets query functions run against either a checked-out connection or an
/// open transaction.
pub trait AsExec {
    fn as_exec(&mut self) -> &mut PgConnection;
}

impl AsExec for Cx {
    fn as_exec(&mut self) -> &mut PgConnection {
        self
    }
}

impl AsExec for Tx {
    fn as_exec(&mut self) -> &mut PgConnection {
        self
    }
}

impl AsExec for PgConnection {
    fn as_exec(&mut self) -> &mut PgConnection {
        self
    }
}

/// Clone-cheap handle over the connection pool.
///
/// The pool is capped at a single connection: the facade is meant for one
/// logical caller at a time, and scoped acquisition guarantees the
/// connection is returned on every exit path.
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
}

impl Repository {
    pub async fn connect(config: &DbConfig) -> Result<Self, Error> {
        let url = config.url()?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url.as_str())
            .await?;
        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connection(&self) -> Result<Cx, Error> {
        Ok(self.pool.acquire().await?)
    }

    pub async fn transaction(&self) -> Result<Tx, Error> {
        Ok(self.pool.begin().await?)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
