use log::trace;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Column, Postgres, Row, TypeInfo};

use super::{AsExec, Error};
use crate::query::{CompiledClause, quote_ident};
use crate::types::{Dataset, Value};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Bind-parameter cap per statement (PostgreSQL wire protocol limit).
const MAX_BIND_PARAMS: usize = 65_535;

/// Returns the names of all base tables visible in the current schema,
/// straight from the live catalog.
pub async fn table_names(exec: &mut impl AsExec) -> Result<Vec<String>, Error> {
    let rows = sqlx::query(
        "SELECT table_name::text AS table_name FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_type = 'BASE TABLE' \
         ORDER BY table_name",
    )
    .fetch_all(exec.as_exec())
    .await?;

    rows.iter()
        .map(|row| Ok(row.try_get("table_name")?))
        .collect()
}

/// Returns the column names of a table in ordinal position order.
pub async fn table_columns(exec: &mut impl AsExec, table: &str) -> Result<Vec<String>, Error> {
    let rows = sqlx::query(
        "SELECT column_name::text AS column_name FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name = $1 \
         ORDER BY ordinal_position",
    )
    .bind(table)
    .fetch_all(exec.as_exec())
    .await?;

    rows.iter()
        .map(|row| Ok(row.try_get("column_name")?))
        .collect()
}

pub async fn create_table(
    exec: &mut impl AsExec,
    table: &str,
    data: &Dataset,
) -> Result<(), Error> {
    let ddl = create_table_ddl(table, data);
    trace!("creating table: {ddl}");
    sqlx::query(&ddl).execute(exec.as_exec()).await?;
    Ok(())
}

pub async fn drop_table(exec: &mut impl AsExec, table: &str) -> Result<(), Error> {
    sqlx::query(&format!("DROP TABLE {}", quote_ident(table)))
        .execute(exec.as_exec())
        .await?;
    Ok(())
}

pub async fn truncate(exec: &mut impl AsExec, table: &str) -> Result<(), Error> {
    sqlx::query(&format!("TRUNCATE TABLE {}", quote_ident(table)))
        .execute(exec.as_exec())
        .await?;
    Ok(())
}

/// Writes all dataset rows with multi-row parameterized INSERTs, chunked so
/// a single statement never exceeds the bind-parameter cap.
pub async fn insert_rows(exec: &mut impl AsExec, table: &str, data: &Dataset) -> Result<(), Error> {
    let width = data.width();
    if data.is_empty() || width == 0 {
        return Ok(());
    }

    let types = data.column_types();
    for chunk in data.rows().chunks(rows_per_statement(width)) {
        let stmt = insert_statement(table, data.columns(), chunk.len());
        let mut query = sqlx::query(&stmt);
        for row in chunk {
            for (value, ty) in row.iter().zip(&types) {
                query = bind_value(query, value, ty);
            }
        }
        query.execute(exec.as_exec()).await?;
    }

    Ok(())
}

/// Executes a parameterized DELETE with the compiled WHERE clause and
/// returns the number of removed rows.
pub async fn delete_where(
    exec: &mut impl AsExec,
    table: &str,
    clause: CompiledClause,
) -> Result<u64, Error> {
    let (where_clause, values) = clause.into_parts();
    let stmt = format!("DELETE FROM {} WHERE {}", quote_ident(table), where_clause);
    trace!("deleting: {stmt}");

    let mut query = sqlx::query(&stmt);
    for value in &values {
        query = bind_value(query, value, "TEXT");
    }

    Ok(query.execute(exec.as_exec()).await?.rows_affected())
}

/// Unconditional full-table select, marshaled into a [`Dataset`]. The column
/// layout comes from the live catalog so empty tables keep their columns.
pub async fn select_all(exec: &mut impl AsExec, table: &str) -> Result<Dataset, Error> {
    let columns = table_columns(exec, table).await?;
    let mut data = Dataset::new(columns)?;

    let stmt = format!("SELECT * FROM {}", quote_ident(table));
    let rows = sqlx::query(&stmt).fetch_all(exec.as_exec()).await?;
    for row in &rows {
        data.push_row(cast_row(row)?)?;
    }

    Ok(data)
}

/// Runs an arbitrary SQL string and returns the driver's raw rows.
pub async fn execute_raw(exec: &mut impl AsExec, sql: &str) -> Result<Vec<PgRow>, Error> {
    Ok(sqlx::query(sql).fetch_all(exec.as_exec()).await?)
}

fn rows_per_statement(width: usize) -> usize {
    (MAX_BIND_PARAMS / width).max(1)
}

fn create_table_ddl(table: &str, data: &Dataset) -> String {
    let columns: Vec<String> = data
        .columns()
        .iter()
        .zip(data.column_types())
        .map(|(name, ty)| format!("{} {}", quote_ident(name), ty))
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", "))
}

fn insert_statement(table: &str, columns: &[String], row_count: usize) -> String {
    let column_list = columns
        .iter()
        .map(|name| quote_ident(name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut placeholder = 1;
    let tuples: Vec<String> = (0..row_count)
        .map(|_| {
            let row: Vec<String> = (0..columns.len())
                .map(|_| {
                    let p = format!("${placeholder}");
                    placeholder += 1;
                    p
                })
                .collect();
            format!("({})", row.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote_ident(table),
        column_list,
        tuples.join(", ")
    )
}

/// Binds one value. Nulls are bound with the column's inferred type so the
/// server-side parameter type matches the target column.
fn bind_value<'q>(query: PgQuery<'q>, value: &Value, ty: &str) -> PgQuery<'q> {
    match value {
        Value::Null => match ty {
            "BIGINT" => query.bind(Option::<i64>::None),
            "DOUBLE PRECISION" => query.bind(Option::<f64>::None),
            "BOOLEAN" => query.bind(Option::<bool>::None),
            _ => query.bind(Option::<String>::None),
        },
        Value::Integer(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
        Value::Boolean(v) => query.bind(*v),
    }
}

fn cast_row(row: &PgRow) -> Result<Vec<Value>, Error> {
    let mut values = Vec::with_capacity(row.len());

    for (i, column) in row.columns().iter().enumerate() {
        let ty = column.type_info().name();
        let value = match ty {
            "INT2" => row
                .try_get::<Option<i16>, _>(i)?
                .map_or(Value::Null, |v| Value::Integer(i64::from(v))),
            "INT4" => row
                .try_get::<Option<i32>, _>(i)?
                .map_or(Value::Null, |v| Value::Integer(i64::from(v))),
            "INT8" => row
                .try_get::<Option<i64>, _>(i)?
                .map_or(Value::Null, Value::Integer),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(i)?
                .map_or(Value::Null, |v| Value::Float(f64::from(v))),
            "FLOAT8" => row
                .try_get::<Option<f64>, _>(i)?
                .map_or(Value::Null, Value::Float),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(i)?
                .map_or(Value::Null, Value::Text),
            "BOOL" => row
                .try_get::<Option<bool>, _>(i)?
                .map_or(Value::Null, Value::Boolean),
            other => {
                return Err(Error::UnsupportedColumnType {
                    column: column.name().to_owned(),
                    ty: other.to_owned(),
                });
            }
        };
        values.push(value);
    }

    Ok(values)
}
