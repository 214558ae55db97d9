//! End-to-end tests against a live PostgreSQL instance.
//!
//! These need the `DATABASE_*` environment variables (a `.env` file works)
//! pointing at a database the test role may create and drop tables in.
//! They are ignored by default; run them with `cargo test -- --ignored`.

use pgfacade::config::DbConfig;
use pgfacade::query::Conditions;
use pgfacade::repo::{FacadeTable, OpStatus};
use pgfacade::types::{Dataset, Mode, Value};

async fn facade() -> FacadeTable {
    dotenv::dotenv().ok();
    let config = DbConfig::from_env().expect("DATABASE_* variables must be set");
    FacadeTable::connect(&config)
        .await
        .expect("database must be reachable")
}

/// Each test works on its own table, cleared up-front so reruns start clean.
async fn reset(db: &FacadeTable, table: &str) {
    db.execute(&format!("DROP TABLE IF EXISTS \"{table}\""))
        .await
        .expect("drop must succeed");
}

fn sample() -> Dataset {
    Dataset::from_columns([
        ("column1", vec!["value1".into(), "value2".into(), "value3".into()]),
        ("column2", vec!["value1".into(), "value2".into(), "value3".into()]),
    ])
    .unwrap()
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn missing_table_operations_are_noops() {
    let db = facade().await;
    let table = "pgfacade_it_missing";
    reset(&db, table).await;

    let data = sample();
    assert_eq!(
        db.insert(table, &data, Mode::Append).await.unwrap(),
        OpStatus::MissingTable
    );
    assert_eq!(db.truncate(table).await.unwrap(), OpStatus::MissingTable);
    assert_eq!(db.read(table).await.unwrap(), None);
    assert_eq!(
        db.delete(table, &["column1"], &Conditions::new().with("column1", "value1"))
            .await
            .unwrap(),
        OpStatus::MissingTable
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn create_then_read_roundtrip() {
    let db = facade().await;
    let table = "pgfacade_it_roundtrip";
    reset(&db, table).await;

    let data = sample();
    assert_eq!(db.create_table(table, &data).await.unwrap(), OpStatus::Applied);
    assert_eq!(db.read(table).await.unwrap(), Some(data.clone()));

    // A second create is reported and leaves the contents alone.
    assert_eq!(
        db.create_table(table, &Dataset::new(["other"]).unwrap())
            .await
            .unwrap(),
        OpStatus::AlreadyExists
    );
    assert_eq!(db.read(table).await.unwrap(), Some(data));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn create_with_zero_rows_reads_back_empty() {
    let db = facade().await;
    let table = "pgfacade_it_zero_rows";
    reset(&db, table).await;

    let data = Dataset::new(["column1", "column2"]).unwrap();
    assert_eq!(db.create_table(table, &data).await.unwrap(), OpStatus::Applied);

    let read = db.read(table).await.unwrap().unwrap();
    assert_eq!(read.columns(), ["column1", "column2"]);
    assert!(read.is_empty());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn replace_overwrites_prior_contents() {
    let db = facade().await;
    let table = "pgfacade_it_replace";
    reset(&db, table).await;

    db.create_table(table, &sample()).await.unwrap();

    let replacement = Dataset::from_columns([
        ("column1", vec!["fresh".into()]),
        ("column2", vec!["fresh".into()]),
    ])
    .unwrap();
    assert_eq!(
        db.insert(table, &replacement, Mode::Replace).await.unwrap(),
        OpStatus::Applied
    );
    assert_eq!(db.read(table).await.unwrap(), Some(replacement));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn append_preserves_existing_rows() {
    let db = facade().await;
    let table = "pgfacade_it_append";
    reset(&db, table).await;

    let data = sample();
    db.create_table(table, &data).await.unwrap();
    assert_eq!(
        db.insert(table, &data, Mode::Append).await.unwrap(),
        OpStatus::Applied
    );

    let read = db.read(table).await.unwrap().unwrap();
    assert_eq!(read.len(), 6);
    // Existing rows come before the newly appended ones.
    assert_eq!(read.rows()[..3], *data.rows());
    assert_eq!(read.rows()[3..], *data.rows());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn truncate_keeps_the_table() {
    let db = facade().await;
    let table = "pgfacade_it_truncate";
    reset(&db, table).await;

    let data = sample();
    db.create_table(table, &data).await.unwrap();
    assert_eq!(db.truncate(table).await.unwrap(), OpStatus::Applied);

    let read = db.read(table).await.unwrap().unwrap();
    assert!(read.is_empty());
    assert_eq!(read.columns(), ["column1", "column2"]);

    // The table is still there, so appending succeeds.
    assert_eq!(
        db.insert(table, &data, Mode::Append).await.unwrap(),
        OpStatus::Applied
    );
    assert_eq!(db.read(table).await.unwrap(), Some(data));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn delete_removes_exactly_the_matching_rows() {
    let db = facade().await;
    let table = "pgfacade_it_delete";
    reset(&db, table).await;

    // Duplicate and non-matching values in the filtered column.
    let data = Dataset::from_columns([
        (
            "label",
            vec!["v1".into(), "v1".into(), "other".into(), "v1x".into()],
        ),
        (
            "seq",
            vec![1i64.into(), 2i64.into(), 3i64.into(), 4i64.into()],
        ),
    ])
    .unwrap();
    db.create_table(table, &data).await.unwrap();

    assert_eq!(
        db.delete(table, &["label"], &Conditions::new().with("label", "v1"))
            .await
            .unwrap(),
        OpStatus::Applied
    );

    let read = db.read(table).await.unwrap().unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(
        read.rows()[0],
        vec![Value::from("other"), Value::from(3i64)]
    );
    assert_eq!(read.rows()[1], vec![Value::from("v1x"), Value::from(4i64)]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn empty_filter_leaves_the_table_unchanged() {
    let db = facade().await;
    let table = "pgfacade_it_empty_filter";
    reset(&db, table).await;

    let data = sample();
    db.create_table(table, &data).await.unwrap();

    assert_eq!(
        db.delete(table, &[], &Conditions::new().with("column1", "value1"))
            .await
            .unwrap(),
        OpStatus::EmptyFilter
    );
    assert_eq!(
        db.delete(table, &["column1"], &Conditions::new())
            .await
            .unwrap(),
        OpStatus::EmptyFilter
    );
    assert_eq!(db.read(table).await.unwrap(), Some(data));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn demo_scenario_leaves_two_rows() {
    let db = facade().await;
    let table = "pgfacade_it_scenario";
    reset(&db, table).await;

    db.create_table(table, &sample()).await.unwrap();
    assert_eq!(
        db.delete(table, &["column1"], &Conditions::new().with("column1", "value1"))
            .await
            .unwrap(),
        OpStatus::Applied
    );

    let expected = Dataset::from_columns([
        ("column1", vec!["value2".into(), "value3".into()]),
        ("column2", vec!["value2".into(), "value3".into()]),
    ])
    .unwrap();
    assert_eq!(db.read(table).await.unwrap(), Some(expected));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn execute_returns_raw_rows() {
    let db = facade().await;
    let table = "pgfacade_it_execute";
    reset(&db, table).await;

    db.create_table(table, &sample()).await.unwrap();

    let rows = db
        .execute(&format!("SELECT * FROM \"{table}\""))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);

    // Driver-level failures surface directly.
    assert!(db.execute("SELECT * FROM").await.is_err());
}
