use dbconnect::db::statement::MAX_PARAMETERS;
use dbconnect::db::{InsertStatement, StatementExecutor};
use dbconnect::{DbConnectError, InsertMethod, InsertOptions, SqlTable, SqlValue};
use serde_json::json;

/// Records statements instead of running them.
#[derive(Default)]
struct Recorder {
    statements: Vec<InsertStatement>,
}

impl StatementExecutor for Recorder {
    async fn execute_statement(&mut self, stmt: &InsertStatement) -> dbconnect::Result<u64> {
        self.statements.push(stmt.clone());
        Ok(stmt.rows as u64)
    }
}

fn table() -> SqlTable {
    SqlTable::new("readings", vec!["id".to_string(), "label".to_string()])
}

fn rows(n: i64) -> Vec<Vec<SqlValue>> {
    (0..n)
        .map(|i| vec![SqlValue::from(i), SqlValue::from(format!("row-{i}"))])
        .collect()
}

#[tokio::test]
async fn row_by_row_executes_once_per_row() {
    let mut exec = Recorder::default();
    let affected = table()
        .insert(&mut exec, rows(4), &InsertOptions::default())
        .await
        .expect("insert");

    assert_eq!(affected, 4);
    assert_eq!(exec.statements.len(), 4);
    assert_eq!(
        exec.statements[0].sql,
        r#"INSERT INTO "readings" ("id", "label") VALUES ($1, $2)"#
    );
    assert_eq!(
        exec.statements[3].params,
        vec![SqlValue::Int(3), SqlValue::Text("row-3".to_string())]
    );
}

#[tokio::test]
async fn batched_executes_once_for_all_rows() {
    let mut exec = Recorder::default();
    let affected = table()
        .insert(&mut exec, rows(3), &InsertOptions::batched())
        .await
        .expect("insert");

    assert_eq!(affected, 3);
    assert_eq!(exec.statements.len(), 1);
    let stmt = &exec.statements[0];
    assert_eq!(
        stmt.sql,
        r#"INSERT INTO "readings" ("id", "label") VALUES ($1, $2), ($3, $4), ($5, $6)"#
    );
    assert_eq!(stmt.params.len(), 6);
    assert_eq!(stmt.rows, 3);
}

#[tokio::test]
async fn batched_honours_chunksize() {
    let mut exec = Recorder::default();
    let opts = InsertOptions::batched().with_chunksize(2);
    let affected = table().insert(&mut exec, rows(5), &opts).await.expect("insert");

    assert_eq!(affected, 5);
    let sizes: Vec<usize> = exec.statements.iter().map(|s| s.rows).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn strategy_is_chosen_per_call() {
    let mut batched = Recorder::default();
    let mut plain = Recorder::default();
    let t = table();

    t.insert(&mut batched, rows(3), &InsertOptions::batched())
        .await
        .expect("insert");
    t.insert(&mut plain, rows(3), &InsertOptions::default())
        .await
        .expect("insert");

    assert_eq!(batched.statements.len(), 1);
    assert_eq!(plain.statements.len(), 3);
}

#[tokio::test]
async fn nulls_are_inlined_and_json_becomes_parameters() {
    let mut exec = Recorder::default();
    let data = vec![
        vec![SqlValue::from(json!(1)), SqlValue::from(json!(null))],
        vec![SqlValue::from(json!(2)), SqlValue::from(json!({"k": "v"}))],
    ];
    table()
        .insert(&mut exec, data, &InsertOptions::batched())
        .await
        .expect("insert");

    let stmt = &exec.statements[0];
    assert_eq!(
        stmt.sql,
        r#"INSERT INTO "readings" ("id", "label") VALUES ($1, NULL), ($2, $3)"#
    );
    assert_eq!(
        stmt.params,
        vec![
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Json(json!({"k": "v"}))
        ]
    );
}

#[tokio::test]
async fn identifiers_are_quoted_with_schema() {
    let mut exec = Recorder::default();
    let t = SqlTable::new("odd\"name", vec!["col".to_string()]).with_schema("lab");
    t.insert(&mut exec, vec![vec![SqlValue::Bool(true)]], &InsertOptions::batched())
        .await
        .expect("insert");

    assert_eq!(
        exec.statements[0].sql,
        r#"INSERT INTO "lab"."odd""name" ("col") VALUES ($1)"#
    );
}

#[tokio::test]
async fn zero_rows_execute_nothing() {
    let mut exec = Recorder::default();
    for method in [InsertMethod::RowByRow, InsertMethod::Batched] {
        let opts = InsertOptions {
            method,
            chunksize: None,
        };
        let affected = table().insert(&mut exec, Vec::new(), &opts).await.expect("insert");
        assert_eq!(affected, 0);
    }
    assert!(exec.statements.is_empty());
}

#[tokio::test]
async fn ragged_rows_are_rejected_before_execution() {
    let mut exec = Recorder::default();
    let mut data = rows(3);
    data[1].pop();

    let err = table()
        .insert(&mut exec, data, &InsertOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbConnectError::RowWidth {
            row: 1,
            expected: 2,
            found: 1
        }
    ));
    assert!(exec.statements.is_empty());
}

#[tokio::test]
async fn table_without_columns_is_rejected() {
    let mut exec = Recorder::default();
    let err = SqlTable::new("empty", Vec::new())
        .insert(&mut exec, Vec::new(), &InsertOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DbConnectError::NoColumns { .. }));
}

#[tokio::test]
async fn oversized_batch_is_rejected_but_chunking_fits() {
    let n = (MAX_PARAMETERS / 2 + 1) as i64;

    let mut exec = Recorder::default();
    let err = table()
        .insert(&mut exec, rows(n), &InsertOptions::batched())
        .await
        .unwrap_err();
    assert!(matches!(err, DbConnectError::TooManyParameters { .. }));
    assert!(exec.statements.is_empty());

    let opts = InsertOptions::batched().with_chunksize(10_000);
    let affected = table().insert(&mut exec, rows(n), &opts).await.expect("insert");
    assert_eq!(affected, n as u64);
    assert_eq!(exec.statements.len(), 4);
}

#[tokio::test]
async fn ragged_row_in_later_chunk_reports_its_overall_index() {
    for method in [InsertMethod::RowByRow, InsertMethod::Batched] {
        let mut exec = Recorder::default();
        let mut data = rows(5);
        data[3].push(SqlValue::Bool(false));
        let opts = InsertOptions {
            method,
            chunksize: Some(2),
        };

        let err = table().insert(&mut exec, data, &opts).await.unwrap_err();
        assert!(matches!(
            err,
            DbConnectError::RowWidth {
                row: 3,
                expected: 2,
                found: 3
            }
        ));
        assert!(exec.statements.is_empty());
    }
}

#[test]
fn statement_without_rows_is_rejected() {
    let keys = vec!["id".to_string()];
    let err = InsertStatement::multi_row("\"readings\"", &keys, &[]).unwrap_err();
    assert!(matches!(err, DbConnectError::NoRows { ref table } if table == "\"readings\""));
}

#[test]
fn statement_without_keys_is_rejected() {
    let err = InsertStatement::multi_row("\"readings\"", &[], &[vec![]]).unwrap_err();
    assert!(matches!(err, DbConnectError::NoColumns { .. }));
}

#[test]
fn json_values_become_typed_cells() {
    assert_eq!(SqlValue::from(json!(null)), SqlValue::Null);
    assert_eq!(SqlValue::from(json!(true)), SqlValue::Bool(true));
    assert_eq!(SqlValue::from(json!(7)), SqlValue::Int(7));
    assert_eq!(SqlValue::from(json!(2.5)), SqlValue::Float(2.5));
    assert_eq!(SqlValue::from(json!("7")), SqlValue::Text("7".to_string()));
    assert_eq!(SqlValue::from(json!([7])), SqlValue::Json(json!([7])));
    assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
}
