//! Row insertion into a target table.
//!
//! How rows reach the database is chosen per call with [`InsertMethod`]: one statement per
//! row, or one multi-row statement per chunk. Nothing here is process-wide; two callers can
//! use different methods against the same table.

use crate::db::engine::StatementExecutor;
use crate::db::statement::{InsertStatement, quote_ident};
use crate::error::{DbConnectError, Result};
use crate::types::SqlValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMethod {
    /// One single-row `INSERT` per row.
    #[default]
    RowByRow,
    /// One multi-row `INSERT` per chunk.
    Batched,
}

impl InsertMethod {
    /// Statements for one chunk of rows, built before anything is executed.
    ///
    /// `first_row` is the chunk's offset in the whole insert, used in row-width errors.
    pub fn plan(
        self,
        target: &str,
        keys: &[String],
        rows: &[Vec<SqlValue>],
        first_row: usize,
    ) -> Result<Vec<InsertStatement>> {
        match self {
            InsertMethod::RowByRow => rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    InsertStatement::multi_row_at(
                        target,
                        keys,
                        std::slice::from_ref(row),
                        first_row + i,
                    )
                })
                .collect(),
            InsertMethod::Batched => Ok(vec![InsertStatement::multi_row_at(
                target, keys, rows, first_row,
            )?]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOptions {
    pub method: InsertMethod,
    /// Rows per chunk; `None` sends everything as one chunk.
    pub chunksize: Option<usize>,
}

impl InsertOptions {
    pub fn batched() -> Self {
        Self {
            method: InsertMethod::Batched,
            chunksize: None,
        }
    }

    pub fn with_chunksize(mut self, chunksize: usize) -> Self {
        self.chunksize = Some(chunksize);
        self
    }
}

/// A table rows are written into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTable {
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<String>,
}

impl SqlTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            columns,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// `"schema"."name"`, or `"name"` without a schema.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.name)),
            None => quote_ident(&self.name),
        }
    }

    /// Insert `rows` in chunks using `opts.method`. Returns the total of affected rows.
    ///
    /// Every statement is built first, so a row of the wrong width or an oversized chunk
    /// fails before anything reaches `exec`. Nothing is executed for zero rows.
    pub async fn insert<E: StatementExecutor>(
        &self,
        exec: &mut E,
        rows: Vec<Vec<SqlValue>>,
        opts: &InsertOptions,
    ) -> Result<u64> {
        if self.columns.is_empty() {
            return Err(DbConnectError::NoColumns {
                table: self.name.clone(),
            });
        }
        if rows.is_empty() {
            return Ok(0);
        }

        let target = self.qualified_name();
        let chunksize = opts.chunksize.filter(|&n| n > 0).unwrap_or(rows.len());
        let mut statements = Vec::new();
        for (n, chunk) in rows.chunks(chunksize).enumerate() {
            statements.extend(opts.method.plan(&target, &self.columns, chunk, n * chunksize)?);
        }
        if opts.method == InsertMethod::Batched {
            debug!(table = %target, statements = statements.len(), "using batched insert");
        }

        let total = rows.len();
        let mut affected = 0;
        for stmt in &statements {
            affected += exec.execute_statement(stmt).await?;
        }
        debug!(table = %target, rows = total, affected, "rows inserted");
        Ok(affected)
    }
}
