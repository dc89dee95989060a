use crate::db::statement::InsertStatement;
use crate::db::uri::redact;
use crate::error::Result;
use crate::types::SqlValue;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection};
use sqlx::query::Query;
use sqlx::{Connection, Postgres};
use std::future::Future;
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

/// Anything an [`InsertStatement`] can be executed against.
pub trait StatementExecutor {
    /// Run one statement; resolves to the number of affected rows.
    fn execute_statement(
        &mut self,
        stmt: &InsertStatement,
    ) -> impl Future<Output = Result<u64>> + Send;
}

/// A single live PostgreSQL connection in autocommit mode.
///
/// No transaction is ever opened on it, so each statement commits as soon as it completes.
/// The caller owns the handle; dropping it closes the socket.
pub struct Engine {
    conn: PgConnection,
    url: Url,
}

impl Engine {
    /// Open a connection to `url`. Driver errors are returned as they come.
    pub async fn connect(url: &Url) -> Result<Self> {
        let opts = PgConnectOptions::from_str(url.as_str())?;
        let conn = PgConnection::connect_with(&opts).await?;
        info!(url = %redact(url), "database connection opened");
        Ok(Self {
            conn,
            url: url.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn redacted_url(&self) -> String {
        redact(&self.url)
    }

    /// Execute ad-hoc SQL, possibly several `;`-separated statements.
    pub async fn execute(&mut self, sql: &str) -> Result<u64> {
        let done = sqlx::raw_sql(sql).execute(&mut self.conn).await?;
        debug!(rows = done.rows_affected(), "statement executed");
        Ok(done.rows_affected())
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

impl StatementExecutor for Engine {
    async fn execute_statement(&mut self, stmt: &InsertStatement) -> Result<u64> {
        let query = stmt
            .params
            .iter()
            .fold(sqlx::query(&stmt.sql), |q, value| bind_value(q, value));
        let done = query.execute(&mut self.conn).await?;
        debug!(
            rows = stmt.rows,
            params = stmt.params.len(),
            affected = done.rows_affected(),
            "insert executed"
        );
        Ok(done.rows_affected())
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(i) => query.bind(*i),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Timestamp(ts) => query.bind(*ts),
        SqlValue::Json(v) => query.bind(sqlx::types::Json(v.clone())),
    }
}
