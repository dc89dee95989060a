use crate::error::{DbConnectError, Result};
use crate::types::SqlValue;

/// PostgreSQL's bind parameter limit per statement.
pub const MAX_PARAMETERS: usize = u16::MAX as usize;

/// SQL text plus its positional (`$n`) parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
    /// Number of rows the VALUES list carries.
    pub rows: usize,
}

/// Double-quote an identifier, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

impl InsertStatement {
    /// Build `INSERT INTO target (cols) VALUES (...), (...)` for every row in `rows`.
    ///
    /// NULL cells are inlined as `NULL` so that they need no parameter type. Fails on empty
    /// `keys` or `rows`, on a row whose width differs from `keys`, and past
    /// [`MAX_PARAMETERS`].
    pub fn multi_row(target: &str, keys: &[String], rows: &[Vec<SqlValue>]) -> Result<Self> {
        Self::multi_row_at(target, keys, rows, 0)
    }

    /// Like [`InsertStatement::multi_row`]; row numbers in errors start at `first_row`.
    pub(crate) fn multi_row_at(
        target: &str,
        keys: &[String],
        rows: &[Vec<SqlValue>],
        first_row: usize,
    ) -> Result<Self> {
        if keys.is_empty() {
            return Err(DbConnectError::NoColumns {
                table: target.to_string(),
            });
        }
        if rows.is_empty() {
            return Err(DbConnectError::NoRows {
                table: target.to_string(),
            });
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != keys.len())
        {
            return Err(DbConnectError::RowWidth {
                row: first_row + i,
                expected: keys.len(),
                found: row.len(),
            });
        }

        let count = rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| !v.is_null())
            .count();
        if count > MAX_PARAMETERS {
            return Err(DbConnectError::TooManyParameters {
                count,
                limit: MAX_PARAMETERS,
            });
        }

        let columns = keys
            .iter()
            .map(|k| quote_ident(k))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("INSERT INTO {target} ({columns}) VALUES ");
        let mut params = Vec::with_capacity(count);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                if value.is_null() {
                    sql.push_str("NULL");
                } else {
                    params.push(value.clone());
                    sql.push('$');
                    sql.push_str(&params.len().to_string());
                }
            }
            sql.push(')');
        }

        Ok(Self {
            sql,
            params,
            rows: rows.len(),
        })
    }
}
