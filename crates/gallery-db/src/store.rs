//! Parameterized statement execution.
//!
//! Every statement runs through `query`, `query_opt` or `execute`, which bind
//! a slice of [`SqlParam`] positionally. SQL text is never built from values.

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, ErrorCode, Row, ToSql, params_from_iter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to prepare statement: {0}")]
    Prepare(#[source] rusqlite::Error),

    #[error("failed to bind parameters: {0}")]
    Bind(#[source] rusqlite::Error),

    #[error("failed to step statement: {0}")]
    Step(#[source] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// True when the backend rejected a write on a UNIQUE, PRIMARY KEY or
    /// FOREIGN KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Step(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Real(f64),
    Text(String),
    Null,
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::Int(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SqlParam::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlParam::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            SqlParam::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Int(v as i64)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Real(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlParam::Null)
    }
}

/// Run a row-returning statement and map every row.
pub fn query<T, F>(conn: &Connection, sql: &str, params: &[SqlParam], mut map: F) -> StoreResult<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(StoreError::Prepare)?;
    let mut rows = stmt.query(params_from_iter(params.iter())).map_err(classify)?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(StoreError::Step)? {
        out.push(map(row).map_err(StoreError::Step)?);
    }
    Ok(out)
}

/// Run a row-returning statement and map the first row, if any.
pub fn query_opt<T, F>(conn: &Connection, sql: &str, params: &[SqlParam], map: F) -> StoreResult<Option<T>>
where
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(StoreError::Prepare)?;
    let mut rows = stmt.query(params_from_iter(params.iter())).map_err(classify)?;

    match rows.next().map_err(StoreError::Step)? {
        Some(row) => Ok(Some(map(row).map_err(StoreError::Step)?)),
        None => Ok(None),
    }
}

/// Run a statement for its side effect. Returns the number of changed rows.
pub fn execute(conn: &Connection, sql: &str, params: &[SqlParam]) -> StoreResult<usize> {
    let mut stmt = conn.prepare(sql).map_err(StoreError::Prepare)?;
    stmt.execute(params_from_iter(params.iter())).map_err(classify)
}

fn classify(e: rusqlite::Error) -> StoreError {
    match e {
        rusqlite::Error::InvalidParameterCount(..)
        | rusqlite::Error::InvalidParameterName(_)
        | rusqlite::Error::ToSqlConversionFailure(_) => StoreError::Bind(e),
        other => StoreError::Step(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE kv (k TEXT PRIMARY KEY, v INTEGER)").unwrap();
        conn
    }

    #[test]
    fn execute_and_query_bind_positionally() {
        let conn = scratch();
        let changed = execute(&conn, "INSERT INTO kv (k, v) VALUES (?, ?)", &["a".into(), 1i64.into()]).unwrap();
        assert_eq!(changed, 1);

        let rows = query(&conn, "SELECT k, v FROM kv WHERE v = ?", &[1i64.into()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .unwrap();
        assert_eq!(rows, vec![("a".to_string(), 1)]);
    }

    #[test]
    fn query_opt_returns_none_on_empty_result() {
        let conn = scratch();
        let row = query_opt(&conn, "SELECT v FROM kv WHERE k = ?", &["missing".into()], |row| {
            row.get::<_, i64>(0)
        })
        .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn errors_are_classified() {
        let conn = scratch();

        let err = execute(&conn, "INSERT INTO nowhere VALUES (?)", &[1i64.into()]).unwrap_err();
        assert!(matches!(err, StoreError::Prepare(_)));

        let err = execute(&conn, "INSERT INTO kv (k, v) VALUES (?, ?)", &["a".into()]).unwrap_err();
        assert!(matches!(err, StoreError::Bind(_)));

        execute(&conn, "INSERT INTO kv (k, v) VALUES (?, ?)", &["a".into(), 1i64.into()]).unwrap();
        let err = execute(&conn, "INSERT INTO kv (k, v) VALUES (?, ?)", &["a".into(), 2i64.into()]).unwrap_err();
        assert!(matches!(err, StoreError::Step(_)));
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn optional_params_bind_null() {
        let conn = scratch();
        let v: Option<i64> = None;
        execute(&conn, "INSERT INTO kv (k, v) VALUES (?, ?)", &["n".into(), v.into()]).unwrap();
        let stored = query_opt(&conn, "SELECT v FROM kv WHERE k = 'n'", &[], |row| {
            row.get::<_, Option<i64>>(0)
        })
        .unwrap();
        assert_eq!(stored, Some(None));
    }
}
