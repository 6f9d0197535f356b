//! Opaque JSON passthrough columns.
//!
//! Workflow graphs, workflow metadata, node lists, image lists and user links
//! are stored as compact JSON text and never interpreted by the catalog. On
//! read a missing or unparseable value degrades to an empty container of the
//! column's shape; the caller never sees a parse error.

use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use serde_json::Value;
use tracing::warn;

use crate::store::SqlParam;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl Shape {
    pub fn empty(self) -> Value {
        match self {
            Shape::Object => Value::Object(Default::default()),
            Shape::Array => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawJson(Option<String>);

impl RawJson {
    /// Serialize an inbound sub-document for storage. Absent and `null`
    /// sub-documents are stored as SQL NULL.
    pub fn encode(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawJson(None),
            Some(v) => RawJson(Some(v.to_string())),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        RawJson(Some(text.into()))
    }

    pub fn as_text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Reparse the stored text. Array-shaped columns also reject parsed
    /// values that are not arrays.
    pub fn materialize(&self, shape: Shape, column: &str) -> Value {
        let Some(text) = self.0.as_deref() else {
            return shape.empty();
        };

        match serde_json::from_str::<Value>(text) {
            Ok(value) if shape == Shape::Array && !value.is_array() => {
                warn!("Column {} holds non-array JSON, serving []", column);
                shape.empty()
            }
            Ok(value) => value,
            Err(e) => {
                warn!("Column {} holds invalid JSON ({}), serving empty", column, e);
                shape.empty()
            }
        }
    }
}

impl From<RawJson> for SqlParam {
    fn from(raw: RawJson) -> Self {
        raw.0.into()
    }
}

impl ToSql for RawJson {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for RawJson {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Option::<String>::column_result(value).map(RawJson)
    }
}
