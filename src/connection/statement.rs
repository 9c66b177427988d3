use std::fmt;

use sqlx::{Postgres, QueryBuilder};

use crate::core::Value;

/// A SQL statement with its bound values, built on sqlx's `QueryBuilder`.
///
/// `push_bind` writes the next `$n` placeholder and binds the value; the
/// bound values are also kept as [`Value`]s so that non-Postgres clients can
/// inspect them.
pub struct Statement {
    builder: QueryBuilder<'static, Postgres>,
    binds: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            builder: QueryBuilder::new(sql),
            binds: Vec::new(),
        }
    }

    pub fn push(&mut self, sql: impl fmt::Display) -> &mut Self {
        self.builder.push(sql);
        self
    }

    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match value.clone() {
            Value::Null => self.builder.push_bind(None::<String>),
            Value::Integer(i) => self.builder.push_bind(i),
            Value::Float(f) => self.builder.push_bind(f),
            Value::Text(s) => self.builder.push_bind(s),
            Value::Boolean(b) => self.builder.push_bind(b),
            Value::Date(d) => self.builder.push_bind(d),
            Value::Timestamp(ts) => self.builder.push_bind(ts),
            Value::TimestampTz(ts) => self.builder.push_bind(ts),
        };
        self.binds.push(value);
        self
    }

    /// Starts a filter clause: ` WHERE ` the first time, ` AND ` after that.
    pub fn push_where_prefix(&mut self, has_where: &mut bool) -> &mut Self {
        if !*has_where {
            *has_where = true;
            self.push(" WHERE ")
        } else {
            self.push(" AND ")
        }
    }

    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    pub(crate) fn into_builder(self) -> QueryBuilder<'static, Postgres> {
        self.builder
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("sql", &self.sql())
            .field("binds", &self.binds)
            .finish()
    }
}
