//! Typed builder for dynamically assembled `WHERE` clauses.
//!
//! A [`Predicate`] is an ordered list of SQL text pieces and bound values.
//! SQL text is restricted to `&'static str`, so only code-selected column
//! names and operators can reach the query string; everything a caller
//! supplies travels as a [`BindValue`]. Placeholders (`$1`, `$2`, ...) are
//! assigned while rendering, from a single [`QueryParams`] accumulator, so
//! their numbering always matches the order values are bound in.

use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// A value bound to a positional query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    TextArray(Vec<String>),
    Date(NaiveDate),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::BigInt(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<Vec<String>> for BindValue {
    fn from(v: Vec<String>) -> Self {
        BindValue::TextArray(v)
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        BindValue::Date(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Sql(&'static str),
    Param(BindValue),
}

/// One boolean SQL condition with its bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pieces: Vec<Piece>,
}

impl Predicate {
    /// Start a predicate with fixed SQL text.
    pub fn sql(text: &'static str) -> Self {
        Self {
            pieces: vec![Piece::Sql(text)],
        }
    }

    pub fn then_sql(mut self, text: &'static str) -> Self {
        self.pieces.push(Piece::Sql(text));
        self
    }

    pub fn then_bind(mut self, value: impl Into<BindValue>) -> Self {
        self.pieces.push(Piece::Param(value.into()));
        self
    }

    /// `column = $n`
    pub fn eq(column: &'static str, value: impl Into<BindValue>) -> Self {
        Self::compare(column, " = ", value)
    }

    /// `column > $n`
    pub fn gt(column: &'static str, value: impl Into<BindValue>) -> Self {
        Self::compare(column, " > ", value)
    }

    /// `column < $n`
    pub fn lt(column: &'static str, value: impl Into<BindValue>) -> Self {
        Self::compare(column, " < ", value)
    }

    /// `(column >= $n AND column <= $m)`
    pub fn between(
        column: &'static str,
        low: impl Into<BindValue>,
        high: impl Into<BindValue>,
    ) -> Self {
        Self::sql("(")
            .then_sql(column)
            .then_sql(" >= ")
            .then_bind(low)
            .then_sql(" AND ")
            .then_sql(column)
            .then_sql(" <= ")
            .then_bind(high)
            .then_sql(")")
    }

    /// `column = ANY($n)`: scalar column is one of the values.
    pub fn any_of(column: &'static str, values: Vec<String>) -> Self {
        Self::sql(column)
            .then_sql(" = ANY(")
            .then_bind(values)
            .then_sql(")")
    }

    /// `column && $n`: array column shares at least one element with the values.
    pub fn overlaps(column: &'static str, values: Vec<String>) -> Self {
        Self::compare(column, " && ", values)
    }

    fn compare(column: &'static str, op: &'static str, value: impl Into<BindValue>) -> Self {
        Self::sql(column).then_sql(op).then_bind(value)
    }

    /// Number of values this predicate binds.
    pub fn bind_count(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, Piece::Param(_)))
            .count()
    }

    fn render_into(&self, out: &mut String, params: &mut QueryParams) {
        for piece in &self.pieces {
            match piece {
                Piece::Sql(text) => out.push_str(text),
                Piece::Param(value) => out.push_str(&params.push(value.clone())),
            }
        }
    }
}

/// Accumulates bound values in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: Vec<BindValue>,
}

impl QueryParams {
    /// Append a value and return its placeholder (`$n`).
    pub fn push(&mut self, value: impl Into<BindValue>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    predicates: Vec<Predicate>,
}

impl Conditions {
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Render as `WHERE a AND b ...`, or an empty string when there are no
    /// predicates. Values are appended to `params` in rendering order.
    pub fn render_where(&self, params: &mut QueryParams) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let mut out = String::from("WHERE ");
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            predicate.render_into(&mut out, params);
        }
        out
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`, in order.
pub fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}
