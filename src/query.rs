//! Filter/pagination composer for listing endpoints.
//!
//! A [`ListQuery`] is an ordered list of `(column, operator, value)`
//! predicates plus an optional page. [`ListQuery::build`] appends them to a
//! fixed base statement as `WHERE p1 AND p2 ... ORDER BY ... LIMIT $n OFFSET $m`.
//! Values are always pushed as bind parameters; column names are
//! `&'static str` so they can only come from code.

use std::{fmt::Display, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer};
use sqlx::{Postgres, QueryBuilder};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    /// Case-insensitive pattern match.
    ILike,
}

impl FilterOp {
    fn as_sql(self) -> &'static str {
        match self {
            FilterOp::Eq => " = ",
            FilterOp::ILike => " ILIKE ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i32),
    Text(String),
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Int(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: FilterOp,
    pub value: FilterValue,
}

/// Query-string number where an empty value (`?user_id=`) counts as absent.
/// Use with `#[serde(default, deserialize_with = "empty_as_none")]`.
pub fn empty_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(de)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// `limit`/`offset` query parameters as sent by clients.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Page {
    pub fn from_params(params: &PageParams) -> Result<Self, ApiError> {
        if let Some(limit) = params.limit {
            if limit <= 0 {
                return Err(ApiError::validation("limit must be a positive integer"));
            }
        }
        if let Some(offset) = params.offset {
            if offset < 0 {
                return Err(ApiError::validation("offset must not be negative"));
            }
        }
        Ok(Self {
            limit: params.limit,
            offset: params.offset,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    predicates: Vec<Predicate>,
    page: Page,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: &'static str, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        self.predicates.push(Predicate {
            column,
            op,
            value: value.into(),
        });
        self
    }

    /// Adds an equality predicate when `value` is present.
    pub fn eq_opt<V: Into<FilterValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.filter(column, FilterOp::Eq, v),
            None => self,
        }
    }

    /// Adds an `ILIKE` predicate when `value` is present and non-blank.
    pub fn ilike_opt(self, column: &'static str, value: Option<String>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => self.filter(column, FilterOp::ILike, v),
            None => self,
        }
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    #[cfg(test)]
    pub(crate) fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Appends filters, ordering and pagination to `base`.
    pub fn build(&self, base: &str, order_by: &'static str) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(base);

        for (i, p) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(p.column);
            qb.push(p.op.as_sql());
            match &p.value {
                FilterValue::Int(v) => qb.push_bind(*v),
                FilterValue::Text(v) => qb.push_bind(v.clone()),
            };
        }

        qb.push(" ORDER BY ");
        qb.push(order_by);

        if let Some(limit) = self.page.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
        if let Some(offset) = self.page.offset {
            qb.push(" OFFSET ");
            qb.push_bind(offset);
        }

        qb
    }
}
