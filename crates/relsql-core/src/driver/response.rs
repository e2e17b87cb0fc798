use crate::{stmt::Row, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows affected by the operation
    Count(u64),

    /// Rows returned by the operation
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn empty() -> Self {
        Self::values(vec![])
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    /// Affected rows, or the number of rows returned.
    pub fn len(&self) -> u64 {
        match self {
            Self::Count(count) => *count,
            Self::Values(rows) => rows.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_values(self) -> Result<Vec<Row>> {
        match self {
            Self::Values(rows) => Ok(rows),
            Self::Count(_) => Err(Error::from_args(format_args!(
                "expected rows, the operation returned a count"
            ))),
        }
    }
}
