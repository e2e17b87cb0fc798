use super::{Expr, Name, Statement};

/// A multi-row INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: Name,

    pub columns: Vec<String>,

    /// One entry per row, each matching `columns` in length
    pub rows: Vec<Vec<Expr>>,

    /// Column whose generated value is returned for each row
    pub returning: Option<String>,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
