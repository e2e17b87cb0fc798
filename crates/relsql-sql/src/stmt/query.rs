use super::{Expr, Name, Statement};

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Projection. Empty selects every column.
    pub returning: Vec<Expr>,

    pub from: Name,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expr: Expr,
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub limit: Expr,
    pub offset: Option<Expr>,
}

impl Query {
    pub fn new(from: Name) -> Self {
        Query {
            returning: vec![],
            from,
            filter: None,
            order_by: vec![],
            limit: None,
        }
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
