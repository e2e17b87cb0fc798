use super::{Expr, Name, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: Name,

    /// Column to new value, in SET order
    pub assignments: Vec<(String, Expr)>,

    pub filter: Option<Expr>,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
