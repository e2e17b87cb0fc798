use super::{Expr, Name, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub from: Name,

    pub filter: Option<Expr>,
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
