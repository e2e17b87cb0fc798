use super::{Name, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct RenameColumn {
    pub table: Name,

    pub from: String,

    pub to: String,
}

impl Statement {
    pub fn rename_column(table: Name, from: impl Into<String>, to: impl Into<String>) -> Self {
        RenameColumn {
            table,
            from: from.into(),
            to: to.into(),
        }
        .into()
    }
}

impl From<RenameColumn> for Statement {
    fn from(value: RenameColumn) -> Self {
        Self::RenameColumn(value)
    }
}
