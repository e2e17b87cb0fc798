use super::{ColumnDef, Name, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table
    pub name: Name,

    /// Column definitions, in declared order
    pub columns: Vec<ColumnDef>,

    /// Whether or not to add an `IF NOT EXISTS` clause
    pub if_not_exists: bool,
}

impl Statement {
    pub fn create_table(name: Name, columns: Vec<ColumnDef>) -> Self {
        CreateTable {
            name,
            columns,
            if_not_exists: true,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
