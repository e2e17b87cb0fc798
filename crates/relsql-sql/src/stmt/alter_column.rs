use super::{Name, Statement, Type, Value};

/// A statement to alter a column in a table.
///
/// Every change is emitted as its own `ALTER COLUMN` action within a single
/// `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterColumn {
    /// Table containing the column.
    pub table: Name,

    /// Current name of the column.
    pub name: String,

    pub changes: Vec<AlterColumnChange>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterColumnChange {
    /// Change the type, converting existing values with a cast
    Type(Type),

    SetDefault(Value),

    DropDefault,

    SetNotNull,

    DropNotNull,
}

impl Statement {
    pub fn alter_column(
        table: Name,
        name: impl Into<String>,
        changes: Vec<AlterColumnChange>,
    ) -> Self {
        AlterColumn {
            table,
            name: name.into(),
            changes,
        }
        .into()
    }
}

impl From<AlterColumn> for Statement {
    fn from(value: AlterColumn) -> Self {
        Self::AlterColumn(value)
    }
}
