use super::{Name, Statement};

/// A statement to alter a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    /// Current name of the table.
    pub name: Name,

    /// The alteration to apply.
    pub action: AlterTableAction,
}

/// The action to perform in an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    /// Rename the table to a new name, within its schema.
    RenameTo(String),

    /// Move the table to another schema.
    SetSchema(String),
}

impl Statement {
    /// Renames a table.
    pub fn alter_table_rename_to(name: Name, new_name: impl Into<String>) -> Self {
        AlterTable {
            name,
            action: AlterTableAction::RenameTo(new_name.into()),
        }
        .into()
    }

    pub fn alter_table_set_schema(name: Name, schema: impl Into<String>) -> Self {
        AlterTable {
            name,
            action: AlterTableAction::SetSchema(schema.into()),
        }
        .into()
    }
}

impl From<AlterTable> for Statement {
    fn from(value: AlterTable) -> Self {
        Self::AlterTable(value)
    }
}
