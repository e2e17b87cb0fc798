mod add_column;
pub use add_column::AddColumn;

mod alter_column;
pub use alter_column::{AlterColumn, AlterColumnChange};

mod alter_index;
pub use alter_index::AlterIndex;

mod alter_table;
pub use alter_table::{AlterTable, AlterTableAction};

mod column_def;
pub use column_def::ColumnDef;

mod create_index;
pub use create_index::CreateIndex;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_column;
pub use drop_column::DropColumn;

mod drop_index;
pub use drop_index::DropIndex;

mod drop_table;
pub use drop_table::DropTable;

mod expr;
pub use expr::{BinaryOp, Expr};

mod insert;
pub use insert::Insert;

mod name;
pub use name::Name;

mod query;
pub use query::{Limit, OrderBy, Query};

mod rename_column;
pub use rename_column::RenameColumn;

mod ty;
pub use ty::Type;

mod update;
pub use update::Update;

pub use relsql_core::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    AddColumn(AddColumn),
    AlterColumn(AlterColumn),
    AlterIndex(AlterIndex),
    AlterTable(AlterTable),
    CreateIndex(CreateIndex),
    CreateTable(CreateTable),
    Delete(Delete),
    DropColumn(DropColumn),
    DropIndex(DropIndex),
    DropTable(DropTable),
    Insert(Insert),
    Query(Query),
    /// Statement text taken verbatim from a raw definition override
    Raw(String),
    RenameColumn(RenameColumn),
    Update(Update),
}

impl Statement {
    pub fn raw(sql: impl Into<String>) -> Self {
        Statement::Raw(sql.into())
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Query(_))
    }

    /// True when executing the statement yields rows rather than a count.
    pub fn returns_rows(&self) -> bool {
        match self {
            Statement::Query(_) => true,
            Statement::Insert(insert) => insert.returning.is_some(),
            _ => false,
        }
    }
}
