use super::{Expr, Type, Value};

/// A column as it appears in CREATE TABLE or ADD COLUMN.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,

    pub ty: Type,

    /// Stored generation expression
    pub generated: Option<Expr>,

    pub not_null: bool,

    pub primary_key: bool,

    /// Literal default
    pub default: Option<Value>,

    /// Replaces everything above when set
    pub raw: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        ColumnDef {
            name: name.into(),
            ty,
            generated: None,
            not_null: false,
            primary_key: false,
            default: None,
            raw: None,
        }
    }

    pub fn raw(name: impl Into<String>, definition: impl Into<String>) -> Self {
        ColumnDef {
            raw: Some(definition.into()),
            ..ColumnDef::new(name, Type::Jsonb)
        }
    }
}
