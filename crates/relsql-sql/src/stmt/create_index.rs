use super::{Name, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    /// Name of the index. Indexes live in their table's schema, so this is
    /// never qualified.
    pub name: String,

    /// Which table to index
    pub on: Name,

    /// The column stores to index
    pub columns: Vec<String>,

    /// When true, the index is unique
    pub unique: bool,
}

impl Statement {
    pub fn create_index(name: impl Into<String>, on: Name, columns: Vec<String>, unique: bool) -> Self {
        CreateIndex {
            name: name.into(),
            on,
            columns,
            unique,
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
