use relsql_core::schema::{Field, FieldKind};

/// PostgreSQL column storage types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Boolean,
    Integer,
    /// Auto-incrementing integer
    Serial,
    Float,
    VarChar(u32),
    Jsonb,
}

impl Type {
    pub const DEFAULT_LENGTH: u32 = 255;

    /// Text cast used for pattern matching.
    pub const TEXT: Type = Type::VarChar(Self::DEFAULT_LENGTH);

    pub fn from_kind(kind: FieldKind, length: Option<u32>) -> Self {
        match kind {
            FieldKind::Bool => Type::Boolean,
            FieldKind::Int => Type::Integer,
            FieldKind::Float => Type::Float,
            FieldKind::Str => Type::VarChar(length.unwrap_or(Self::DEFAULT_LENGTH)),
            FieldKind::Set | FieldKind::List | FieldKind::Map | FieldKind::Other => Type::Jsonb,
        }
    }

    pub fn from_field(field: &Field) -> Self {
        match Self::from_kind(field.kind, field.length) {
            Type::Integer if field.is_auto() => Type::Serial,
            ty => ty,
        }
    }

    /// The type a column can be altered or cast to. SERIAL is only valid at
    /// creation.
    pub fn storage(self) -> Self {
        match self {
            Type::Serial => Type::Integer,
            ty => ty,
        }
    }
}
