use crate::stmt::Value;

/// A single unit of work sent to a connection.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A statement whose affected row count is reported
    Execute(Sql),

    /// A statement that returns rows
    Query(Sql),

    /// Parameterless statements executed in order, then committed together
    Batch(Vec<String>),
}

/// Statement text with `$n` placeholders and the values bound to them, in
/// placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sql {
    pub text: String,
    pub params: Vec<Value>,
}

impl Sql {
    pub fn new(text: impl Into<String>, params: Vec<Value>) -> Self {
        Sql {
            text: text.into(),
            params,
        }
    }
}

impl Operation {
    pub fn sql(&self) -> Option<&Sql> {
        match self {
            Self::Execute(sql) | Self::Query(sql) => Some(sql),
            Self::Batch(_) => None,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

impl From<Sql> for Operation {
    fn from(value: Sql) -> Self {
        Self::Execute(value)
    }
}
