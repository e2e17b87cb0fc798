use serde::{Deserialize, Serialize};

/// Abstract kind of a field's value.
///
/// Anything that is not a scalar is stored as a structured document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Str,
    Set,
    List,
    #[serde(rename = "dict", alias = "map")]
    Map,
    #[serde(other)]
    Other,
}

impl FieldKind {
    /// Set, list and map kinds get an implicit empty default.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Set | Self::List | Self::Map)
    }

    pub fn is_document(self) -> bool {
        matches!(self, Self::Set | Self::List | Self::Map | Self::Other)
    }

    /// The empty document for container kinds.
    pub fn empty(self) -> Option<serde_json::Value> {
        match self {
            Self::Set | Self::List => Some(serde_json::Value::Array(vec![])),
            Self::Map => Some(serde_json::Value::Object(Default::default())),
            _ => None,
        }
    }
}
