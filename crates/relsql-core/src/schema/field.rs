use super::FieldKind;
use crate::stmt::Value;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, sync::Arc};

/// One column's abstract description.
///
/// Fields read from a definition file follow the same rules as the
/// builder: when `none` is left out, containers and defaulted fields are
/// NOT NULL and everything else is nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldSpec")]
pub struct Field {
    /// Name used by callers
    pub name: String,

    /// Physical column name, defaults to `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    pub kind: FieldKind,

    /// Maximum length for string fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Whether the column accepts NULL
    #[serde(rename = "none")]
    pub nullable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldDefault>,

    #[serde(skip_serializing_if = "is_false")]
    pub primary_key: bool,

    /// Auto-increment. Unset on an integer id field means yes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto: Option<bool>,

    /// Re-apply the default on every update that leaves the field unchanged
    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,

    /// Raw column definition that replaces the generated one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Sub-paths of the document materialized as generated columns
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extract: IndexMap<String, FieldKind>,

    /// Path inside another field's document this field projects from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject: Option<String>,
}

/// A field as written in a definition file.
#[derive(Deserialize)]
struct FieldSpec {
    name: String,
    #[serde(default)]
    store: Option<String>,
    kind: FieldKind,
    #[serde(default)]
    length: Option<u32>,
    #[serde(default, rename = "none")]
    nullable: Option<bool>,
    #[serde(default)]
    default: Option<FieldDefault>,
    #[serde(default)]
    primary_key: bool,
    #[serde(default, alias = "serial")]
    auto: Option<bool>,
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    extract: IndexMap<String, FieldKind>,
    #[serde(default)]
    inject: Option<String>,
}

impl From<FieldSpec> for Field {
    fn from(spec: FieldSpec) -> Field {
        let nullable = spec
            .nullable
            .unwrap_or_else(|| implicit_nullable(spec.kind, spec.default.is_some()));

        Field {
            name: spec.name,
            store: spec.store,
            kind: spec.kind,
            length: spec.length,
            nullable,
            default: spec.default,
            primary_key: spec.primary_key,
            auto: spec.auto,
            replace: spec.replace,
            definition: spec.definition,
            extract: spec.extract,
            inject: spec.inject,
        }
    }
}

fn implicit_nullable(kind: FieldKind, defaulted: bool) -> bool {
    !kind.is_container() && !defaulted
}

/// A field default: either a literal rendered into DDL, or a generator
/// resolved at write time.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    Generated(Generator),
}

/// Zero-argument default generator.
#[derive(Clone)]
pub struct Generator(Arc<dyn Fn() -> Value + Send + Sync>);

fn is_false(value: &bool) -> bool {
    !*value
}

impl Field {
    /// Containers are never NULL, everything else is nullable until told otherwise.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Field {
            name: name.into(),
            store: None,
            kind,
            length: None,
            nullable: implicit_nullable(kind, false),
            default: None,
            primary_key: false,
            auto: None,
            replace: false,
            definition: None,
            extract: IndexMap::new(),
            inject: None,
        }
    }

    pub fn store(&self) -> &str {
        self.store.as_deref().unwrap_or(&self.name)
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets a literal default. A defaulted field is NOT NULL; call
    /// [`Field::nullable`] afterwards to override.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self.nullable = false;
        self
    }

    pub fn default_with(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::Generated(Generator(Arc::new(f))));
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto(mut self) -> Self {
        self.auto = Some(true);
        self
    }

    /// Writes the default again on every update that does not change the
    /// field, e.g. an `updated` timestamp.
    pub fn replace(mut self) -> Self {
        self.replace = true;
        self
    }

    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn extract(mut self, path: impl Into<String>, kind: FieldKind) -> Self {
        self.extract.insert(path.into(), kind);
        self
    }

    pub fn inject(mut self, path: impl Into<String>) -> Self {
        self.inject = Some(path.into());
        self
    }

    pub fn is_auto(&self) -> bool {
        self.auto.unwrap_or(false)
    }

    /// True when the field has a physical column of its own.
    pub fn is_stored(&self) -> bool {
        self.inject.is_none()
    }

    /// The literal default, if one is set.
    pub fn default_value(&self) -> Option<&Value> {
        match &self.default {
            Some(FieldDefault::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Resolves the default for a row being written. Generators are called.
    pub fn resolve_default(&self) -> Option<Value> {
        match &self.default {
            Some(FieldDefault::Value(value)) => Some(value.clone()),
            Some(FieldDefault::Generated(generator)) => Some((generator.0)()),
            None => None,
        }
    }

    /// The base field name and the path within it, for injected fields.
    pub fn injection(&self) -> Option<(&str, &str)> {
        let inject = self.inject.as_deref()?;
        Some(inject.split_once("__").unwrap_or((inject, "")))
    }
}

impl FieldDefault {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl PartialEq for FieldDefault {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Generated(a), Self::Generated(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Generated(_) => f.write_str("Generated"),
        }
    }
}

impl Serialize for FieldDefault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            // Generators only exist at runtime
            Self::Generated(_) => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldDefault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldDefault::Value)
    }
}
