use super::{Child, Field, FieldKind, Parent};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One table's abstract description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub name: String,

    /// Table name, defaults to `name`
    #[serde(default, alias = "table", skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Name of the source the model belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Name of the primary key field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub fields: Vec<Field>,

    /// Unique indexes, name to ordered column stores
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub unique: IndexMap<String, Vec<String>>,

    /// Plain indexes, name to ordered column stores
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub index: IndexMap<String, Vec<String>>,

    /// Fields searched by fuzzy match
    #[serde(default, alias = "title", skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<String>,

    /// Default sort, `+field` / `-field`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,

    /// Parent relations keyed by foreign key field
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parents: IndexMap<String, Parent>,

    /// Child collections keyed by collection name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, Child>,

    /// Raw statements that replace the generated table definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Vec<String>>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn table(&self) -> &str {
        self.store.as_deref().unwrap_or(&self.name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn expect_field(&self, name: &str) -> Result<&Field> {
        self.field(name).ok_or_else(|| {
            Error::invalid_definition(format!("model `{}` has no field `{name}`", self.name))
        })
    }

    /// The primary key field.
    pub fn id_field(&self) -> Option<&Field> {
        self.id.as_deref().and_then(|id| self.field(id))
    }

    /// The primary key field when it is assigned by the database.
    pub fn auto_id(&self) -> Option<&Field> {
        self.id_field().filter(|field| field.is_auto())
    }

    /// Fields with a physical column, in declared order.
    pub fn stored_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_stored())
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.store = Some(table.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Marks `name` as the primary key.
    pub fn with_id(mut self, name: impl Into<String>) -> Self {
        self.id = Some(name.into());
        self.normalize();
        self
    }

    pub fn with_unique(mut self, name: impl Into<String>, stores: &[&str]) -> Self {
        self.unique
            .insert(name.into(), stores.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_index(mut self, name: impl Into<String>, stores: &[&str]) -> Self {
        self.index
            .insert(name.into(), stores.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_label(mut self, fields: &[&str]) -> Self {
        self.label = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_order(mut self, sort: &[&str]) -> Self {
        self.order = sort.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_parent(mut self, field: impl Into<String>, parent: Parent) -> Self {
        self.parents.insert(field.into(), parent);
        self
    }

    pub fn with_child(mut self, collection: impl Into<String>, child: Child) -> Self {
        self.children.insert(collection.into(), child);
        self
    }

    /// The id field is the primary key even when the definition omits the
    /// flag. An integer id auto-increments unless told otherwise.
    pub fn normalize(&mut self) {
        if let Some(id) = self.id.clone() {
            if let Some(field) = self.field_mut(&id) {
                field.primary_key = true;
                if field.auto.is_none() && field.kind == FieldKind::Int {
                    field.auto = Some(true);
                }
            }
        }
    }

    /// Checks the invariants a definition must hold before SQL is generated
    /// from it.
    pub fn verify(&self) -> Result<()> {
        let autos = self
            .fields
            .iter()
            .filter(|field| field.is_auto() && field.primary_key)
            .count();

        if autos > 1 {
            return Err(Error::invalid_definition(format!(
                "model `{}` declares {autos} auto-increment primary keys",
                self.name
            )));
        }

        if let Some(id) = &self.id {
            self.expect_field(id)?;
        }

        for field in &self.fields {
            if let Some((base, _)) = field.injection() {
                let base = self.expect_field(base)?;
                if !base.kind.is_document() {
                    return Err(Error::invalid_definition(format!(
                        "field `{}` injects into `{}`, which is not a document",
                        field.name, base.name
                    )));
                }
            }
        }

        for name in self.label.iter().chain(self.parents.keys()) {
            let base = name.split("__").next().unwrap_or(name);
            self.expect_field(base)?;
        }

        Ok(())
    }
}
