use super::{Field, FieldDefault, FieldKind, Model};
use crate::{stmt::Value, Error, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// The difference between a stored model definition and the one it should
/// become.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMigration {
    /// New table name
    #[serde(alias = "table", skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    /// New schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub fields: FieldsMigration,

    pub unique: IndexMigration,

    pub index: IndexMigration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsMigration {
    pub add: Vec<Field>,
    pub remove: Vec<String>,
    pub change: IndexMap<String, FieldMigration>,
}

/// The attributes of one field that differ. Absent attributes are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMigration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(rename = "none", skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// `Some(None)` drops the default.
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Option<Value>>,

    pub extract: ExtractMigration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractMigration {
    pub add: IndexMap<String, FieldKind>,
    pub remove: Vec<String>,
    pub change: IndexMap<String, FieldKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexMigration {
    pub add: IndexMap<String, Vec<String>>,
    pub remove: Vec<String>,
    /// Old name to new name
    pub rename: IndexMap<String, String>,
}

fn deserialize_some<'de, D, T>(deserializer: D) -> core::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl FieldMigration {
    pub fn is_empty(&self) -> bool {
        *self == FieldMigration::default()
    }
}

impl ExtractMigration {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.change.is_empty()
    }
}

impl Model {
    /// Returns the definition this model becomes once `migration` is applied.
    pub fn apply(&self, migration: &ModelMigration) -> Result<Model> {
        let mut model = self.clone();

        if let Some(store) = &migration.store {
            model.store = Some(store.clone());
        }

        if let Some(schema) = &migration.schema {
            model.schema = Some(schema.clone());
        }

        for name in &migration.fields.remove {
            model.expect_field(name)?;
            model.fields.retain(|field| &field.name != name);
        }

        for field in &migration.fields.add {
            if model.field(&field.name).is_some() {
                return Err(Error::invalid_definition(format!(
                    "model `{}` already has field `{}`",
                    model.name, field.name
                )));
            }
            model.fields.push(field.clone());
        }

        for (name, change) in &migration.fields.change {
            let field = model.field_mut(name).ok_or_else(|| {
                Error::invalid_definition(format!("model `{}` has no field `{name}`", self.name))
            })?;
            let before = field.store().to_string();

            change.apply_to(field);

            let after = field.store().to_string();
            let renamed = change.name.clone();

            if before != after {
                for stores in model.unique.values_mut().chain(model.index.values_mut()) {
                    for store in stores.iter_mut().filter(|store| **store == before) {
                        *store = after.clone();
                    }
                }
            }

            if let Some(renamed) = renamed {
                if model.id.as_deref() == Some(name.as_str()) {
                    model.id = Some(renamed);
                }
            }
        }

        migration.unique.apply_to(&mut model.unique);
        migration.index.apply_to(&mut model.index);

        model.verify()?;
        Ok(model)
    }
}

impl FieldMigration {
    /// Returns the field this change turns `field` into.
    pub fn apply(&self, field: &Field) -> Field {
        let mut field = field.clone();
        self.apply_to(&mut field);
        field
    }

    fn apply_to(&self, field: &mut Field) {
        if let Some(name) = &self.name {
            // Keep the physical column where it was unless the store changes too
            if field.store.is_none() {
                field.store = Some(field.name.clone());
            }
            field.name = name.clone();
        }
        if let Some(store) = &self.store {
            field.store = Some(store.clone());
        }
        if let Some(kind) = self.kind {
            field.kind = kind;
        }
        if let Some(length) = self.length {
            field.length = Some(length);
        }
        if let Some(nullable) = self.nullable {
            field.nullable = nullable;
        }
        if let Some(default) = &self.default {
            field.default = default.clone().map(FieldDefault::Value);
        }
        for path in &self.extract.remove {
            field.extract.shift_remove(path);
        }
        for (path, kind) in self.extract.add.iter().chain(&self.extract.change) {
            field.extract.insert(path.clone(), *kind);
        }
    }
}

impl IndexMigration {
    fn apply_to(&self, indexes: &mut IndexMap<String, Vec<String>>) {
        for name in &self.remove {
            indexes.shift_remove(name);
        }
        for (from, to) in &self.rename {
            if let Some(stores) = indexes.shift_remove(from) {
                indexes.insert(to.clone(), stores);
            }
        }
        for (name, stores) in &self.add {
            indexes.insert(name.clone(), stores.clone());
        }
    }
}
