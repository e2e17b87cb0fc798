mod field;
pub use field::{Field, FieldDefault, Generator};

mod file;
pub use file::{Definitions, MigrationFile, ModelChange};

mod kind;
pub use kind::FieldKind;

mod migration;
pub use migration::{ExtractMigration, FieldMigration, FieldsMigration, IndexMigration, ModelMigration};

mod model;
pub use model::Model;

mod relation;
pub use relation::{Child, Parent};

use crate::{Error, Result};

use indexmap::IndexMap;

/// Registry of the model definitions a source knows about, by model name.
///
/// Parent lookups for fuzzy search and child cascades resolve related models
/// through this registry.
#[derive(Debug, Default, Clone)]
pub struct Schema {
    models: IndexMap<String, Model>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model, replacing any previous definition with the same name.
    pub fn register(&mut self, model: Model) -> Result<()> {
        model.verify()?;
        self.models.insert(model.name.clone(), model);
        Ok(())
    }

    pub fn model(&self, name: &str) -> Result<&Model> {
        self.models
            .get(name)
            .ok_or_else(|| Error::invalid_definition(format!("unknown model `{name}`")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }
}

impl FromIterator<Model> for Schema {
    fn from_iter<T: IntoIterator<Item = Model>>(iter: T) -> Self {
        Schema {
            models: iter
                .into_iter()
                .map(|model| (model.name.clone(), model))
                .collect(),
        }
    }
}
