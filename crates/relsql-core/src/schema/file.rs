use super::{Model, ModelMigration};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Contents of a `definition-<stamp>.json` file: every model by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definitions {
    pub models: IndexMap<String, Model>,
}

/// Contents of a `migration-<stamp>.json` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationFile {
    pub add: IndexMap<String, Model>,
    pub remove: IndexMap<String, Model>,
    pub change: IndexMap<String, ModelChange>,
}

/// A changed model: its stored definition and the delta to apply to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelChange {
    pub definition: Model,
    pub migration: ModelMigration,
}

fn parse<T: for<'de> Deserialize<'de>>(text: &str, what: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|err| Error::invalid_definition(format!("malformed {what} file: {err}")))
}

/// Fills in names from the map keys and marks id fields as primary keys.
fn normalize(models: &mut IndexMap<String, Model>) -> Result<()> {
    for (name, model) in models.iter_mut() {
        if model.name.is_empty() {
            model.name = name.clone();
        }
        model.normalize();
        model.verify()?;
    }
    Ok(())
}

impl Definitions {
    pub fn parse(text: &str) -> Result<Self> {
        let mut definitions: Definitions = parse(text, "definition")?;
        normalize(&mut definitions.models)?;
        Ok(definitions)
    }

    /// Models belonging to `source`, sorted by name.
    pub fn for_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Model> + 'a {
        let mut models: Vec<_> = self
            .models
            .iter()
            .filter(|(_, model)| model.source.as_deref() == Some(source))
            .collect();
        models.sort_by(|a, b| a.0.cmp(b.0));
        models.into_iter().map(|(_, model)| model)
    }
}

impl MigrationFile {
    pub fn parse(text: &str) -> Result<Self> {
        let mut file: MigrationFile = parse(text, "migration")?;
        normalize(&mut file.add)?;
        normalize(&mut file.remove)?;
        for (name, change) in file.change.iter_mut() {
            if change.definition.name.is_empty() {
                change.definition.name = name.clone();
            }
            change.definition.normalize();
            change.definition.verify()?;
        }
        Ok(file)
    }
}
