use crate::Source;

use relsql_core::{
    schema::{Definitions, MigrationFile, Model},
    Result,
};
use relsql_sql::{migration, Statement};

use std::{fs, path::Path};

impl Source {
    /// SQL for the models of a definition file that belong to this source,
    /// or `None` when none do.
    pub fn convert_definition(&self, text: &str) -> Result<Option<String>> {
        let definitions = Definitions::parse(text)?;

        let statements = definitions
            .for_source(self.name())
            .flat_map(|model| migration::model_add(&self.bind(model.clone())))
            .collect::<Vec<_>>();

        Ok(self.render(&statements))
    }

    /// SQL for the models of a migration file that belong to this source, or
    /// `None` when none do. Added models come first, then removed, then
    /// changed, each in name order.
    pub fn convert_migration(&self, text: &str) -> Result<Option<String>> {
        let file = MigrationFile::parse(text)?;
        let mut statements = vec![];

        for model in self.owned(file.add.iter()) {
            statements.extend(migration::model_add(&model));
        }

        for model in self.owned(file.remove.iter()) {
            statements.extend(migration::model_remove(&model));
        }

        let mut changes = file
            .change
            .iter()
            .filter(|(_, change)| self.owns(&change.definition))
            .collect::<Vec<_>>();
        changes.sort_by(|a, b| a.0.cmp(b.0));

        for (_, change) in changes {
            let definition = self.bind(change.definition.clone());
            statements.extend(migration::model_change(&definition, &change.migration)?);
        }

        Ok(self.render(&statements))
    }

    /// Converts each `definition*.json` and `migration*.json` file in
    /// `source_dir` into a `.sql` file of the same stem in `target_dir`.
    /// Files already converted are left alone. Returns whether any file was
    /// written.
    pub fn convert(
        &self,
        source_dir: impl AsRef<Path>,
        target_dir: impl AsRef<Path>,
    ) -> Result<bool> {
        let target_dir = target_dir.as_ref();

        let mut names = fs::read_dir(source_dir.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        names.sort();

        let mut converted = false;

        for path in names {
            let Some(stem) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(".json"))
            else {
                continue;
            };

            let target = target_dir.join(format!("{stem}.sql"));

            if target.exists() {
                continue;
            }

            let text = fs::read_to_string(&path)?;

            let sql = if stem.starts_with("definition") {
                self.convert_definition(&text)?
            } else if stem.starts_with("migration") {
                self.convert_migration(&text)?
            } else {
                tracing::warn!(file = %path.display(), "skipping unrecognized file");
                continue;
            };

            if let Some(sql) = sql {
                fs::write(&target, sql)?;
                tracing::info!(file = %target.display(), "converted");
                converted = true;
            }
        }

        Ok(converted)
    }

    fn owns(&self, model: &Model) -> bool {
        model.source.as_deref() == Some(self.name())
    }

    /// Models belonging to this source in name order, bound to it.
    fn owned<'a>(&self, models: impl Iterator<Item = (&'a String, &'a Model)>) -> Vec<Model> {
        let mut models = models
            .filter(|(_, model)| self.owns(model))
            .collect::<Vec<_>>();
        models.sort_by(|a, b| a.0.cmp(b.0));
        models
            .into_iter()
            .map(|(_, model)| self.bind(model.clone()))
            .collect()
    }

    /// Statements separated by a semicolon and a blank line.
    fn render(&self, statements: &[Statement]) -> Option<String> {
        if statements.is_empty() {
            return None;
        }

        let sql = statements
            .iter()
            .map(|stmt| self.ddl(stmt))
            .collect::<Vec<_>>()
            .join(";\n\n");

        Some(format!("{sql};\n"))
    }
}
