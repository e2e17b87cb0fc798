use crate::Source;

use indexmap::IndexSet;
use relsql_core::Result;
use relsql_sql::stmt::{ColumnDef, Expr, Insert, Name, OrderBy, Query, Statement, Type};

use std::{
    fs,
    path::{Path, PathBuf},
};

const LEDGER_COLUMN: &str = "migration";

/// Stamp recorded for an unstamped `definition.sql`.
const DEFINITION: &str = "definition";

/// A `.sql` file found in a migrations directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MigrationEntry {
    stamp: String,
    path: PathBuf,
}

/// Definition and migration files in stamp order.
#[derive(Debug, Default)]
struct Scan {
    definitions: Vec<MigrationEntry>,
    migrations: Vec<MigrationEntry>,
}

impl Scan {
    fn read(dir: &Path) -> Result<Scan> {
        let mut scan = Scan::default();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(stem) = name.strip_suffix(".sql") else {
                continue;
            };

            let entry = |stamp: &str| MigrationEntry {
                stamp: stamp.to_string(),
                path: path.clone(),
            };

            if stem == DEFINITION {
                scan.definitions.push(entry(DEFINITION));
            } else if let Some(stamp) = stem.strip_prefix("definition-") {
                scan.definitions.push(entry(stamp));
            } else if let Some(stamp) = stem.strip_prefix("migration-") {
                scan.migrations.push(entry(stamp));
            } else {
                tracing::warn!(file = %name, "skipping unrecognized migration file");
            }
        }

        scan.definitions.sort_by(|a, b| a.stamp.cmp(&b.stamp));
        scan.migrations.sort_by(|a, b| a.stamp.cmp(&b.stamp));
        Ok(scan)
    }
}

impl MigrationEntry {
    /// A definition covers every migration up to and including its stamp.
    /// An unstamped definition covers them all.
    fn covers(&self, migration: &MigrationEntry) -> bool {
        self.stamp == DEFINITION || migration.stamp <= self.stamp
    }
}

impl Source {
    /// Applies the migrations in `dir` that the ledger has not recorded and
    /// returns whether anything was applied.
    ///
    /// On an empty ledger the latest `definition-<stamp>.sql` is applied
    /// first and recorded along with every migration it covers. Then each
    /// unrecorded `migration-<stamp>.sql` is applied in stamp order.
    ///
    /// Every file is applied in two phases: its statements run as one batch
    /// and commit, then its stamp is written to the ledger. If the ledger
    /// write fails after the batch committed, the file is applied again on
    /// the next run.
    pub async fn migrate(&mut self, dir: impl AsRef<Path>) -> Result<bool> {
        let ledger = self.ledger();
        self.create_ledger(&ledger).await?;

        let mut applied = self.applied(&ledger).await?;
        let scan = Scan::read(dir.as_ref())?;
        let mut migrated = false;

        if applied.is_empty() {
            if let Some(definition) = scan.definitions.last() {
                let mut stamps = vec![definition.stamp.clone()];
                stamps.extend(
                    scan.migrations
                        .iter()
                        .filter(|migration| migration.stamp != definition.stamp)
                        .filter(|migration| definition.covers(migration))
                        .map(|migration| migration.stamp.clone()),
                );

                self.apply(&ledger, definition, &stamps).await?;
                applied.extend(stamps);
                migrated = true;
            }
        }

        for migration in &scan.migrations {
            if applied.contains(&migration.stamp) {
                continue;
            }

            self.apply(&ledger, migration, std::slice::from_ref(&migration.stamp))
                .await?;
            applied.insert(migration.stamp.clone());
            migrated = true;
        }

        Ok(migrated)
    }

    fn ledger(&self) -> Name {
        let config = self.config();
        Name::qualified(config.schema.as_deref(), &config.ledger_table)
    }

    async fn create_ledger(&mut self, ledger: &Name) -> Result<()> {
        let column = ColumnDef {
            not_null: true,
            primary_key: true,
            ..ColumnDef::new(LEDGER_COLUMN, Type::TEXT)
        };

        let stmt = Statement::create_table(ledger.clone(), vec![column]);
        let ddl = self.ddl(&stmt);
        self.batch(vec![ddl]).await?;

        tracing::info!(ledger = %ledger.base(), "migration ledger ready");
        Ok(())
    }

    /// Recorded stamps in order.
    async fn applied(&mut self, ledger: &Name) -> Result<IndexSet<String>> {
        let mut query = Query::new(ledger.clone());
        query.order_by = vec![OrderBy {
            expr: Expr::column(LEDGER_COLUMN),
            desc: false,
        }];

        let rows = self.exec(&query.into()).await?.rows.into_values()?;

        Ok(rows
            .into_iter()
            .filter_map(|mut row| match row.take(LEDGER_COLUMN)? {
                relsql_core::stmt::Value::String(stamp) => Some(stamp),
                _ => None,
            })
            .collect())
    }

    async fn apply(
        &mut self,
        ledger: &Name,
        entry: &MigrationEntry,
        stamps: &[String],
    ) -> Result<()> {
        let sql = fs::read_to_string(&entry.path)?;

        self.execute(sql.as_str()).await?;

        for stamp in stamps {
            let record: Statement = Insert {
                table: ledger.clone(),
                columns: vec![LEDGER_COLUMN.to_string()],
                rows: vec![vec![Expr::value(stamp.as_str())]],
                returning: None,
            }
            .into();

            self.exec(&record).await?;
        }

        tracing::info!(
            file = %entry.path.display(),
            stamps = stamps.len(),
            "applied migration"
        );
        Ok(())
    }
}
