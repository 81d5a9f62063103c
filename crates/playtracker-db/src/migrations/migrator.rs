use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, params};
use tracing::{debug, error, info};

use super::catalog::{MigrationCatalog, MigrationSource};
use super::error::MigrationError;
use super::split::split_statements;
use crate::time::parse_timestamp;

/// Name of the ledger table recording applied migrations.
pub const LEDGER_TABLE: &str = "migrations";

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL UNIQUE,
    applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";

/// A row of the ledger. Rows are only ever inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub id: i64,
    pub filename: String,
    pub applied_at: DateTime<Utc>,
}

/// What a run did with each source it saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Executed and recorded during this run.
    pub applied: Vec<String>,
    /// Already in the ledger.
    pub skipped: Vec<String>,
    /// Held no statements; not recorded, so seen again next run.
    pub empty: Vec<String>,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.applied.len() + self.skipped.len() + self.empty.len()
    }
}

/// Applies migration sources to a connection owned by the caller.
pub struct Migrator<'c> {
    conn: &'c Connection,
}

impl<'c> Migrator<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Create the ledger table if it is missing. Safe to call repeatedly.
    pub fn ensure_ledger(&self) -> Result<(), MigrationError> {
        self.conn
            .execute(CREATE_LEDGER, [])
            .map_err(MigrationError::LedgerBootstrap)?;
        debug!("migration ledger ready");
        Ok(())
    }

    /// Whether the ledger holds a record for `filename`.
    pub fn is_applied(&self, filename: &str) -> Result<bool, MigrationError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM migrations WHERE filename = ?1",
                params![filename],
                |row| row.get(0),
            )
            .map_err(|source| MigrationError::Lookup {
                filename: filename.to_string(),
                source,
            })?;
        Ok(count > 0)
    }

    /// Load `catalog` and apply every source not yet in the ledger.
    pub fn run(&self, catalog: &MigrationCatalog) -> Result<MigrationReport, MigrationError> {
        self.ensure_ledger()?;
        let sources = catalog.load()?;
        self.apply_sources(&sources)
    }

    /// Apply `sources` in the order given, skipping those already recorded.
    ///
    /// Stops at the first failure. Statements run one by one in autocommit
    /// mode, so statements of the failing source that ran before the error
    /// stay in effect while the source itself stays unrecorded.
    pub fn apply(&self, sources: &[MigrationSource]) -> Result<MigrationReport, MigrationError> {
        self.ensure_ledger()?;
        self.apply_sources(sources)
    }

    fn apply_sources(
        &self,
        sources: &[MigrationSource],
    ) -> Result<MigrationReport, MigrationError> {
        let mut report = MigrationReport::default();

        for source in sources {
            if self.is_applied(&source.name)? {
                info!("migration {} already applied, skipping", source.name);
                report.skipped.push(source.name.clone());
                continue;
            }

            let statements = split_statements(&source.content);
            if statements.is_empty() {
                debug!("migration {} has no statements", source.name);
                report.empty.push(source.name.clone());
                continue;
            }

            info!("running migration: {}", source.name);
            self.execute_all(&source.name, &statements)?;
            self.record(&source.name)?;
            info!("migration {} completed successfully", source.name);
            report.applied.push(source.name.clone());
        }

        Ok(report)
    }

    /// Run each statement on its own. `execute_batch` steps a statement to
    /// completion and discards any rows, so `PRAGMA` and `SELECT` are accepted.
    fn execute_all(&self, filename: &str, statements: &[String]) -> Result<(), MigrationError> {
        for statement in statements {
            if let Err(source) = self.conn.execute_batch(statement) {
                error!("migration {filename}: error executing statement: {statement}");
                return Err(MigrationError::StatementExecution {
                    filename: filename.to_string(),
                    statement: statement.clone(),
                    source,
                });
            }
        }
        Ok(())
    }

    fn record(&self, filename: &str) -> Result<(), MigrationError> {
        self.conn
            .execute(
                "INSERT INTO migrations (filename) VALUES (?1)",
                params![filename],
            )
            .map_err(|source| MigrationError::RecordInsert {
                filename: filename.to_string(),
                source,
            })?;
        Ok(())
    }

    /// Ledger contents in the order they were written.
    pub fn applied(&self) -> Result<Vec<MigrationRecord>, MigrationError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, filename, applied_at FROM migrations ORDER BY id")
            .map_err(MigrationError::LedgerRead)?;

        let rows = stmt
            .query_map([], |row| {
                let raw: Option<String> = row.get(2)?;
                let applied_at = raw.as_deref().and_then(parse_timestamp).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        Type::Text,
                        format!("unreadable applied_at {raw:?}").into(),
                    )
                })?;
                Ok(MigrationRecord {
                    id: row.get(0)?,
                    filename: row.get(1)?,
                    applied_at,
                })
            })
            .map_err(MigrationError::LedgerRead)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(MigrationError::LedgerRead)
    }

    /// Names from `sources` that have no ledger record yet.
    pub fn pending(&self, sources: &[MigrationSource]) -> Result<Vec<String>, MigrationError> {
        let mut pending = Vec::new();
        for source in sources {
            if !self.is_applied(&source.name)? {
                pending.push(source.name.clone());
            }
        }
        Ok(pending)
    }
}

/// Apply every pending `*.sql` file in `dir` to `conn`.
pub fn run_migrations(
    conn: &Connection,
    dir: impl Into<std::path::PathBuf>,
) -> Result<MigrationReport, MigrationError> {
    Migrator::new(conn).run(&MigrationCatalog::directory(dir))
}
