//! Forward-only schema migrations.
//!
//! A [`MigrationCatalog`] supplies named SQL sources, sorted by name. A
//! [`Migrator`] applies each source not yet listed in the `migrations` ledger
//! table, one statement at a time, and records it once every statement has
//! succeeded. There are no down-migrations and no checksums: a source is
//! identified by its file name alone, and the ledger is trusted over the
//! actual state of the schema.
//!
//! Statements run in autocommit mode, not inside a per-file transaction. If a
//! statement fails, earlier statements of the same file stay applied and the
//! file is retried from its first statement on the next run, so migrations
//! should guard their DDL (`CREATE TABLE IF NOT EXISTS`, `INSERT OR IGNORE`).
//!
//! Runs are not coordinated between processes. Two processes migrating the
//! same database at once may both execute a source; the slower one then
//! fails with [`MigrationError::RecordInsert`] on the ledger's unique
//! constraint. Migrate from a single process at deploy or startup time.

mod catalog;
mod error;
mod migrator;
mod split;

pub use catalog::{MigrationCatalog, MigrationSource};
pub use error::MigrationError;
pub use migrator::{LEDGER_TABLE, MigrationRecord, MigrationReport, Migrator, run_migrations};
pub use split::split_statements;
