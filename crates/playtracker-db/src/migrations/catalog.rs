use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::MigrationError;

const MIGRATION_EXTENSION: &str = "sql";

/// One named unit of schema-change SQL, as read from its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSource {
    /// Sort key and ledger identifier, e.g. `001_create_plays.sql`.
    pub name: String,
    pub content: String,
}

impl MigrationSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Where migration sources come from.
///
/// Names are compared as plain strings, so they must sort into the intended
/// order on their own (zero-padded numeric prefixes such as `001_`).
#[derive(Debug, Clone)]
pub enum MigrationCatalog {
    /// Every `*.sql` file directly inside a directory.
    Directory(PathBuf),
    /// `(name, sql)` pairs compiled into the binary.
    Embedded(&'static [(&'static str, &'static str)]),
}

impl MigrationCatalog {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        MigrationCatalog::Directory(path.into())
    }

    pub fn embedded(sources: &'static [(&'static str, &'static str)]) -> Self {
        MigrationCatalog::Embedded(sources)
    }

    /// Read every source and return them in application order.
    ///
    /// Each call reads afresh. A missing directory yields no sources.
    pub fn load(&self) -> Result<Vec<MigrationSource>, MigrationError> {
        let mut sources = match self {
            MigrationCatalog::Directory(dir) => load_directory(dir)?,
            MigrationCatalog::Embedded(entries) => load_embedded(entries)?,
        };
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sources)
    }
}

fn load_directory(dir: &Path) -> Result<Vec<MigrationSource>, MigrationError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("migration directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(MigrationError::Discovery {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let discovery_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| MigrationError::Discovery { path, source }
    };

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(discovery_err(dir))?;
        let path = entry.path();
        if !is_migration_file(&path) {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!("skipping migration with non UTF-8 name: {}", path.display());
            continue;
        };
        let content = std::fs::read_to_string(&path).map_err(discovery_err(&path))?;
        sources.push(MigrationSource::new(name, content));
    }
    Ok(sources)
}

fn is_migration_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == MIGRATION_EXTENSION)
}

fn load_embedded(
    entries: &[(&'static str, &'static str)],
) -> Result<Vec<MigrationSource>, MigrationError> {
    let mut seen = HashSet::new();
    let mut sources = Vec::with_capacity(entries.len());
    for (name, sql) in entries {
        if !seen.insert(*name) {
            return Err(MigrationError::DuplicateSource {
                name: name.to_string(),
            });
        }
        sources.push(MigrationSource::new(*name, *sql));
    }
    Ok(sources)
}
