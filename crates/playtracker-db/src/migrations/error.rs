use std::path::PathBuf;

use thiserror::Error;

/// Failures of a migration run. Every variant is fatal to the run.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The migration directory could not be listed, or a file in it read.
    #[error("failed to discover migrations at {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An embedded bundle names the same migration twice.
    #[error("duplicate migration name: {name}")]
    DuplicateSource { name: String },

    #[error("failed to create migration ledger: {0}")]
    LedgerBootstrap(#[source] rusqlite::Error),

    #[error("failed to check whether {filename} was applied: {source}")]
    Lookup {
        filename: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("migration {filename} failed on statement `{statement}`: {source}")]
    StatementExecution {
        filename: String,
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to record migration {filename} as applied: {source}")]
    RecordInsert {
        filename: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read migration ledger: {0}")]
    LedgerRead(#[source] rusqlite::Error),
}

impl From<MigrationError> for playtracker_common::Error {
    fn from(err: MigrationError) -> Self {
        playtracker_common::Error::Migration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_failure_names_file_and_statement() {
        let err = MigrationError::StatementExecution {
            filename: "001_init.sql".into(),
            statement: "CREATE INVALID TABLE syntax".into(),
            source: rusqlite::Error::InvalidQuery,
        };
        let msg = err.to_string();
        assert!(msg.contains("001_init.sql"));
        assert!(msg.contains("CREATE INVALID TABLE syntax"));
    }

    #[test]
    fn converts_into_application_error() {
        let err = MigrationError::DuplicateSource {
            name: "001_a.sql".into(),
        };
        let app: playtracker_common::Error = err.into();
        assert!(matches!(app, playtracker_common::Error::Migration(_)));
        assert!(app.to_string().contains("001_a.sql"));
    }
}
