pub mod connection;
pub mod migrations;
pub mod play_store;
mod time;

pub use connection::{open_database, open_in_memory};
pub use migrations::{
    MigrationCatalog, MigrationError, MigrationRecord, MigrationReport, MigrationSource, Migrator,
    run_migrations,
};
pub use play_store::PlayStore;
