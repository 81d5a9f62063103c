use std::sync::{Mutex, MutexGuard};

use playtracker_common::{Error, NewPlay, Outcome, Play, Result, Scenario};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::migrations::{MigrationRecord, Migrator};
use crate::time::{parse_date, parse_datetime};

const PLAY_COLUMNS: &str = "p.id, p.date, p.outcome, p.difficulty, p.notes, p.scenario_id, s.name, p.created_at, p.updated_at
     FROM plays p LEFT JOIN scenarios s ON s.id = p.scenario_id";

/// Persistent storage for logged plays.
///
/// Takes over a connection whose schema has already been migrated.
pub struct PlayStore {
    conn: Mutex<Connection>,
}

impl PlayStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Database("play store lock poisoned".into()))
    }

    /// All plays, newest first.
    pub fn list_plays(&self) -> Result<Vec<Play>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PLAY_COLUMNS} ORDER BY p.date DESC, p.id DESC"
            ))
            .map_err(|e| Error::Database(format!("failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], play_from_row)
            .map_err(|e| Error::Database(format!("failed to query plays: {e}")))?;

        let mut plays = Vec::new();
        for row in rows {
            plays.push(row.map_err(|e| Error::Database(format!("failed to read play row: {e}")))?);
        }
        Ok(plays)
    }

    pub fn get_play(&self, id: i64) -> Result<Option<Play>> {
        let conn = self.connection()?;
        select_play(&conn, id)
    }

    /// Store `play` and return it as saved, with its id and timestamps.
    pub fn create_play(&self, play: &NewPlay) -> Result<Play> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO plays (date, outcome, difficulty, notes, scenario_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                play.date.format("%Y-%m-%d").to_string(),
                play.outcome.as_str(),
                play.difficulty,
                play.notes,
                play.scenario_id,
            ],
        )
        .map_err(|e| Error::Database(format!("failed to create play: {e}")))?;

        let id = conn.last_insert_rowid();
        select_play(&conn, id)?
            .ok_or_else(|| Error::Database(format!("play {id} vanished after insert")))
    }

    pub fn play_count(&self) -> Result<usize> {
        let conn = self.connection()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM plays", [], |row| row.get(0))
            .map_err(|e| Error::Database(format!("failed to count plays: {e}")))?;
        Ok(count as usize)
    }

    /// Scenarios in alphabetical order, for the new-play form.
    pub fn list_scenarios(&self) -> Result<Vec<Scenario>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare("SELECT id, name, created_at, updated_at FROM scenarios ORDER BY name")
            .map_err(|e| Error::Database(format!("failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Scenario {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: parse_datetime(row.get(2)?),
                    updated_at: parse_datetime(row.get(3)?),
                })
            })
            .map_err(|e| Error::Database(format!("failed to query scenarios: {e}")))?;

        let mut scenarios = Vec::new();
        for row in rows {
            scenarios.push(
                row.map_err(|e| Error::Database(format!("failed to read scenario row: {e}")))?,
            );
        }
        Ok(scenarios)
    }

    pub fn scenario_exists(&self, id: i64) -> Result<bool> {
        let conn = self.connection()?;
        let found = conn
            .query_row("SELECT 1 FROM scenarios WHERE id = ?1", params![id], |_| Ok(()))
            .optional()
            .map_err(|e| Error::Database(format!("failed to look up scenario: {e}")))?;
        Ok(found.is_some())
    }

    /// Ledger rows of the migrations applied to this database.
    pub fn applied_migrations(&self) -> Result<Vec<MigrationRecord>> {
        let conn = self.connection()?;
        Ok(Migrator::new(&conn).applied()?)
    }
}

fn select_play(conn: &Connection, id: i64) -> Result<Option<Play>> {
    conn.query_row(
        &format!("SELECT {PLAY_COLUMNS} WHERE p.id = ?1"),
        params![id],
        play_from_row,
    )
    .optional()
    .map_err(|e| Error::Database(format!("failed to load play {id}: {e}")))
}

fn play_from_row(row: &Row<'_>) -> rusqlite::Result<Play> {
    let date: String = row.get(1)?;
    let date = parse_date(&date).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, format!("bad play date {date:?}").into())
    })?;
    let outcome: String = row.get(2)?;
    let outcome = outcome
        .parse::<Outcome>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Play {
        id: row.get(0)?,
        date,
        outcome,
        difficulty: row.get(3)?,
        notes: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        scenario_id: row.get(5)?,
        scenario_name: row.get(6)?,
        created_at: parse_datetime(row.get(7)?),
        updated_at: parse_datetime(row.get(8)?),
    })
}
