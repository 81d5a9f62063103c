use chrono::NaiveDate;
use playtracker_common::{DIFFICULTIES, Error, NewPlay, Outcome, Result};
use serde::Deserialize;

pub const MAX_NOTES_LEN: usize = 2000;

/// Raw fields posted by the new-play form. Every field is optional here so
/// that missing input is reported as a validation error, not a rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayForm {
    pub date: String,
    pub scenario: String,
    pub difficulty: String,
    pub outcome: String,
    pub notes: String,
}

impl PlayForm {
    /// Check and normalize the form into a play ready to store. Whether the
    /// scenario exists is left to the caller.
    pub fn validate(&self) -> Result<NewPlay> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| Error::Validation(format!("invalid date {:?}", self.date)))?;

        let outcome: Outcome = self.outcome.parse()?;

        let difficulty = self.difficulty.trim();
        if !DIFFICULTIES.contains(&difficulty) {
            return Err(Error::Validation(format!(
                "unknown difficulty {:?}",
                self.difficulty
            )));
        }

        let scenario_id = self
            .scenario
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::Validation(format!("invalid scenario {:?}", self.scenario)))?;

        let notes = sanitize(self.notes.trim());
        if notes.chars().count() > MAX_NOTES_LEN {
            return Err(Error::Validation(format!(
                "notes longer than {MAX_NOTES_LEN} characters"
            )));
        }

        Ok(NewPlay {
            date,
            outcome,
            difficulty: difficulty.to_string(),
            notes,
            scenario_id,
        })
    }
}

/// Remove control characters, keeping newlines and tabs.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
