use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Difficulty settings offered when logging a play, in display order.
pub const DIFFICULTIES: &[&str] = &["Standard I", "Standard II", "Expert I", "Expert II", "Heroic I"];

/// How a play ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(Outcome::Win),
            "loss" => Ok(Outcome::Loss),
            other => Err(Error::Validation(format!("unknown outcome: {other:?}"))),
        }
    }
}

/// A recorded play session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Play {
    pub id: i64,
    pub date: NaiveDate,
    pub outcome: Outcome,
    pub difficulty: String,
    pub notes: String,
    pub scenario_id: i64,
    pub scenario_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A play that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlay {
    pub date: NaiveDate,
    pub outcome: Outcome,
    pub difficulty: String,
    pub notes: String,
    pub scenario_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
