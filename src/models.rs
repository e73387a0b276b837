use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::BoardError;
use crate::week::{self, WeekKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(BoardError::UnknownDifficulty {
                value: value.to_string(),
            }),
        }
    }
}

/// One person finishing one problem on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub problem_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub completed_date: NaiveDate,
    pub person: String,
}

impl CompletionRecord {
    /// Builds a record from textual fields, rejecting dates that are not
    /// strict `YYYY-MM-DD` and unknown difficulties.
    pub fn from_raw(
        problem_id: &str,
        title: &str,
        difficulty: &str,
        completed_date: &str,
        person: &str,
    ) -> Result<Self, BoardError> {
        Ok(Self {
            problem_id: problem_id.to_string(),
            title: title.to_string(),
            difficulty: difficulty.parse()?,
            completed_date: week::parse_completed_date(completed_date)?,
            person: person.to_string(),
        })
    }

    pub fn week_key(&self) -> WeekKey {
        WeekKey::from_date(self.completed_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub name: String,
    pub completed: u32,
    pub target: u32,
    pub difference: i64,
    pub penalty: u32,
    pub rank: usize,
    pub avatar: String,
    pub completion_percentage: u32,
}

impl ParticipantSummary {
    pub fn met_target(&self) -> bool {
        self.completed >= self.target
    }

    /// Leaderboard badge: `Target Met` once the difference is non-negative.
    pub fn status_label(&self) -> &'static str {
        if self.difference >= 0 {
            "Target Met"
        } else {
            "Penalty"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub participants: Vec<ParticipantSummary>,
    pub total_penalties: u32,
}

/// Aggregated weeks, iterated in ascending key order.
pub type WeeklyData = BTreeMap<WeekKey, WeekSummary>;
