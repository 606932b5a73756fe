//! Wire types exchanged with score persistence and leaderboard services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name recorded when the player never registered one.
pub const ANONYMOUS_PLAYER: &str = "Anonymous";

/// How many entries a leaderboard returns unless told otherwise.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Filter value that UIs use to mean "do not filter".
pub const FILTER_ALL: &str = "all";

/// A finished, won game as handed to the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u32,
    pub mode: String,
    pub difficulty: String,
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(
        player_name: Option<&str>,
        score: u32,
        mode: impl Into<String>,
        difficulty: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let player_name = match player_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => ANONYMOUS_PLAYER.to_owned(),
        };
        Self {
            player_name,
            score,
            mode: mode.into(),
            difficulty: difficulty.into(),
            timestamp,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Top-scores request, filters are optional and `"all"` means unfiltered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaderboardQuery {
    pub mode: Option<String>,
    pub difficulty: Option<String>,
    pub limit: usize,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            mode: None,
            difficulty: None,
            limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl LeaderboardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = normalize_filter(mode.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = normalize_filter(difficulty.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether `record` passes the mode and difficulty filters.
    pub fn matches(&self, record: &ScoreRecord) -> bool {
        let mode_ok = filter_accepts(self.mode.as_deref(), &record.mode);
        let difficulty_ok = filter_accepts(self.difficulty.as_deref(), &record.difficulty);
        mode_ok && difficulty_ok
    }
}

fn normalize_filter(value: String) -> Option<String> {
    if value.is_empty() || value == FILTER_ALL {
        None
    } else {
        Some(value)
    }
}

fn filter_accepts(filter: Option<&str>, value: &str) -> bool {
    match filter {
        None | Some(FILTER_ALL) => true,
        Some(expected) => expected == value,
    }
}
