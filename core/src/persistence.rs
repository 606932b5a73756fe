use chancesweep_protocol::{LeaderboardQuery, ScoreRecord};

use crate::PersistenceError;

/// Receives the record of every won, non-tutorial game.
///
/// Submission is fire-and-forget from the session's point of view, errors are logged
/// and never retried.
pub trait ScoreSink {
    fn submit_score(&mut self, record: &ScoreRecord) -> Result<(), PersistenceError>;
}

impl<S: ScoreSink + ?Sized> ScoreSink for &mut S {
    fn submit_score(&mut self, record: &ScoreRecord) -> Result<(), PersistenceError> {
        (**self).submit_score(record)
    }
}

/// Read side of the score store.
pub trait Leaderboard {
    /// Records passing the query filters, highest score first, at most `query.limit`.
    fn fetch_top_scores(&self, query: &LeaderboardQuery) -> Result<Vec<ScoreRecord>, PersistenceError>;
}

/// Score store kept in memory, in submission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }
}

impl ScoreSink for MemoryScoreStore {
    fn submit_score(&mut self, record: &ScoreRecord) -> Result<(), PersistenceError> {
        log::debug!(
            "Stored score {} for {} ({}/{})",
            record.score,
            record.player_name,
            record.mode,
            record.difficulty
        );
        self.records.push(record.clone());
        Ok(())
    }
}

impl Leaderboard for MemoryScoreStore {
    fn fetch_top_scores(&self, query: &LeaderboardQuery) -> Result<Vec<ScoreRecord>, PersistenceError> {
        let mut matching: Vec<_> = self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        // stable, equal scores keep submission order
        matching.sort_by(|a, b| b.score.cmp(&a.score));
        matching.truncate(query.limit);
        Ok(matching)
    }
}
