use serde::{Deserialize, Serialize};

use crate::*;

const POINTS_PER_TILE: f64 = 10.0;
const POINTS_PER_HINT: i64 = 5;
const POINTS_PER_CHANCE: i64 = 10;
/// Seconds of time-bonus budget per unit of grid size.
const SECONDS_PER_GRID_UNIT: f64 = 5.0;

/// Telemetry of one finished game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub cleared_tiles: CellCount,
    pub difficulty_multiplier: f64,
    pub initial_hints: u32,
    pub initial_chances: u32,
    pub hints_used: u32,
    pub chances_used: u32,
    pub time_taken: u32,
    pub won: bool,
}

/// Scores a game played on the difficulty `difficulty` of `table`.
///
/// Lost games score 0 without a lookup. An unknown difficulty is an error, use
/// [`score_or_zero`] where it should only degrade the score.
pub fn calculate_score(input: &ScoreInput, difficulty: &str, table: &DifficultyTable) -> Result<u32> {
    if !input.won {
        return Ok(0);
    }
    let settings = table.require(difficulty)?;
    Ok(score_with_settings(input, settings))
}

/// Like [`calculate_score`], logging a warning and scoring 0 for unknown difficulties.
pub fn score_or_zero(input: &ScoreInput, difficulty: &str, table: &DifficultyTable) -> u32 {
    calculate_score(input, difficulty, table).unwrap_or_else(|err| {
        log::warn!("Scoring {:?} as 0: {}", difficulty, err);
        0
    })
}

/// Scores a game against already resolved settings.
///
/// The grid size, time bonus multiplier and penalty policy come from `settings`, the
/// difficulty multiplier comes from `input`.
pub fn score_with_settings(input: &ScoreInput, settings: &DifficultySettings) -> u32 {
    if !input.won {
        return 0;
    }

    let base = f64::from(input.cleared_tiles) * POINTS_PER_TILE * input.difficulty_multiplier;

    let bonus_penalty = if settings.penalties_ignored {
        0
    } else {
        let unused_hints = i64::from(input.initial_hints.saturating_sub(input.hints_used));
        let unused_chances = i64::from(input.initial_chances.saturating_sub(input.chances_used));
        unused_hints * POINTS_PER_HINT + unused_chances * POINTS_PER_CHANCE
            - i64::from(input.hints_used) * POINTS_PER_HINT
            - i64::from(input.chances_used) * POINTS_PER_CHANCE
    };

    let max_time = f64::from(settings.grid_size) * SECONDS_PER_GRID_UNIT;
    let time_bonus =
        ((max_time - f64::from(input.time_taken)) * settings.time_bonus_multiplier).max(0.0);

    let total = (base + bonus_penalty as f64 + time_bonus).max(0.0).round();
    log::debug!(
        "Score: base {}, bonus/penalty {}, time bonus {}, total {}",
        base,
        bonus_penalty,
        time_bonus,
        total
    );
    total as u32
}
