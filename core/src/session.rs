use std::time::Duration;

use chancesweep_protocol::ScoreRecord;
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Period of the elapsed-time counter.
pub const GAME_TICK: Duration = Duration::from_secs(1);

/// How long a hinted mine stays highlighted.
pub const HINT_FADE_DELAY: Duration = Duration::from_millis(1500);

/// Valid transitions:
/// - AwaitingFirstClick -> InProgress | Abandoned
/// - InProgress -> Won | Lost | Abandoned
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No tile revealed yet, random layouts are not placed
    #[default]
    AwaitingFirstClick,
    InProgress,
    Won,
    Lost,
    /// Player quit, nothing is finalized or submitted
    Abandoned,
}

impl SessionState {
    pub const fn is_awaiting_first_click(self) -> bool {
        matches!(self, Self::AwaitingFirstClick)
    }

    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// No further moves are accepted.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Abandoned)
    }
}

/// Work the session schedules on its own clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionTask {
    Tick,
    FadeHint(Coord2),
}

/// What a call to [`Session::advance`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerOutcome {
    pub ticks: u32,
    pub faded: Vec<Coord2>,
}

impl TimerOutcome {
    pub fn has_update(&self) -> bool {
        self.ticks > 0 || !self.faded.is_empty()
    }
}

/// Read-only copy of everything a UI renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub mode: GameMode,
    pub difficulty: String,
    pub board: Board,
    pub mines_left: i32,
    pub elapsed_secs: u32,
    pub hints_remaining: u32,
    pub hints_used: u32,
    pub chances_remaining: u32,
    pub chances_used: u32,
    pub cleared_tiles: CellCount,
    pub final_score: Option<u32>,
}

/// One game from first click to finalization.
///
/// All mutation goes through `&mut self`, the owner forwards player actions and
/// wall-clock time ([`Session::advance`]) one at a time.
#[derive(Debug)]
pub struct Session<R, S> {
    config: SessionConfig,
    board: Board,
    state: SessionState,
    hints_remaining: u32,
    hints_used: u32,
    chances_remaining: u32,
    chances_used: u32,
    cleared_tiles: CellCount,
    elapsed_secs: u32,
    final_score: Option<u32>,
    triggered_mine: Option<Coord2>,
    scheduler: Scheduler<SessionTask>,
    game_timer: Option<TaskId>,
    rng: R,
    sink: S,
}

impl<S: ScoreSink> Session<SmallRng, S> {
    pub fn with_seed(config: SessionConfig, seed: u64, sink: S) -> Result<Self> {
        Self::new(config, SmallRng::seed_from_u64(seed), sink)
    }
}

impl<R: Rng, S: ScoreSink> Session<R, S> {
    pub fn new(config: SessionConfig, rng: R, sink: S) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "New {} session on {} ({}x{}, {} mines)",
            config.mode,
            config.difficulty,
            config.settings.grid_size,
            config.settings.grid_size,
            config.settings.mine_count
        );

        let board = config.layout.initial_board(config.settings.grid_size)?;

        Ok(Self {
            board,
            state: SessionState::default(),
            hints_remaining: config.settings.initial_hints,
            hints_used: 0,
            chances_remaining: config.settings.initial_chances,
            chances_used: 0,
            cleared_tiles: 0,
            elapsed_secs: 0,
            final_score: None,
            triggered_mine: None,
            scheduler: Scheduler::new(),
            game_timer: None,
            config,
            rng,
            sink,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn chances_remaining(&self) -> u32 {
        self.chances_remaining
    }

    pub fn chances_used(&self) -> u32 {
        self.chances_used
    }

    pub fn cleared_tiles(&self) -> CellCount {
        self.cleared_tiles
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_timer_running(&self) -> bool {
        self.game_timer
            .is_some_and(|timer| self.scheduler.is_pending(timer))
    }

    /// Mines not yet accounted for by a flag or a spent chance, display only.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.settings.mine_count)
            - i32::from(self.board.flagged_count())
            - i32::from(self.board.chance_used_count())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            mode: self.config.mode,
            difficulty: self.config.difficulty.clone(),
            board: self.board.clone(),
            mines_left: self.mines_left(),
            elapsed_secs: self.elapsed_secs,
            hints_remaining: self.hints_remaining,
            hints_used: self.hints_used,
            chances_remaining: self.chances_remaining,
            chances_used: self.chances_used,
            cleared_tiles: self.cleared_tiles,
            final_score: self.final_score,
        }
    }

    /// Opens the tile at `coords`, placing mines first if this is the opening move.
    ///
    /// Flagged or revealed tiles and finished sessions give `NoChange`. Only
    /// out-of-bounds coordinates are an error.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        let tile = self.board[coords];
        if tile.is_flagged || tile.is_revealed {
            return Ok(RevealOutcome::NoChange);
        }

        if self.state.is_awaiting_first_click() {
            self.start(coords)?;
        }

        if self.board[coords].has_mine {
            return Ok(self.step_on_mine(coords));
        }

        let report = reveal_region(&mut self.board, coords)?;
        self.cleared_tiles += report.newly_revealed;
        log::debug!(
            "Revealed {} tiles from {:?}, {} cleared",
            report.newly_revealed,
            coords,
            self.cleared_tiles
        );

        if is_won(&self.board, self.config.settings.mine_count) {
            self.finish(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed(report.newly_revealed))
        }
    }

    /// Flags or unflags a hidden tile, unless the mode forbids flags.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || !self.config.mode.allows_flags() {
            return Ok(MarkOutcome::NoChange);
        }

        let tile = &mut self.board[coords];
        if tile.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }
        tile.is_flagged = !tile.is_flagged;
        Ok(MarkOutcome::Changed)
    }

    /// Highlights one random unflagged, unrevealed mine for [`HINT_FADE_DELAY`].
    pub fn use_hint(&mut self) -> HintOutcome {
        if self.state.is_finished() {
            return HintOutcome::NoChange;
        }
        if self.hints_remaining == 0 {
            log::debug!("Hint requested with none remaining");
            return HintOutcome::NoHintsLeft;
        }

        let candidates: Vec<Coord2> = self
            .board
            .iter_coords()
            .filter(|&coords| self.board[coords].is_hint_candidate())
            .collect();
        if candidates.is_empty() {
            log::debug!("Hint requested with no eligible mine");
            return HintOutcome::NoEligibleMine;
        }

        let coords = candidates[self.rng.random_range(0..candidates.len())];
        self.board[coords].is_hinted_mine = true;
        self.hints_remaining -= 1;
        self.hints_used += 1;
        self.scheduler
            .schedule_once(HINT_FADE_DELAY, SessionTask::FadeHint(coords));
        log::debug!("Hinted mine at {:?}, {} hints left", coords, self.hints_remaining);

        HintOutcome::Hinted(coords)
    }

    /// Finalizes a game in progress, at most once.
    ///
    /// A win is only accepted when every safe tile is revealed. Returns the final
    /// score, or `None` when the session is not in progress or the board is not won.
    pub fn terminate(&mut self, won: bool) -> Option<u32> {
        if !self.state.is_in_progress() {
            log::debug!("Cannot terminate a {:?} session, ignoring", self.state);
            return None;
        }
        if won && !is_won(&self.board, self.config.settings.mine_count) {
            log::warn!("Refusing to score an unfinished board as won");
            return None;
        }
        Some(self.finish(won))
    }

    /// Stops the timer, drops pending hint fades, computes the final score and, for
    /// won games in scoring modes, submits it.
    fn finish(&mut self, won: bool) -> u32 {
        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        self.stop_tasks();
        if !won {
            let exposed = self.board.expose_mines();
            log::debug!("Exposed {} mines", exposed);
        }

        let score = score_with_settings(&self.score_input(won), &self.config.settings);
        self.final_score = Some(score);
        log::debug!(
            "Game {} after {}s with score {}",
            if won { "won" } else { "lost" },
            self.elapsed_secs,
            score
        );

        if won && self.config.mode.submits_scores() {
            self.submit(score);
        }
        score
    }

    /// Quits without finalizing. Returns `false` if the session was already finished.
    pub fn abandon(&mut self) -> bool {
        if self.state.is_finished() {
            return false;
        }
        self.state = SessionState::Abandoned;
        self.stop_tasks();
        log::debug!("Session abandoned after {}s", self.elapsed_secs);
        true
    }

    /// Moves the session clock forward, running the game timer and hint fades.
    pub fn advance(&mut self, elapsed: Duration) -> TimerOutcome {
        let mut outcome = TimerOutcome::default();

        for (_, task) in self.scheduler.advance(elapsed) {
            match task {
                SessionTask::Tick => {
                    if self.state.is_in_progress() {
                        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
                        outcome.ticks += 1;
                    }
                }
                SessionTask::FadeHint(coords) => {
                    self.board[coords].is_hinted_mine = false;
                    outcome.faded.push(coords);
                }
            }
        }

        outcome
    }

    fn start(&mut self, first_click: Coord2) -> Result<()> {
        let settings = &self.config.settings;
        if let Some(board) = self.config.layout.place_on_first_click(
            &self.board,
            settings.mine_count,
            first_click,
            &mut self.rng,
        )? {
            self.board = board;
        }
        self.state = SessionState::InProgress;
        self.game_timer = Some(self.scheduler.schedule_repeating(GAME_TICK, SessionTask::Tick));
        log::debug!("Game started at {:?}", first_click);
        Ok(())
    }

    fn step_on_mine(&mut self, coords: Coord2) -> RevealOutcome {
        if self.chances_remaining > 0 {
            self.chances_remaining -= 1;
            self.chances_used += 1;
            let tile = &mut self.board[coords];
            tile.is_revealed = true;
            tile.is_chance_used_mine = true;
            tile.is_hinted_mine = false;
            log::debug!(
                "Chance absorbed mine at {:?}, {} chances left",
                coords,
                self.chances_remaining
            );
            RevealOutcome::ChanceUsed
        } else {
            self.board[coords].is_revealed = true;
            self.triggered_mine = Some(coords);
            self.finish(false);
            RevealOutcome::HitMine
        }
    }

    fn stop_tasks(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.game_timer = None;
        self.board.clear_hints();
        log::trace!("Cancelled {} scheduled tasks", cancelled);
    }

    fn score_input(&self, won: bool) -> ScoreInput {
        let settings = &self.config.settings;
        ScoreInput {
            cleared_tiles: self.cleared_tiles,
            difficulty_multiplier: settings.difficulty_multiplier,
            initial_hints: settings.initial_hints,
            initial_chances: settings.initial_chances,
            hints_used: self.hints_used,
            chances_used: self.chances_used,
            time_taken: self.elapsed_secs,
            won,
        }
    }

    fn submit(&mut self, score: u32) {
        let record = ScoreRecord::new(
            self.config.player_name.as_deref(),
            score,
            self.config.mode.as_str(),
            self.config.difficulty.as_str(),
            Utc::now(),
        );
        if let Err(err) = self.sink.submit_score(&record) {
            log::error!("Failed to submit score for {}: {}", record.player_name, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_config(grid_size: Coord, mines: &[Coord2], hints: u32, chances: u32) -> SessionConfig {
        SessionConfig {
            difficulty: "custom".to_owned(),
            settings: DifficultySettings {
                grid_size,
                mine_count: mines.len() as CellCount,
                initial_hints: hints,
                initial_chances: chances,
                difficulty_multiplier: 1.0,
                time_bonus_multiplier: 1.0,
                penalties_ignored: false,
                display_name: "Custom".to_owned(),
            },
            mode: GameMode::Normal,
            player_name: Some("ada".to_owned()),
            layout: LayoutSource::Fixed(mines.to_vec()),
        }
    }

    fn session(config: SessionConfig) -> Session<SmallRng, MemoryScoreStore> {
        Session::with_seed(config, 7, MemoryScoreStore::new()).unwrap()
    }

    #[test]
    fn first_reveal_places_mines_and_starts_timer() {
        let config = SessionConfig::from_table(
            &DifficultyTable::standard(),
            "easy",
            GameMode::Normal,
            None,
        )
        .unwrap();
        let mut session = session(config);
        assert_eq!(session.board().mine_total(), 0);
        assert!(!session.is_timer_running());

        let outcome = session.reveal((4, 4)).unwrap();

        assert!(matches!(outcome, RevealOutcome::Revealed(_) | RevealOutcome::Won));
        assert_eq!(session.board().mine_total(), 10);
        assert!(safe_zone(session.board(), (4, 4)).all(|pos| !session.board()[pos].has_mine));
        assert_eq!(session.cleared_tiles(), session.board().revealed_safe_count());
    }

    #[test]
    fn timer_only_ticks_while_in_progress() {
        let mut session = session(fixed_config(3, &[(0, 0), (2, 2)], 0, 0));

        assert_eq!(session.advance(Duration::from_secs(5)).ticks, 0);
        assert_eq!(session.elapsed_secs(), 0);

        session.reveal((0, 1)).unwrap();
        assert!(session.is_timer_running());
        assert_eq!(session.advance(Duration::from_millis(3500)).ticks, 3);
        assert_eq!(session.elapsed_secs(), 3);

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert!(!session.is_timer_running());
        assert_eq!(session.advance(Duration::from_secs(10)).ticks, 0);
        assert_eq!(session.elapsed_secs(), 3);
    }

    #[test]
    fn chance_absorbs_mine_then_loss_reveals_all_mines() {
        let mines = [(0, 0), (4, 4), (0, 4), (4, 0)];
        let mut session = session(fixed_config(5, &mines, 0, 1));
        assert_eq!(session.reveal((1, 1)).unwrap(), RevealOutcome::Revealed(1));
        session.toggle_flag((4, 0)).unwrap();
        assert_eq!(session.mines_left(), 3);

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::ChanceUsed);

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.mines_left(), 2);
        assert_eq!((session.chances_remaining(), session.chances_used()), (0, 1));
        let tile = session.board()[(0, 0)];
        assert!(tile.is_revealed && tile.is_chance_used_mine);

        assert_eq!(session.reveal((4, 4)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.triggered_mine(), Some((4, 4)));
        assert!(session.board()[(0, 4)].is_revealed);
        assert!(!session.board()[(4, 0)].is_revealed);
        assert_eq!(session.final_score(), Some(0));
        assert!(session.sink().records().is_empty());
    }

    #[test]
    fn clearing_every_safe_tile_wins_and_submits_once() {
        let mut session = session(fixed_config(3, &[(0, 0)], 0, 0));

        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::Won);

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.cleared_tiles(), 8);
        // 8 tiles * 10, plus a 15s time budget untouched
        assert_eq!(session.final_score(), Some(95));
        assert_eq!(session.terminate(true), None);
        assert_eq!(session.terminate(false), None);

        let records = session.sink().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].player_name, "ada");
        assert_eq!(records[0].score, 95);
        assert_eq!(records[0].mode, "normal");
        assert_eq!(records[0].difficulty, "custom");
        assert!(!session.board()[(0, 0)].is_revealed);
    }

    #[test]
    fn finished_session_rejects_moves() {
        let mut session = session(fixed_config(3, &[(0, 0)], 3, 0));
        session.reveal((2, 2)).unwrap();
        let before = session.snapshot();

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((0, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(session.use_hint(), HintOutcome::NoChange);
        assert!(!session.abandon());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn flags_block_reveal_and_adjust_mines_left() {
        let mut session = session(fixed_config(4, &[(0, 0), (3, 3)], 0, 0));

        assert_eq!(session.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(session.mines_left(), 1);
        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.state(), SessionState::AwaitingFirstClick);

        assert_eq!(session.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(session.mines_left(), 2);

        session.reveal((0, 1)).unwrap();
        assert_eq!(session.toggle_flag((0, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(session.toggle_flag((9, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn no_flag_mode_disables_flags() {
        let mut config = fixed_config(4, &[(0, 0)], 0, 0);
        config.mode = GameMode::NoFlag;
        let mut session = session(config);

        assert_eq!(session.toggle_flag((0, 0)).unwrap(), MarkOutcome::NoChange);
        assert!(!session.board()[(0, 0)].is_flagged);
    }

    #[test]
    fn hint_highlights_mine_until_it_fades() {
        let mut session = session(fixed_config(4, &[(0, 0), (3, 3)], 1, 0));
        session.reveal((0, 1)).unwrap();

        let HintOutcome::Hinted(coords) = session.use_hint() else {
            panic!("expected a hint");
        };

        assert!(session.board()[coords].has_mine);
        assert!(session.board()[coords].is_hinted_mine);
        assert_eq!((session.hints_remaining(), session.hints_used()), (0, 1));
        assert!(!session.board()[coords].is_revealed);
        assert_eq!(session.use_hint(), HintOutcome::NoHintsLeft);

        assert!(session.advance(Duration::from_millis(1499)).faded.is_empty());
        assert_eq!(session.advance(Duration::from_millis(1)).faded, vec![coords]);
        assert!(!session.board()[coords].is_hinted_mine);
    }

    #[test]
    fn hint_needs_an_eligible_mine() {
        let mut session = session(fixed_config(4, &[(0, 0)], 5, 0));
        session.toggle_flag((0, 0)).unwrap();
        assert_eq!(session.use_hint(), HintOutcome::NoEligibleMine);

        session.reveal((0, 1)).unwrap();

        let outcome = session.use_hint();
        assert_eq!(outcome, HintOutcome::NoEligibleMine);
        assert!(outcome.notice().is_some());
        assert_eq!(session.hints_remaining(), 5);
    }

    #[test]
    fn termination_cancels_pending_hint_fade() {
        let mut session = session(fixed_config(4, &[(0, 0)], 1, 0));
        session.reveal((0, 1)).unwrap();
        session.use_hint();

        assert_eq!(session.terminate(false), Some(0));

        assert!(session.board().iter_tiles().all(|tile| !tile.is_hinted_mine));
        assert_eq!(session.advance(Duration::from_secs(2)), TimerOutcome::default());
    }

    #[test]
    fn abandon_stops_everything_without_submitting() {
        let mut session = session(fixed_config(3, &[(0, 0)], 0, 0));
        session.reveal((0, 1)).unwrap();

        assert!(session.abandon());

        assert_eq!(session.state(), SessionState::Abandoned);
        assert!(!session.is_timer_running());
        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.terminate(true), None);
        assert!(session.sink().records().is_empty());
    }

    #[test]
    fn tutorial_win_is_not_submitted() {
        let config = SessionConfig::tutorial(&TutorialConfig::standard(), Some("ada".to_owned()));
        let mut session = session(config);

        let coords: Vec<_> = session.board().iter_coords().collect();
        for coords in coords {
            let tile = session.board()[coords];
            if !tile.has_mine && !tile.is_revealed && !session.state().is_finished() {
                session.reveal(coords).unwrap();
            }
        }

        assert_eq!(session.state(), SessionState::Won);
        assert!(session.final_score().is_some());
        assert!(session.sink().records().is_empty());
    }

    #[test]
    fn tutorial_hint_works_before_first_reveal() {
        let tutorial = TutorialConfig::standard();
        let mut session = session(SessionConfig::tutorial(&tutorial, None));
        assert_eq!(session.board().mine_total(), 5);

        let HintOutcome::Hinted(coords) = session.use_hint() else {
            panic!("expected a hint");
        };

        assert!(tutorial.mine_positions.contains(&coords));
        assert_eq!(session.hints_remaining(), 9);
        assert_eq!(session.state(), SessionState::AwaitingFirstClick);
        assert!(!session.is_timer_running());
    }

    #[test]
    fn terminate_needs_a_game_in_progress() {
        let config = SessionConfig::from_table(
            &DifficultyTable::standard(),
            "easy",
            GameMode::Normal,
            Some("eve".to_owned()),
        )
        .unwrap();
        let mut session = session(config);

        assert_eq!(session.terminate(true), None);
        assert_eq!(session.terminate(false), None);

        assert_eq!(session.state(), SessionState::AwaitingFirstClick);
        assert_eq!(session.final_score(), None);
        assert!(session.sink().records().is_empty());
    }

    #[test]
    fn unfinished_board_is_not_accepted_as_won() {
        let mut session = session(fixed_config(4, &[(0, 0), (3, 3)], 0, 0));
        session.reveal((0, 1)).unwrap();
        assert!(!is_won(session.board(), 2));

        assert_eq!(session.terminate(true), None);

        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.is_timer_running());
        assert!(session.sink().records().is_empty());

        assert_eq!(session.terminate(false), Some(0));
        assert_eq!(session.state(), SessionState::Lost);
        assert!(session.board()[(3, 3)].is_revealed);
        assert!(session.sink().records().is_empty());
    }

    #[test]
    fn failed_submission_does_not_disturb_the_session() {
        struct OfflineSink;

        impl ScoreSink for OfflineSink {
            fn submit_score(&mut self, _record: &ScoreRecord) -> core::result::Result<(), PersistenceError> {
                Err(PersistenceError::Unavailable("offline".to_owned()))
            }
        }

        let mut session =
            Session::with_seed(fixed_config(3, &[(0, 0)], 0, 0), 1, OfflineSink).unwrap();

        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.final_score(), Some(95));
    }

    #[test]
    fn borrowed_sink_receives_records() {
        let mut store = MemoryScoreStore::new();
        {
            let mut session =
                Session::with_seed(fixed_config(3, &[(0, 0)], 0, 0), 1, &mut store).unwrap();
            session.reveal((2, 2)).unwrap();
        }

        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = fixed_config(4, &[(0, 0)], 0, 0);
        config.layout = LayoutSource::Random;
        config.settings.mine_count = 8;

        let err = Session::with_seed(config, 1, MemoryScoreStore::new()).unwrap_err();

        assert_eq!(
            err,
            GameError::TooManyMines {
                requested: 8,
                capacity: 7
            }
        );
    }

    #[test]
    fn snapshot_serializes_for_the_ui() {
        let mut session = session(fixed_config(3, &[(0, 0)], 0, 0));
        session.reveal((0, 1)).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["state"], "InProgress");
        assert_eq!(json["mines_left"], 1);
        assert_eq!(json["cleared_tiles"], 1);
    }
}
