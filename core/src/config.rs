use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Per-difficulty parameters, immutable for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    pub grid_size: Coord,
    pub mine_count: CellCount,
    pub initial_hints: u32,
    pub initial_chances: u32,
    pub difficulty_multiplier: f64,
    pub time_bonus_multiplier: f64,
    /// Hint and chance usage neither rewards nor penalizes the score.
    #[serde(default)]
    pub penalties_ignored: bool,
    pub display_name: String,
}

impl DifficultySettings {
    pub fn total_tiles(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }

    /// Checks that every possible first click leaves room for all mines.
    pub fn validate(&self) -> Result<()> {
        self.validate_shape()?;

        let capacity = self.total_tiles() - max_safe_zone(self.grid_size);
        if self.mine_count > capacity {
            return Err(GameError::TooManyMines {
                requested: self.mine_count,
                capacity,
            });
        }
        Ok(())
    }

    /// Grid and multiplier checks, without the first-click capacity rule.
    pub fn validate_shape(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(GameError::InvalidConfig(format!(
                "{}: grid size must be at least 1",
                self.display_name
            )));
        }

        for (name, value) in [
            ("difficulty multiplier", self.difficulty_multiplier),
            ("time bonus multiplier", self.time_bonus_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{}: {} must be a non-negative number, got {}",
                    self.display_name, name, value
                )));
            }
        }

        Ok(())
    }
}

/// Lookup table from difficulty key to its settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTable {
    tiers: BTreeMap<String, DifficultySettings>,
}

impl DifficultyTable {
    /// The four built-in tiers, `easy` through `extreme`.
    pub fn standard() -> Self {
        let tiers = [
            ("easy", 9, 10, 999, 999, 1.0, 0.5, true, "Easy"),
            ("medium", 16, 40, 3, 1, 2.0, 1.0, false, "Medium"),
            ("hard", 22, 99, 1, 0, 3.0, 1.5, false, "Hard"),
            ("extreme", 25, 150, 0, 0, 5.0, 2.0, false, "Extreme"),
        ]
        .into_iter()
        .map(
            |(key, grid_size, mine_count, hints, chances, multiplier, time_bonus, ignored, name)| {
                let settings = DifficultySettings {
                    grid_size,
                    mine_count,
                    initial_hints: hints,
                    initial_chances: chances,
                    difficulty_multiplier: multiplier,
                    time_bonus_multiplier: time_bonus,
                    penalties_ignored: ignored,
                    display_name: name.to_owned(),
                };
                (key.to_owned(), settings)
            },
        )
        .collect();
        Self { tiers }
    }

    /// Parses and validates a table written as one TOML table per difficulty key.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: Self =
            toml::from_str(text).map_err(|err| GameError::ConfigParse(err.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(GameError::InvalidConfig("no difficulties defined".to_owned()));
        }
        for (key, settings) in &self.tiers {
            settings.validate().inspect_err(|err| {
                log::warn!("Difficulty {:?} is misconfigured: {}", key, err);
            })?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&DifficultySettings> {
        self.tiers.get(key)
    }

    pub fn require(&self, key: &str) -> Result<&DifficultySettings> {
        self.get(key)
            .ok_or_else(|| GameError::UnknownDifficulty(key.to_owned()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, settings: DifficultySettings) {
        self.tiers.insert(key.into(), settings);
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Normal,
    /// Flag toggling is disabled entirely.
    NoFlag,
    /// Alternate palette, no effect on game logic.
    ColorBlind,
    /// Scripted layout, scores are never submitted.
    Tutorial,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [Self::Normal, Self::NoFlag, Self::ColorBlind, Self::Tutorial];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::NoFlag => "noFlag",
            Self::ColorBlind => "colorBlind",
            Self::Tutorial => "tutorial",
        }
    }

    pub const fn allows_flags(self) -> bool {
        !matches!(self, Self::NoFlag)
    }

    pub const fn submits_scores(self) -> bool {
        !matches!(self, Self::Tutorial)
    }

    pub const fn uses_fixed_layout(self) -> bool {
        matches!(self, Self::Tutorial)
    }
}

impl Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| GameError::InvalidConfig(format!("unknown game mode {:?}", s)))
    }
}

/// Scripted board used by the tutorial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TutorialConfig {
    pub grid_size: Coord,
    pub initial_hints: u32,
    pub initial_chances: u32,
    pub difficulty_multiplier: f64,
    pub mine_positions: Vec<Coord2>,
}

impl TutorialConfig {
    pub const DIFFICULTY_KEY: &'static str = "tutorial";

    pub fn standard() -> Self {
        Self {
            grid_size: 5,
            initial_hints: 10,
            initial_chances: 10,
            difficulty_multiplier: 1.0,
            mine_positions: vec![(0, 1), (4, 4), (1, 4), (3, 0), (2, 4)],
        }
    }

    pub fn settings(&self) -> DifficultySettings {
        let mine_count = self.mine_positions.len() as CellCount;
        DifficultySettings {
            grid_size: self.grid_size,
            mine_count,
            initial_hints: self.initial_hints,
            initial_chances: self.initial_chances,
            difficulty_multiplier: self.difficulty_multiplier,
            time_bonus_multiplier: 0.0,
            penalties_ignored: true,
            display_name: "Tutorial".to_owned(),
        }
    }
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything a session needs to know before the first click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub difficulty: String,
    pub settings: DifficultySettings,
    pub mode: GameMode,
    pub player_name: Option<String>,
    pub layout: LayoutSource,
}

impl SessionConfig {
    /// Resolves `difficulty` in `table`, tutorial mode always plays the scripted board.
    pub fn from_table(
        table: &DifficultyTable,
        difficulty: &str,
        mode: GameMode,
        player_name: Option<String>,
    ) -> Result<Self> {
        if mode.uses_fixed_layout() {
            return Ok(Self::tutorial(&TutorialConfig::standard(), player_name));
        }

        let settings = table.require(difficulty).inspect_err(|err| {
            log::warn!("Cannot start session: {}", err);
        })?;

        let config = Self {
            difficulty: difficulty.to_owned(),
            settings: settings.clone(),
            mode,
            player_name,
            layout: LayoutSource::Random,
        };
        config.validate()?;
        Ok(config)
    }

    /// Random layouts must fit around any first click, fixed layouts must match the
    /// declared mine count and lie on the board.
    pub fn validate(&self) -> Result<()> {
        match &self.layout {
            LayoutSource::Random => self.settings.validate(),
            LayoutSource::Fixed(positions) => {
                self.settings.validate_shape()?;
                let board = Board::new(self.settings.grid_size);
                let distinct = positions
                    .iter()
                    .map(|&coords| board.validate_coords(coords))
                    .collect::<Result<BTreeSet<_>>>()?;
                if distinct.len() != usize::from(self.settings.mine_count) {
                    return Err(GameError::InvalidConfig(format!(
                        "scripted layout has {} mines, settings declare {}",
                        distinct.len(),
                        self.settings.mine_count
                    )));
                }
                Ok(())
            }
        }
    }

    pub fn tutorial(tutorial: &TutorialConfig, player_name: Option<String>) -> Self {
        Self {
            difficulty: TutorialConfig::DIFFICULTY_KEY.to_owned(),
            settings: tutorial.settings(),
            mode: GameMode::Tutorial,
            player_name,
            layout: LayoutSource::Fixed(tutorial.mine_positions.clone()),
        }
    }
}
