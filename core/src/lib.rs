//! Game logic for a Minesweeper variant with hints, chances and scoring.
//!
//! Everything is driven through [`Session`], the free functions behind it (placement,
//! flood fill, win check, scoring) are exposed for callers that need them directly.

pub use board::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use persistence::*;
pub use reveal::*;
pub use schedule::*;
pub use score::*;
pub use session::*;
pub use tile::*;
pub use types::*;
pub use win::*;

pub use chancesweep_protocol as protocol;

mod board;
mod config;
mod error;
mod generator;
mod persistence;
mod reveal;
mod schedule;
mod score;
mod session;
mod tile;
mod types;
mod win;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    /// Safe tiles were opened, with how many.
    Revealed(CellCount),
    /// A mine was hit and a chance absorbed it.
    ChanceUsed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed(_) => true,
            ChanceUsed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HintOutcome {
    NoChange,
    /// The mine at these coordinates is highlighted until the hint fades.
    Hinted(Coord2),
    NoHintsLeft,
    NoEligibleMine,
}

impl HintOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Hinted(_))
    }

    /// Player-facing message for outcomes that only inform.
    pub const fn notice(self) -> Option<&'static str> {
        match self {
            Self::NoHintsLeft => Some("No hints remaining"),
            Self::NoEligibleMine => Some("There are no unrevealed, unflagged mines left to hint"),
            Self::NoChange | Self::Hinted(_) => None,
        }
    }
}
