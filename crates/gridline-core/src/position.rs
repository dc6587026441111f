// Fantasy positions and their display order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roster-eligible fantasy positions, in the order rosters are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

/// Display order for roster tables.
pub const POSITION_ORDER: [Position; 6] = [
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
];

impl Position {
    /// Parse a Sleeper position label ("QB", "DEF", ...).
    ///
    /// Returns `None` for labels outside the display order (IDP positions,
    /// "FLEX", empty strings).
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" | "DST" => Some(Position::Defense),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }

    /// Index into `POSITION_ORDER`.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Quarterback => 0,
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::TightEnd => 3,
            Position::Kicker => 4,
            Position::Defense => 5,
        }
    }
}

/// Sort rank for a raw position label. Unknown labels rank after every
/// known position.
pub fn sort_rank(label: &str) -> u8 {
    Position::from_str_pos(label)
        .map(|p| p.sort_order())
        .unwrap_or(POSITION_ORDER.len() as u8)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}
