//! Player and the counter deltas applied when a match is finalized.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A club member taking part in tournaments.
///
/// The counters are only ever moved by match finalization, never set directly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
}

impl Player {
    /// Create a new player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            matches_played: 0,
            matches_won: 0,
            matches_lost: 0,
        }
    }

    /// Apply a stats increment.
    pub fn apply(&mut self, delta: StatsDelta) {
        self.matches_won += delta.won;
        self.matches_lost += delta.lost;
        self.matches_played += delta.played;
    }
}

/// Counter increments for one player, as produced by a single finalization.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatsDelta {
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub lost: u32,
    #[serde(default)]
    pub played: u32,
}

impl StatsDelta {
    /// Winner side of a decided match: one win, one played.
    pub fn win() -> Self {
        Self {
            won: 1,
            lost: 0,
            played: 1,
        }
    }

    /// Loser side of a decided match: one loss, one played.
    pub fn loss() -> Self {
        Self {
            won: 0,
            lost: 1,
            played: 1,
        }
    }
}

/// Ordering for player listings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerOrder {
    /// Insertion order.
    #[default]
    Created,
    /// Case-insensitive by name, then id.
    Name,
    /// Most wins first.
    Wins,
}
