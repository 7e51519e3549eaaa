//! Match (game) between two players, its numeric score tally and group labels.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Round of the group/pool stage.
pub const GROUP_ROUND: u32 = 1;
/// Round holding the semifinals.
pub const SEMIFINAL_ROUND: u32 = 2;
/// Round holding the final and the 3rd-place playoff.
pub const FINAL_ROUND: u32 = 3;

/// Group label of the first pool.
pub const GROUP_A: &str = "A";
/// Group label of the second pool.
pub const GROUP_B: &str = "B";
/// Group label of semifinal matches.
pub const GROUP_SEMIFINAL: &str = "SF";
/// Group label of the final.
pub const GROUP_FINAL: &str = "F";
/// Group label of the 3rd-place playoff.
pub const GROUP_THIRD_PLACE: &str = "3P";

/// Which side of a match (player A or player B).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Numeric point tally of a decided match, one count per side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub a: u32,
    pub b: u32,
}

impl MatchScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    pub fn for_side(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// A single match between two players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    /// None until decided. Once set the match is terminal.
    pub winner: Option<PlayerId>,
    /// 1 = group stage, 2 = semifinals / knockout, 3 = final stage.
    pub round: u32,
    /// "A", "B", "SF", "F", "3P", or None for ungrouped formats.
    pub group: Option<String>,
    pub score: Option<MatchScore>,
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    pub fn new(player_a: PlayerId, player_b: PlayerId, round: u32, group: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_a,
            player_b,
            winner: None,
            round,
            group: group.map(str::to_string),
            score: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player_a == player || self.player_b == player
    }

    pub fn player(&self, side: Side) -> PlayerId {
        match side {
            Side::A => self.player_a,
            Side::B => self.player_b,
        }
    }

    /// Which side the given player plays on, if any.
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if player == self.player_a {
            Some(Side::A)
        } else if player == self.player_b {
            Some(Side::B)
        } else {
            None
        }
    }

    /// The non-winning participant of a decided match.
    pub fn loser(&self) -> Option<PlayerId> {
        let winner = self.winner?;
        self.side_of(winner).map(|side| self.player(side.opponent()))
    }

    /// Unordered pair key, identical for (a, b) and (b, a).
    pub fn pair_key(&self) -> (PlayerId, PlayerId) {
        pair_key(self.player_a, self.player_b)
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.group.as_deref() == Some(group)
    }

    /// Set the winner (and score). Fails if already decided or the winner does not play here.
    pub fn decide(
        &mut self,
        winner: PlayerId,
        score: Option<MatchScore>,
    ) -> Result<(), TournamentError> {
        if self.is_decided() {
            return Err(TournamentError::MatchAlreadyDecided(self.id));
        }
        if !self.involves(winner) {
            return Err(TournamentError::InvalidWinner {
                match_id: self.id,
                player_id: winner,
            });
        }
        self.winner = Some(winner);
        self.score = score;
        Ok(())
    }
}

/// Sorted pair of ids so that both orderings map to the same key.
pub fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
