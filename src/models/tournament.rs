//! TournamentError and TournamentStage.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Match id does not exist in the store.
    #[error("Match not found")]
    MatchNotFound(MatchId),
    /// Player id does not exist in the store.
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    #[error("A player with this name already exists")]
    DuplicatePlayer,
    /// Player names must not be blank.
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    /// The same player was listed more than once for a stage.
    #[error("Player listed more than once")]
    DuplicateEntrant(PlayerId),
    /// Group stage needs an exact roster size.
    #[error("Need exactly {expected} players for the group stage (got {found})")]
    WrongRosterSize { expected: usize, found: usize },
    /// Previous round has no matches, or some are still undecided.
    #[error("Not all previous round matches have a winner (round {round})")]
    IncompleteRound { round: u32 },
    /// Semifinals need two groups with at least two ranked players each.
    #[error("Group {0} is missing or has fewer than 2 ranked players")]
    GroupNotReady(String),
    /// Finals need exactly two decided semifinals.
    #[error("Need exactly 2 decided semifinals (found {found})")]
    SemifinalsNotReady { found: usize },
    /// Matches for this round/group were already created.
    #[error("Matches for round {round} already exist")]
    StageAlreadyCreated { round: u32, group: Option<String> },
    /// Round numbers start at 1 (knockout rounds at 2).
    #[error("Invalid round {0}")]
    InvalidRound(u32),
    /// Match already has a winner; decided matches are terminal.
    #[error("Match already has a winner")]
    MatchAlreadyDecided(MatchId),
    /// Winner must be one of the two participants.
    #[error("Winner is not a participant of this match")]
    InvalidWinner { match_id: MatchId, player_id: PlayerId },
    /// Bye recipient already played in the previous round.
    #[error("Player played in the previous round and cannot advance on a bye")]
    InvalidBye(PlayerId),
    /// Tiebreak slot index out of range.
    #[error("Tiebreak slot {0} does not exist")]
    InvalidTiebreakSlot(usize),
    /// Tiebreak points can only be toggled at 40-40.
    #[error("Tiebreak is not active")]
    TiebreakInactive,
    /// Side already holds enough tiebreak slots to win.
    #[error("Tiebreak already won")]
    TiebreakDecided,
    /// The current score does not allow confirming this side as winner.
    #[error("Winner cannot be confirmed with the current score")]
    WinnerNotConfirmable,
}

impl TournamentError {
    /// Missing match or player (mapped to 404 by the web layer).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::MatchNotFound(_) | TournamentError::PlayerNotFound(_)
        )
    }
}

/// Current phase of a group + knockout tournament, derived from its matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStage {
    /// No group matches yet.
    #[default]
    NotStarted,
    /// Round 1 pools being played.
    Group,
    /// Semifinals created (round 2).
    Semis,
    /// Final and 3rd-place playoff created (round 3).
    Finals,
    /// Both round 3 matches decided.
    Done,
}
