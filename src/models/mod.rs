//! Data structures for club tournaments: players, matches, errors and stages.

mod game;
mod player;
mod tournament;

pub use game::{
    pair_key, GameMatch, MatchId, MatchScore, Side, FINAL_ROUND, GROUP_A, GROUP_B, GROUP_FINAL,
    GROUP_ROUND, GROUP_SEMIFINAL, GROUP_THIRD_PLACE, SEMIFINAL_ROUND,
};
pub use player::{Player, PlayerId, PlayerOrder, StatsDelta};
pub use tournament::{TournamentError, TournamentStage};
