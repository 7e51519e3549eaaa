//! Tournament business logic: pairings, live scoring, standings, bracket, leaderboard.

mod bracket;
mod leaderboard;
mod pairing;
mod results;
mod scoring;
mod standings;

pub use bracket::{
    create_finals_from_semis, create_semifinals_from_groups, podium, seed_semifinals,
    tournament_stage, Podium,
};
pub use leaderboard::{build_leaderboard, club_leaderboard, LeaderboardEntry};
pub use pairing::{
    create_group_stage, create_knockout_matches, create_next_knockout_round,
    create_swiss_next_round, generate_round_robin_pairs, pair_knockout_entrants, Bye,
    KnockoutRound, SwissRound, GROUP_SIZE, GROUP_STAGE_PLAYERS,
};
pub use results::finalize_match;
pub use scoring::{
    confirm_winner, PointStep, ScoreBoard, ScoreState, ScoringEvent, TiebreakState,
    TIEBREAK_SLOTS, TIEBREAK_TARGET,
};
pub use standings::{compute_standings, group_standings, GroupStandings, StandingsRow, UNGROUPED};
