//! Club tournament engine: library with models, storage boundary and tournament logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    build_leaderboard, club_leaderboard, compute_standings, confirm_winner,
    create_finals_from_semis, create_group_stage, create_knockout_matches,
    create_next_knockout_round, create_semifinals_from_groups, create_swiss_next_round,
    finalize_match, generate_round_robin_pairs, group_standings, pair_knockout_entrants, podium,
    seed_semifinals, tournament_stage, Bye, GroupStandings, KnockoutRound, LeaderboardEntry,
    PointStep, Podium, ScoreBoard, ScoreState, ScoringEvent, StandingsRow, SwissRound,
    TiebreakState, UNGROUPED,
};
pub use models::{
    GameMatch, MatchId, MatchScore, Player, PlayerId, PlayerOrder, Side, StatsDelta,
    TournamentError, TournamentStage,
};
pub use store::{InMemoryStore, MatchFilter, MatchStore};
