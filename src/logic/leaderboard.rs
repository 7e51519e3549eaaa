//! Club-wide leaderboard across all matches.

use crate::models::{GameMatch, Player, PlayerId, PlayerOrder, Side};
use crate::store::{MatchFilter, MatchStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ranked player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    /// Sum of this player's side of every scored match.
    pub total_score: u32,
}

/// Rank players by persisted wins (desc), then summed score (desc).
///
/// Remaining ties keep the order of `players`.
pub fn build_leaderboard(players: &[Player], matches: &[GameMatch]) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<PlayerId, u32> = HashMap::new();
    for m in matches {
        let Some(score) = m.score else { continue };
        for side in [Side::A, Side::B] {
            *totals.entry(m.player(side)).or_default() += score.for_side(side);
        }
    }

    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .map(|p| LeaderboardEntry {
            player_id: p.id,
            name: p.name.clone(),
            matches_played: p.matches_played,
            matches_won: p.matches_won,
            matches_lost: p.matches_lost,
            total_score: totals.get(&p.id).copied().unwrap_or(0),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.matches_won
            .cmp(&a.matches_won)
            .then(b.total_score.cmp(&a.total_score))
    });
    entries
}

/// Leaderboard from a fresh read of every player and match in the store.
pub fn club_leaderboard<S: MatchStore + ?Sized>(store: &S) -> Vec<LeaderboardEntry> {
    build_leaderboard(
        &store.list_players(PlayerOrder::Created),
        &store.find_matches(&MatchFilter::default()),
    )
}
