//! Group standings derived from round 1 matches.

use crate::models::{GameMatch, PlayerId, GROUP_ROUND};
use crate::store::{MatchFilter, MatchStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket for round 1 matches without a group label.
pub const UNGROUPED: &str = "UNGROUPED";

/// One player's tally within a group. `played` only counts decided matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub player_id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub played: u32,
}

impl StandingsRow {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            wins: 0,
            losses: 0,
            played: 0,
        }
    }
}

/// Standings per group label, rows sorted best first.
pub type GroupStandings = BTreeMap<String, Vec<StandingsRow>>;

/// Compute standings for every group from the round 1 matches in `matches`.
///
/// Every player seen in a group's match gets a row, decided or not. Rows are
/// ordered by wins (desc), then losses (asc), then first appearance.
pub fn compute_standings(matches: &[GameMatch]) -> GroupStandings {
    let mut groups: GroupStandings = BTreeMap::new();

    for m in matches.iter().filter(|m| m.round == GROUP_ROUND) {
        let label = m.group.clone().unwrap_or_else(|| UNGROUPED.to_string());
        let rows = groups.entry(label).or_default();
        for pid in [m.player_a, m.player_b] {
            if !rows.iter().any(|r| r.player_id == pid) {
                rows.push(StandingsRow::new(pid));
            }
        }

        let (Some(winner), Some(loser)) = (m.winner, m.loser()) else {
            continue;
        };
        for row in rows.iter_mut() {
            if row.player_id == winner {
                row.wins += 1;
                row.played += 1;
            } else if row.player_id == loser {
                row.losses += 1;
                row.played += 1;
            }
        }
    }

    for rows in groups.values_mut() {
        // stable: equal records keep first-appearance order
        rows.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses)));
    }
    groups
}

/// Standings from a fresh read of the store's round 1 matches.
pub fn group_standings<S: MatchStore + ?Sized>(store: &S) -> GroupStandings {
    compute_standings(&store.find_matches(&MatchFilter::round(GROUP_ROUND)))
}
