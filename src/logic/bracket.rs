//! Knockout bracket: semifinals from the two groups, final and 3rd-place playoff from the semis.

use crate::logic::standings::{compute_standings, GroupStandings};
use crate::models::{
    GameMatch, PlayerId, TournamentError, TournamentStage, FINAL_ROUND, GROUP_A, GROUP_B,
    GROUP_FINAL, GROUP_ROUND, GROUP_SEMIFINAL, GROUP_THIRD_PLACE, SEMIFINAL_ROUND,
};
use crate::store::{MatchFilter, MatchStore};
use serde::{Deserialize, Serialize};

/// Cross-seeded semifinal pairings: (1st A vs 2nd B), (1st B vs 2nd A).
pub fn seed_semifinals(
    standings: &GroupStandings,
) -> Result<[(PlayerId, PlayerId); 2], TournamentError> {
    let top_two = |label: &str| -> Result<(PlayerId, PlayerId), TournamentError> {
        match standings.get(label).map(Vec::as_slice) {
            Some([first, second, ..]) => Ok((first.player_id, second.player_id)),
            _ => Err(TournamentError::GroupNotReady(label.to_string())),
        }
    };
    let (a1, a2) = top_two(GROUP_A)?;
    let (b1, b2) = top_two(GROUP_B)?;
    Ok([(a1, b2), (b1, a2)])
}

/// Create the two semifinals (round 2, "SF") from the final group standings.
///
/// Every round 1 match must be decided at the time of the call.
pub fn create_semifinals_from_groups<S: MatchStore + ?Sized>(
    store: &mut S,
) -> Result<Vec<GameMatch>, TournamentError> {
    let group_matches = store.find_matches(&MatchFilter::round(GROUP_ROUND));
    if group_matches.is_empty() || group_matches.iter().any(|m| !m.is_decided()) {
        return Err(TournamentError::IncompleteRound { round: GROUP_ROUND });
    }
    ensure_stage_empty(store, SEMIFINAL_ROUND, GROUP_SEMIFINAL)?;

    let standings = compute_standings(&group_matches);
    let matches = seed_semifinals(&standings)?
        .into_iter()
        .map(|(a, b)| GameMatch::new(a, b, SEMIFINAL_ROUND, Some(GROUP_SEMIFINAL)))
        .collect();

    let created = store.create_matches(matches)?;
    log::info!("Created {} semifinal matches", created.len());
    Ok(created)
}

/// Create the final (round 3, "F") from the semifinal winners and the 3rd-place
/// playoff (round 3, "3P") from their losers.
pub fn create_finals_from_semis<S: MatchStore + ?Sized>(
    store: &mut S,
) -> Result<Vec<GameMatch>, TournamentError> {
    let semis = store.find_matches(&MatchFilter::round_group(SEMIFINAL_ROUND, GROUP_SEMIFINAL));
    let results: Vec<(PlayerId, PlayerId)> = semis
        .iter()
        .filter_map(|m| Some((m.winner?, m.loser()?)))
        .collect();
    if semis.len() != 2 || results.len() != 2 {
        return Err(TournamentError::SemifinalsNotReady {
            found: results.len(),
        });
    }
    ensure_stage_empty(store, FINAL_ROUND, GROUP_FINAL)?;
    ensure_stage_empty(store, FINAL_ROUND, GROUP_THIRD_PLACE)?;

    let (w1, l1) = results[0];
    let (w2, l2) = results[1];
    let matches = vec![
        GameMatch::new(w1, w2, FINAL_ROUND, Some(GROUP_FINAL)),
        GameMatch::new(l1, l2, FINAL_ROUND, Some(GROUP_THIRD_PLACE)),
    ];

    let created = store.create_matches(matches)?;
    log::info!("Created final and 3rd-place playoff");
    Ok(created)
}

/// Where a group + knockout tournament stands, judged from its matches.
pub fn tournament_stage(matches: &[GameMatch]) -> TournamentStage {
    let final_stage: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| {
            m.round == FINAL_ROUND && (m.in_group(GROUP_FINAL) || m.in_group(GROUP_THIRD_PLACE))
        })
        .collect();
    if !final_stage.is_empty() {
        return if final_stage.len() == 2 && final_stage.iter().all(|m| m.is_decided()) {
            TournamentStage::Done
        } else {
            TournamentStage::Finals
        };
    }
    if matches
        .iter()
        .any(|m| m.round == SEMIFINAL_ROUND && m.in_group(GROUP_SEMIFINAL))
    {
        return TournamentStage::Semis;
    }
    if matches.iter().any(|m| m.round == GROUP_ROUND) {
        return TournamentStage::Group;
    }
    TournamentStage::NotStarted
}

/// Top three once the final and the 3rd-place playoff are decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Podium {
    pub champion: PlayerId,
    pub runner_up: PlayerId,
    pub third_place: PlayerId,
}

pub fn podium(matches: &[GameMatch]) -> Option<Podium> {
    let decided_in = |group: &str| {
        matches
            .iter()
            .find(|m| m.round == FINAL_ROUND && m.in_group(group) && m.is_decided())
    };
    let final_match = decided_in(GROUP_FINAL)?;
    let third = decided_in(GROUP_THIRD_PLACE)?;
    Some(Podium {
        champion: final_match.winner?,
        runner_up: final_match.loser()?,
        third_place: third.winner?,
    })
}

fn ensure_stage_empty<S: MatchStore + ?Sized>(
    store: &S,
    round: u32,
    group: &str,
) -> Result<(), TournamentError> {
    if store
        .find_matches(&MatchFilter::round_group(round, group))
        .is_empty()
    {
        Ok(())
    } else {
        Err(TournamentError::StageAlreadyCreated {
            round,
            group: Some(group.to_string()),
        })
    }
}
