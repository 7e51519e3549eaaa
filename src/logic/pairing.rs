//! Pairing generation: round-robin, group stage, Swiss rounds and knockout fills.

use crate::models::{
    pair_key, GameMatch, PlayerId, TournamentError, GROUP_A, GROUP_B, GROUP_ROUND,
};
use crate::store::{MatchFilter, MatchStore};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Players per pool in the group stage.
pub const GROUP_SIZE: usize = 4;
/// Roster size of the group stage (two pools).
pub const GROUP_STAGE_PLAYERS: usize = 2 * GROUP_SIZE;

/// All unordered pairs of the roster: i ascending, then j ascending (i < j).
pub fn generate_round_robin_pairs<T: Copy>(roster: &[T]) -> Vec<(T, T)> {
    let n = roster.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((roster[i], roster[j]));
        }
    }
    pairs
}

/// Shuffle the roster into pools "A" and "B" and create their round-robin matches (round 1).
///
/// Requires exactly 8 distinct, known players and no existing round 1 matches.
pub fn create_group_stage<S, R>(
    store: &mut S,
    roster: &[PlayerId],
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError>
where
    S: MatchStore + ?Sized,
    R: Rng + ?Sized,
{
    if roster.len() != GROUP_STAGE_PLAYERS {
        return Err(TournamentError::WrongRosterSize {
            expected: GROUP_STAGE_PLAYERS,
            found: roster.len(),
        });
    }
    check_entrants(store, roster)?;
    ensure_round_empty(store, GROUP_ROUND)?;

    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);

    let matches: Vec<GameMatch> = shuffled
        .chunks_exact(GROUP_SIZE)
        .zip([GROUP_A, GROUP_B])
        .flat_map(|(pool, label)| {
            generate_round_robin_pairs(pool)
                .into_iter()
                .map(move |(a, b)| GameMatch::new(a, b, GROUP_ROUND, Some(label)))
        })
        .collect();

    let created = store.create_matches(matches)?;
    log::info!("Created group stage: {} matches in 2 groups", created.len());
    Ok(created)
}

/// Matches created for one Swiss round plus players left without an opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwissRound {
    pub round: u32,
    pub matches: Vec<GameMatch>,
    pub byes: Vec<PlayerId>,
}

/// Pair the roster for `round`, never repeating a pairing from an earlier round.
///
/// Players are walked in name order; each unpaired player takes the first unpaired
/// opponent they have not met yet. Greedy, so it can leave byes a perfect matching
/// would avoid.
pub fn create_swiss_next_round<S: MatchStore + ?Sized>(
    store: &mut S,
    roster: &[PlayerId],
    round: u32,
) -> Result<SwissRound, TournamentError> {
    if round == 0 {
        return Err(TournamentError::InvalidRound(round));
    }
    check_entrants(store, roster)?;
    ensure_round_empty(store, round)?;

    let mut players = roster
        .iter()
        .map(|&id| store.get_player(id))
        .collect::<Result<Vec<_>, _>>()?;
    players.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.id.cmp(&b.id))
    });

    let played: HashSet<(PlayerId, PlayerId)> = store
        .find_matches(&MatchFilter::default())
        .iter()
        .filter(|m| m.round < round)
        .map(GameMatch::pair_key)
        .collect();

    let mut unpaired: VecDeque<PlayerId> = players.iter().map(|p| p.id).collect();
    let mut pairs = Vec::new();
    let mut byes = Vec::new();
    while let Some(player) = unpaired.pop_front() {
        let opponent = unpaired
            .iter()
            .position(|&other| !played.contains(&pair_key(player, other)));
        match opponent.and_then(|idx| unpaired.remove(idx)) {
            Some(other) => pairs.push(GameMatch::new(player, other, round, None)),
            None => byes.push(player),
        }
    }

    let matches = store.create_matches(pairs)?;
    if !byes.is_empty() {
        log::warn!("Swiss round {}: {} player(s) left without opponent", round, byes.len());
    }
    log::info!("Created Swiss round {}: {} matches", round, matches.len());
    Ok(SwissRound {
        round,
        matches,
        byes,
    })
}

/// A player who drew an empty slot in a knockout round.
///
/// No match is created for them; `bye_advance` flags that the surrounding system
/// has to carry them into the next round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bye {
    pub player_id: PlayerId,
    pub bye_advance: bool,
}

/// Matches and byes of one knockout round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutRound {
    pub round: u32,
    pub matches: Vec<GameMatch>,
    pub byes: Vec<Bye>,
}

/// Pad to the next power of two with empty slots and walk the list two at a time.
///
/// Returns the real pairings and the players paired with an empty slot.
pub fn pair_knockout_entrants(
    entrants: &[PlayerId],
) -> (Vec<(PlayerId, PlayerId)>, Vec<PlayerId>) {
    let size = entrants.len().next_power_of_two();
    let mut slots: Vec<Option<PlayerId>> = entrants.iter().copied().map(Some).collect();
    slots.resize(size, None);

    let mut pairs = Vec::new();
    let mut byes = Vec::new();
    for chunk in slots.chunks(2) {
        match chunk {
            [Some(a), Some(b)] => pairs.push((*a, *b)),
            [Some(p), None] | [None, Some(p)] => byes.push(*p),
            [Some(p)] => byes.push(*p),
            _ => {}
        }
    }
    (pairs, byes)
}

/// Create the matches of knockout `round` (>= 2) from the given entrants, in order.
pub fn create_knockout_matches<S: MatchStore + ?Sized>(
    store: &mut S,
    entrants: &[PlayerId],
    round: u32,
) -> Result<KnockoutRound, TournamentError> {
    if round <= GROUP_ROUND {
        return Err(TournamentError::InvalidRound(round));
    }
    check_entrants(store, entrants)?;
    ensure_round_empty(store, round)?;

    let (pairs, bye_players) = pair_knockout_entrants(entrants);
    let matches = store.create_matches(
        pairs
            .into_iter()
            .map(|(a, b)| GameMatch::new(a, b, round, None))
            .collect(),
    )?;
    let byes: Vec<Bye> = bye_players
        .into_iter()
        .map(|player_id| {
            log::warn!("Knockout round {}: {} has a bye", round, player_id);
            Bye {
                player_id,
                bye_advance: true,
            }
        })
        .collect();

    log::info!("Created knockout round {}: {} matches", round, matches.len());
    Ok(KnockoutRound {
        round,
        matches,
        byes,
    })
}

/// Build knockout `round` from the winners of `round - 1`, followed by `advanced_byes`.
///
/// Every match of the previous round must be decided (read fresh from the store).
/// A bye recipient cannot have played in the previous round.
pub fn create_next_knockout_round<S: MatchStore + ?Sized>(
    store: &mut S,
    round: u32,
    advanced_byes: &[PlayerId],
) -> Result<KnockoutRound, TournamentError> {
    if round <= GROUP_ROUND + 1 {
        return Err(TournamentError::InvalidRound(round));
    }
    let previous_round = round - 1;
    let previous = store.find_matches(&MatchFilter::round(previous_round));
    if previous.is_empty() || previous.iter().any(|m| !m.is_decided()) {
        return Err(TournamentError::IncompleteRound {
            round: previous_round,
        });
    }

    if let Some(&played) = advanced_byes
        .iter()
        .find(|&&id| previous.iter().any(|m| m.involves(id)))
    {
        return Err(TournamentError::InvalidBye(played));
    }

    let entrants: Vec<PlayerId> = previous
        .iter()
        .filter_map(|m| m.winner)
        .chain(advanced_byes.iter().copied())
        .collect();
    create_knockout_matches(store, &entrants, round)
}

/// Entrants must be distinct and exist in the store.
fn check_entrants<S: MatchStore + ?Sized>(
    store: &S,
    entrants: &[PlayerId],
) -> Result<(), TournamentError> {
    let mut seen = HashSet::with_capacity(entrants.len());
    for &id in entrants {
        if !seen.insert(id) {
            return Err(TournamentError::DuplicateEntrant(id));
        }
        store.get_player(id)?;
    }
    Ok(())
}

/// Guard against creating the same stage twice.
pub(crate) fn ensure_round_empty<S: MatchStore + ?Sized>(
    store: &S,
    round: u32,
) -> Result<(), TournamentError> {
    if store.find_matches(&MatchFilter::round(round)).is_empty() {
        Ok(())
    } else {
        Err(TournamentError::StageAlreadyCreated { round, group: None })
    }
}
