//! Match finalization: record the winner once and move both players' counters.

use crate::models::{GameMatch, MatchId, MatchScore, PlayerId, StatsDelta, TournamentError};
use crate::store::MatchStore;

/// Record the winner of a match.
///
/// Checks the match and both players before mutating anything. The winner gets
/// one win and one played, the loser one loss and one played.
pub fn finalize_match<S: MatchStore + ?Sized>(
    store: &mut S,
    match_id: MatchId,
    winner: PlayerId,
    score: Option<MatchScore>,
) -> Result<GameMatch, TournamentError> {
    let m = store.get_match(match_id)?;
    if m.is_decided() {
        return Err(TournamentError::MatchAlreadyDecided(match_id));
    }
    let side = m.side_of(winner).ok_or(TournamentError::InvalidWinner {
        match_id,
        player_id: winner,
    })?;
    let loser = m.player(side.opponent());
    store.get_player(winner)?;
    store.get_player(loser)?;

    let decided = store.update_match_winner(match_id, winner, score)?;
    store.increment_player_stats(winner, StatsDelta::win())?;
    store.increment_player_stats(loser, StatsDelta::loss())?;

    log::info!(
        "Match {} (round {}, group {:?}) won by {}",
        match_id,
        decided.round,
        decided.group,
        winner
    );
    Ok(decided)
}
