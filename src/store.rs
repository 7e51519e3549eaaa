//! Persistence collaborator: the match/player store the tournament logic reads and writes.

use crate::models::{
    GameMatch, MatchId, MatchScore, Player, PlayerId, PlayerOrder, StatsDelta, TournamentError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Filter for [`MatchStore::find_matches`]. Unset fields match everything.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchFilter {
    pub round: Option<u32>,
    pub group: Option<String>,
    /// `Some(true)`: decided only; `Some(false)`: undecided only.
    pub winner_set: Option<bool>,
}

impl MatchFilter {
    pub fn round(round: u32) -> Self {
        Self {
            round: Some(round),
            ..Self::default()
        }
    }

    pub fn round_group(round: u32, group: &str) -> Self {
        Self {
            round: Some(round),
            group: Some(group.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, m: &GameMatch) -> bool {
        self.round.map_or(true, |r| m.round == r)
            && self
                .group
                .as_deref()
                .map_or(true, |g| m.group.as_deref() == Some(g))
            && self.winner_set.map_or(true, |w| m.is_decided() == w)
    }
}

/// Storage boundary. Implementations own the match records and player counters.
pub trait MatchStore {
    /// Register a player. Names are unique (case-insensitive).
    fn add_player(&mut self, name: &str) -> Result<Player, TournamentError>;

    fn get_player(&self, player_id: PlayerId) -> Result<Player, TournamentError>;

    /// Bulk insert. Duplicates are skipped; returns the matches actually inserted.
    fn create_matches(
        &mut self,
        batch: Vec<GameMatch>,
    ) -> Result<Vec<GameMatch>, TournamentError>;

    /// Matches passing the filter, in creation order.
    fn find_matches(&self, filter: &MatchFilter) -> Vec<GameMatch>;

    fn get_match(&self, match_id: MatchId) -> Result<GameMatch, TournamentError>;

    /// Set the winner of an undecided match.
    fn update_match_winner(
        &mut self,
        match_id: MatchId,
        winner: PlayerId,
        score: Option<MatchScore>,
    ) -> Result<GameMatch, TournamentError>;

    fn increment_player_stats(
        &mut self,
        player_id: PlayerId,
        delta: StatsDelta,
    ) -> Result<(), TournamentError>;

    fn list_players(&self, order: PlayerOrder) -> Vec<Player>;
}

/// In-memory store used by the web binary and the tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    players: Vec<Player>,
    matches: Vec<GameMatch>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[GameMatch] {
        &self.matches
    }

    fn is_duplicate(&self, m: &GameMatch) -> bool {
        self.matches.iter().any(|existing| {
            existing.id == m.id
                || (existing.round == m.round
                    && existing.group == m.group
                    && existing.pair_key() == m.pair_key())
        })
    }
}

impl MatchStore for InMemoryStore {
    fn add_player(&mut self, name: &str) -> Result<Player, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(TournamentError::DuplicatePlayer);
        }
        let player = Player::new(name);
        self.players.push(player.clone());
        Ok(player)
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Player, TournamentError> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
            .ok_or(TournamentError::PlayerNotFound(player_id))
    }

    fn create_matches(
        &mut self,
        batch: Vec<GameMatch>,
    ) -> Result<Vec<GameMatch>, TournamentError> {
        let known: HashSet<PlayerId> = self.players.iter().map(|p| p.id).collect();
        for m in &batch {
            for pid in [m.player_a, m.player_b] {
                if !known.contains(&pid) {
                    return Err(TournamentError::PlayerNotFound(pid));
                }
            }
        }

        let mut inserted = Vec::with_capacity(batch.len());
        for m in batch {
            if self.is_duplicate(&m) {
                log::warn!(
                    "Skipping duplicate match {} (round {}, group {:?})",
                    m.id,
                    m.round,
                    m.group
                );
                continue;
            }
            self.matches.push(m.clone());
            inserted.push(m);
        }
        Ok(inserted)
    }

    fn find_matches(&self, filter: &MatchFilter) -> Vec<GameMatch> {
        self.matches
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }

    fn get_match(&self, match_id: MatchId) -> Result<GameMatch, TournamentError> {
        self.matches
            .iter()
            .find(|m| m.id == match_id)
            .cloned()
            .ok_or(TournamentError::MatchNotFound(match_id))
    }

    fn update_match_winner(
        &mut self,
        match_id: MatchId,
        winner: PlayerId,
        score: Option<MatchScore>,
    ) -> Result<GameMatch, TournamentError> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.decide(winner, score)?;
        Ok(m.clone())
    }

    fn increment_player_stats(
        &mut self,
        player_id: PlayerId,
        delta: StatsDelta,
    ) -> Result<(), TournamentError> {
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?
            .apply(delta);
        Ok(())
    }

    fn list_players(&self, order: PlayerOrder) -> Vec<Player> {
        let mut players = self.players.clone();
        match order {
            PlayerOrder::Created => {}
            PlayerOrder::Name => players.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then(a.id.cmp(&b.id))
            }),
            PlayerOrder::Wins => players.sort_by(|a, b| b.matches_won.cmp(&a.matches_won)),
        }
        players
    }
}
