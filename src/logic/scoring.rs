//! Point-by-point game scoring driven by checkbox toggles, with a short tiebreak at 40-40.
//!
//! Each side shows point steps 15, 30, 40 and 45 (45 = game won outright). When both
//! sides sit at 40 the game switches to a tiebreak of three slots, each owned by at
//! most one side. The machine only says *when* a winner may be confirmed; recording
//! the result goes through [`finalize_match`].

use crate::logic::results::finalize_match;
use crate::models::{GameMatch, MatchId, MatchScore, Side, TournamentError};
use crate::store::MatchStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of tiebreak point slots per side.
pub const TIEBREAK_SLOTS: usize = 3;
/// Slots a side must hold to take the tiebreak.
pub const TIEBREAK_TARGET: usize = 2;

/// One checkbox step on a side's point row.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PointStep {
    Fifteen,
    Thirty,
    Forty,
    Game,
}

impl PointStep {
    pub const ALL: [PointStep; 4] = [
        PointStep::Fifteen,
        PointStep::Thirty,
        PointStep::Forty,
        PointStep::Game,
    ];

    pub fn value(self) -> u8 {
        match self {
            PointStep::Fifteen => 15,
            PointStep::Thirty => 30,
            PointStep::Forty => 40,
            PointStep::Game => 45,
        }
    }

    /// Highest step strictly below this one, as a displayed value (0 below 15).
    fn value_below(self) -> u8 {
        PointStep::ALL
            .iter()
            .rev()
            .map(|s| s.value())
            .find(|&v| v < self.value())
            .unwrap_or(0)
    }
}

impl TryFrom<u8> for PointStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            15 => Ok(PointStep::Fifteen),
            30 => Ok(PointStep::Thirty),
            40 => Ok(PointStep::Forty),
            45 => Ok(PointStep::Game),
            other => Err(format!("{} is not a point step (15, 30, 40, 45)", other)),
        }
    }
}

impl From<PointStep> for u8 {
    fn from(step: PointStep) -> Self {
        step.value()
    }
}

/// Tiebreak slots per side. A slot is owned by at most one side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TiebreakState {
    pub a: [bool; TIEBREAK_SLOTS],
    pub b: [bool; TIEBREAK_SLOTS],
}

impl TiebreakState {
    pub fn count(&self, side: Side) -> usize {
        self.slots(side).iter().filter(|&&s| s).count()
    }

    pub fn slots(&self, side: Side) -> &[bool; TIEBREAK_SLOTS] {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    fn slots_mut(&mut self, side: Side) -> &mut [bool; TIEBREAK_SLOTS] {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}

/// Score of one game: displayed values (0, 15, 30, 40, 45) per side plus tiebreak slots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub a: u8,
    pub b: u8,
    pub tiebreak: TiebreakState,
}

/// A checkbox toggle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringEvent {
    /// Point step checkbox on a side's row.
    Point {
        side: Side,
        step: PointStep,
        checked: bool,
    },
    /// Tiebreak slot checkbox (index 0..3) on a side's row.
    Tiebreak {
        side: Side,
        slot: usize,
        checked: bool,
    },
}

impl ScoreState {
    pub fn value(&self, side: Side) -> u8 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    fn value_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Both sides at 40.
    pub fn in_tiebreak(&self) -> bool {
        self.a == PointStep::Forty.value() && self.b == PointStep::Forty.value()
    }

    /// Produce the state after `event`. `self` is left untouched.
    pub fn apply(&self, event: ScoringEvent) -> Result<ScoreState, TournamentError> {
        let mut next = *self;
        match event {
            ScoringEvent::Point {
                side,
                step,
                checked,
            } => {
                let value = next.value_mut(side);
                if checked {
                    if *value < step.value() {
                        *value = step.value();
                    }
                } else if *value >= step.value() {
                    *value = step.value_below();
                }
                if !next.in_tiebreak() {
                    next.tiebreak = TiebreakState::default();
                }
            }
            ScoringEvent::Tiebreak {
                side,
                slot,
                checked,
            } => {
                if slot >= TIEBREAK_SLOTS {
                    return Err(TournamentError::InvalidTiebreakSlot(slot));
                }
                if !next.in_tiebreak() {
                    return Err(TournamentError::TiebreakInactive);
                }
                let held = next.tiebreak.slots(side)[slot];
                if checked && !held && next.tiebreak.count(side) >= TIEBREAK_TARGET {
                    return Err(TournamentError::TiebreakDecided);
                }
                next.tiebreak.slots_mut(side)[slot] = checked;
                if checked {
                    next.tiebreak.slots_mut(side.opponent())[slot] = false;
                }
            }
        }
        Ok(next)
    }

    /// Whether `side` may be confirmed as the winner right now.
    pub fn can_confirm_winner(&self, side: Side) -> bool {
        if self.in_tiebreak() {
            let own = self.tiebreak.count(side);
            let other = self.tiebreak.count(side.opponent());
            return own > other && own == TIEBREAK_TARGET;
        }
        self.value(side) == PointStep::Game.value()
            && self.value(side.opponent()) < PointStep::Forty.value()
    }

    /// The side that may currently be confirmed, if any.
    pub fn confirmable_winner(&self) -> Option<Side> {
        [Side::A, Side::B]
            .into_iter()
            .find(|&side| self.can_confirm_winner(side))
    }

    /// Numeric tally: one point per step reached plus tiebreak slots held.
    pub fn tally(&self) -> MatchScore {
        let points = |side: Side| {
            let steps = PointStep::ALL
                .iter()
                .filter(|s| s.value() <= self.value(side))
                .count();
            (steps + self.tiebreak.count(side)) as u32
        };
        MatchScore::new(points(Side::A), points(Side::B))
    }
}

/// Live scores of every match being scored, keyed by match id. Owned by the caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    states: HashMap<MatchId, ScoreState>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a match (0-0 if never touched).
    pub fn state(&self, match_id: MatchId) -> ScoreState {
        self.states.get(&match_id).copied().unwrap_or_default()
    }

    /// Apply a toggle to one match; other matches are unaffected.
    pub fn apply(
        &mut self,
        match_id: MatchId,
        event: ScoringEvent,
    ) -> Result<ScoreState, TournamentError> {
        let next = self.state(match_id).apply(event)?;
        self.states.insert(match_id, next);
        log::debug!("Match {} score now {:?}", match_id, next);
        Ok(next)
    }

    pub fn can_confirm(&self, match_id: MatchId, side: Side) -> bool {
        self.state(match_id).can_confirm_winner(side)
    }

    pub fn reset(&mut self, match_id: MatchId) {
        self.states.remove(&match_id);
    }
}

/// Confirm `side` as winner of a match being scored and finalize it in the store.
pub fn confirm_winner<S: MatchStore + ?Sized>(
    store: &mut S,
    board: &mut ScoreBoard,
    match_id: MatchId,
    side: Side,
) -> Result<GameMatch, TournamentError> {
    let state = board.state(match_id);
    if !state.can_confirm_winner(side) {
        return Err(TournamentError::WinnerNotConfirmable);
    }
    let m = store.get_match(match_id)?;
    let decided = finalize_match(store, match_id, m.player(side), Some(state.tally()))?;
    board.reset(match_id);
    Ok(decided)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_below_steps_down_one() {
        assert_eq!(PointStep::Fifteen.value_below(), 0);
        assert_eq!(PointStep::Thirty.value_below(), 15);
        assert_eq!(PointStep::Forty.value_below(), 30);
        assert_eq!(PointStep::Game.value_below(), 40);
    }

    #[test]
    fn point_step_rejects_unknown_values() {
        assert!(PointStep::try_from(20).is_err());
        assert_eq!(PointStep::try_from(40), Ok(PointStep::Forty));
    }
}
