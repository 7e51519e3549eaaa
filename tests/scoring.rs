//! Integration tests for the point-by-point scoring state machine.

use club_tournament::{
    confirm_winner, GameMatch, InMemoryStore, MatchScore, MatchStore, PointStep, ScoreBoard,
    ScoreState, ScoringEvent, Side, TiebreakState, TournamentError,
};

fn point(side: Side, value: u8, checked: bool) -> ScoringEvent {
    ScoringEvent::Point {
        side,
        step: PointStep::try_from(value).unwrap(),
        checked,
    }
}

fn tiebreak(side: Side, slot: usize, checked: bool) -> ScoringEvent {
    ScoringEvent::Tiebreak {
        side,
        slot,
        checked,
    }
}

fn play(events: &[ScoringEvent]) -> ScoreState {
    events
        .iter()
        .try_fold(ScoreState::default(), |state, &e| state.apply(e))
        .unwrap()
}

fn deuce() -> ScoreState {
    play(&[point(Side::A, 40, true), point(Side::B, 40, true)])
}

#[test]
fn game_point_confirmable_when_opponent_below_forty() {
    let state = play(&[
        point(Side::A, 40, true),
        point(Side::A, 45, true),
        point(Side::B, 30, true),
    ]);
    assert_eq!((state.a, state.b), (45, 30));
    assert!(state.can_confirm_winner(Side::A));
    assert!(!state.can_confirm_winner(Side::B));
    assert_eq!(state.confirmable_winner(), Some(Side::A));
}

#[test]
fn game_point_against_forty_is_not_confirmable() {
    let state = deuce().apply(point(Side::A, 45, true)).unwrap();
    assert_eq!((state.a, state.b), (45, 40));
    assert!(!state.in_tiebreak());
    assert!(!state.can_confirm_winner(Side::A));
    assert!(!state.can_confirm_winner(Side::B));
}

#[test]
fn checking_a_lower_step_keeps_the_higher_value() {
    let state = play(&[point(Side::A, 40, true), point(Side::A, 15, true)]);
    assert_eq!(state.a, 40);
}

#[test]
fn unchecking_rolls_back_below_the_unchecked_step() {
    let state = play(&[point(Side::A, 40, true), point(Side::A, 30, false)]);
    assert_eq!(state.a, 15);

    let state = play(&[point(Side::B, 15, true), point(Side::B, 15, false)]);
    assert_eq!(state.b, 0);

    // unchecking a step above the current value changes nothing
    let state = play(&[point(Side::A, 15, true), point(Side::A, 40, false)]);
    assert_eq!(state.a, 15);
}

#[test]
fn forty_all_opens_the_tiebreak() {
    let state = deuce();
    assert!(state.in_tiebreak());
    assert_eq!(state.tiebreak, TiebreakState::default());
}

#[test]
fn tiebreak_slot_belongs_to_one_side() {
    let state = deuce().apply(tiebreak(Side::B, 1, true)).unwrap();
    assert!(state.tiebreak.b[1]);

    let state = state.apply(tiebreak(Side::A, 1, true)).unwrap();
    assert!(state.tiebreak.a[1]);
    assert!(!state.tiebreak.b[1]);

    let state = state.apply(tiebreak(Side::A, 1, false)).unwrap();
    assert_eq!(state.tiebreak, TiebreakState::default());
}

#[test]
fn tiebreak_toggles_need_forty_all_and_valid_slot() {
    let state = play(&[point(Side::A, 40, true)]);
    assert_eq!(
        state.apply(tiebreak(Side::A, 0, true)),
        Err(TournamentError::TiebreakInactive)
    );
    assert_eq!(
        deuce().apply(tiebreak(Side::A, 3, true)),
        Err(TournamentError::InvalidTiebreakSlot(3))
    );
}

#[test]
fn leaving_forty_all_clears_the_tiebreak() {
    let state = deuce()
        .apply(tiebreak(Side::A, 0, true))
        .unwrap()
        .apply(tiebreak(Side::B, 2, true))
        .unwrap()
        .apply(point(Side::B, 40, false))
        .unwrap();
    assert_eq!(state.b, 30);
    assert!(!state.in_tiebreak());
    assert_eq!(state.tiebreak, TiebreakState::default());

    let back = state.apply(point(Side::B, 40, true)).unwrap();
    assert!(back.in_tiebreak());
    assert_eq!(back.tiebreak, TiebreakState::default());
}

#[test]
fn tiebreak_winner_needs_two_slots_and_the_lead() {
    let level = deuce()
        .apply(tiebreak(Side::A, 0, true))
        .unwrap()
        .apply(tiebreak(Side::B, 1, true))
        .unwrap();
    assert_eq!(level.confirmable_winner(), None);

    let won = level.apply(tiebreak(Side::A, 2, true)).unwrap();
    assert!(won.can_confirm_winner(Side::A));
    assert!(!won.can_confirm_winner(Side::B));

    let clean = deuce()
        .apply(tiebreak(Side::B, 0, true))
        .unwrap()
        .apply(tiebreak(Side::B, 1, true))
        .unwrap();
    assert_eq!(clean.confirmable_winner(), Some(Side::B));
}

#[test]
fn tiebreak_stops_at_two_slots() {
    let won = deuce()
        .apply(tiebreak(Side::A, 0, true))
        .unwrap()
        .apply(tiebreak(Side::A, 1, true))
        .unwrap();
    assert_eq!(
        won.apply(tiebreak(Side::A, 2, true)),
        Err(TournamentError::TiebreakDecided)
    );
    assert_eq!(won.confirmable_winner(), Some(Side::A));

    // the other side can still take a held slot back
    let contested = won.apply(tiebreak(Side::B, 1, true)).unwrap();
    assert_eq!(contested.tiebreak.count(Side::A), 1);
    assert_eq!(contested.tiebreak.count(Side::B), 1);
    assert_eq!(contested.confirmable_winner(), None);
}

#[test]
fn tally_counts_steps_and_tiebreak_slots() {
    let state = play(&[point(Side::A, 45, true), point(Side::B, 30, true)]);
    assert_eq!(state.tally(), MatchScore::new(4, 2));

    let state = deuce()
        .apply(tiebreak(Side::A, 0, true))
        .unwrap()
        .apply(tiebreak(Side::A, 1, true))
        .unwrap()
        .apply(tiebreak(Side::B, 2, true))
        .unwrap();
    assert_eq!(state.tally(), MatchScore::new(5, 4));
}

#[test]
fn events_parse_from_json() {
    let event: ScoringEvent =
        serde_json::from_str(r#"{"kind":"point","side":"a","step":40,"checked":true}"#).unwrap();
    assert_eq!(event, point(Side::A, 40, true));

    let event: ScoringEvent =
        serde_json::from_str(r#"{"kind":"tiebreak","side":"b","slot":2,"checked":false}"#)
            .unwrap();
    assert_eq!(event, tiebreak(Side::B, 2, false));

    assert!(serde_json::from_str::<ScoringEvent>(
        r#"{"kind":"point","side":"a","step":20,"checked":true}"#
    )
    .is_err());
}

#[test]
fn scoreboard_keeps_matches_apart() {
    let first = uuid::Uuid::new_v4();
    let second = uuid::Uuid::new_v4();
    let mut board = ScoreBoard::new();

    board.apply(first, point(Side::A, 45, true)).unwrap();
    board.apply(second, point(Side::B, 15, true)).unwrap();

    assert!(board.can_confirm(first, Side::A));
    assert_eq!((board.state(second).a, board.state(second).b), (0, 15));
    board.reset(first);
    assert_eq!(board.state(first), ScoreState::default());
}

fn store_with_match() -> (InMemoryStore, GameMatch) {
    let mut store = InMemoryStore::new();
    let a = store.add_player("Alice").unwrap().id;
    let b = store.add_player("Bob").unwrap().id;
    let m = store
        .create_matches(vec![GameMatch::new(a, b, 1, Some("A"))])
        .unwrap()
        .remove(0);
    (store, m)
}

#[test]
fn confirm_winner_finalizes_with_tally() {
    let (mut store, m) = store_with_match();
    let mut board = ScoreBoard::new();
    board.apply(m.id, point(Side::B, 45, true)).unwrap();
    board.apply(m.id, point(Side::A, 15, true)).unwrap();

    let decided = confirm_winner(&mut store, &mut board, m.id, Side::B).unwrap();
    assert_eq!(decided.winner, Some(m.player_b));
    assert_eq!(decided.score, Some(MatchScore::new(1, 4)));
    assert_eq!(board.state(m.id), ScoreState::default());

    let winner = store.get_player(m.player_b).unwrap();
    let loser = store.get_player(m.player_a).unwrap();
    assert_eq!((winner.matches_won, winner.matches_played), (1, 1));
    assert_eq!((loser.matches_lost, loser.matches_played), (1, 1));
}

#[test]
fn confirm_winner_refuses_unfinished_game() {
    let (mut store, m) = store_with_match();
    let mut board = ScoreBoard::new();
    board.apply(m.id, point(Side::A, 40, true)).unwrap();

    assert_eq!(
        confirm_winner(&mut store, &mut board, m.id, Side::A),
        Err(TournamentError::WinnerNotConfirmable)
    );
    assert!(!store.get_match(m.id).unwrap().is_decided());
    assert_eq!(board.state(m.id).a, 40);
}
