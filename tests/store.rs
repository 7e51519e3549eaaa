//! Integration tests for the in-memory store and match finalization.

use club_tournament::{
    finalize_match, GameMatch, InMemoryStore, MatchFilter, MatchStore, PlayerOrder,
    TournamentError,
};
use uuid::Uuid;

#[test]
fn player_names_are_unique_and_trimmed() {
    let mut store = InMemoryStore::new();
    let ada = store.add_player("  Ada ").unwrap();
    assert_eq!(ada.name, "Ada");
    assert_eq!(store.add_player("ADA"), Err(TournamentError::DuplicatePlayer));
    assert_eq!(store.add_player("   "), Err(TournamentError::EmptyPlayerName));
}

#[test]
fn list_players_orders() {
    let mut store = InMemoryStore::new();
    for name in ["carol", "Alice", "bob"] {
        store.add_player(name).unwrap();
    }
    let by_name: Vec<String> = store
        .list_players(PlayerOrder::Name)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(by_name, vec!["Alice", "bob", "carol"]);

    let created: Vec<String> = store
        .list_players(PlayerOrder::Created)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(created, vec!["carol", "Alice", "bob"]);
}

#[test]
fn create_matches_skips_duplicates() {
    let mut store = InMemoryStore::new();
    let a = store.add_player("A").unwrap().id;
    let b = store.add_player("B").unwrap().id;

    let m = GameMatch::new(a, b, 1, Some("A"));
    let inserted = store
        .create_matches(vec![m.clone(), m.clone(), GameMatch::new(b, a, 1, Some("A"))])
        .unwrap();
    assert_eq!(inserted, vec![m]);

    // same pair in another round is a different match
    let later = store
        .create_matches(vec![GameMatch::new(b, a, 2, None)])
        .unwrap();
    assert_eq!(later.len(), 1);
    assert_eq!(store.matches().len(), 2);
}

#[test]
fn create_matches_rejects_unknown_players() {
    let mut store = InMemoryStore::new();
    let a = store.add_player("A").unwrap().id;
    let ghost = Uuid::new_v4();
    assert_eq!(
        store.create_matches(vec![GameMatch::new(a, ghost, 1, None)]),
        Err(TournamentError::PlayerNotFound(ghost))
    );
    assert!(store.matches().is_empty());
}

#[test]
fn find_matches_filters() {
    let mut store = InMemoryStore::new();
    let ids: Vec<_> = ["A", "B", "C", "D"]
        .iter()
        .map(|n| store.add_player(n).unwrap().id)
        .collect();
    let created = store
        .create_matches(vec![
            GameMatch::new(ids[0], ids[1], 1, Some("A")),
            GameMatch::new(ids[2], ids[3], 1, Some("B")),
            GameMatch::new(ids[0], ids[2], 2, Some("SF")),
        ])
        .unwrap();
    finalize_match(&mut store, created[1].id, ids[3], None).unwrap();

    assert_eq!(store.find_matches(&MatchFilter::default()).len(), 3);
    assert_eq!(store.find_matches(&MatchFilter::round(1)).len(), 2);
    assert_eq!(store.find_matches(&MatchFilter::round_group(2, "SF")).len(), 1);
    let decided = store.find_matches(&MatchFilter {
        winner_set: Some(true),
        ..MatchFilter::default()
    });
    assert_eq!(decided.len(), 1);
    assert_eq!(decided[0].id, created[1].id);
    let open = store.find_matches(&MatchFilter {
        round: Some(1),
        winner_set: Some(false),
        ..MatchFilter::default()
    });
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, created[0].id);
}

#[test]
fn finalize_updates_counters_exactly_once() {
    let mut store = InMemoryStore::new();
    let a = store.add_player("A").unwrap().id;
    let b = store.add_player("B").unwrap().id;
    let m = store
        .create_matches(vec![GameMatch::new(a, b, 1, None)])
        .unwrap()
        .remove(0);

    let decided = finalize_match(&mut store, m.id, a, None).unwrap();
    assert_eq!(decided.winner, Some(a));
    assert_eq!(decided.loser(), Some(b));

    assert_eq!(
        finalize_match(&mut store, m.id, b, None),
        Err(TournamentError::MatchAlreadyDecided(m.id))
    );

    let pa = store.get_player(a).unwrap();
    let pb = store.get_player(b).unwrap();
    assert_eq!((pa.matches_played, pa.matches_won, pa.matches_lost), (1, 1, 0));
    assert_eq!((pb.matches_played, pb.matches_won, pb.matches_lost), (1, 0, 1));
}

#[test]
fn finalize_rejects_outsiders_and_missing_matches() {
    let mut store = InMemoryStore::new();
    let a = store.add_player("A").unwrap().id;
    let b = store.add_player("B").unwrap().id;
    let c = store.add_player("C").unwrap().id;
    let m = store
        .create_matches(vec![GameMatch::new(a, b, 1, None)])
        .unwrap()
        .remove(0);

    assert_eq!(
        finalize_match(&mut store, m.id, c, None),
        Err(TournamentError::InvalidWinner {
            match_id: m.id,
            player_id: c
        })
    );
    let missing = Uuid::new_v4();
    assert_eq!(
        finalize_match(&mut store, missing, a, None),
        Err(TournamentError::MatchNotFound(missing))
    );
    assert!(TournamentError::MatchNotFound(missing).is_not_found());
    assert!(store.players().iter().all(|p| p.matches_played == 0));
}
