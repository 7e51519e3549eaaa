//! Integration tests for the club leaderboard.

use club_tournament::{
    build_leaderboard, club_leaderboard, finalize_match, GameMatch, InMemoryStore, MatchScore,
    MatchStore, Player, PlayerId,
};

fn player(name: &str, won: u32) -> Player {
    let mut p = Player::new(name);
    p.matches_won = won;
    p.matches_played = won;
    p
}

fn scored(a: PlayerId, b: PlayerId, score: Option<MatchScore>) -> GameMatch {
    let mut m = GameMatch::new(a, b, 1, None);
    m.decide(a, score).unwrap();
    m
}

fn names(entries: &[club_tournament::LeaderboardEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn ranks_by_wins_then_score() {
    let players = vec![player("Ada", 1), player("Ben", 3), player("Cy", 1)];
    let (ada, cy) = (players[0].id, players[2].id);
    let matches = vec![
        scored(cy, ada, Some(MatchScore::new(4, 2))),
        scored(ada, cy, Some(MatchScore::new(4, 1))),
    ];

    let board = build_leaderboard(&players, &matches);
    assert_eq!(names(&board), vec!["Ben", "Ada", "Cy"]);
    assert_eq!(board[1].total_score, 6);
    assert_eq!(board[2].total_score, 5);
}

#[test]
fn unscored_matches_add_nothing_and_ties_keep_listing_order() {
    let players = vec![player("Ada", 2), player("Ben", 2), player("Cy", 0)];
    let matches = vec![scored(players[0].id, players[1].id, None)];

    let board = build_leaderboard(&players, &matches);
    assert_eq!(names(&board), vec!["Ada", "Ben", "Cy"]);
    assert!(board.iter().all(|e| e.total_score == 0));
}

#[test]
fn club_leaderboard_reads_persisted_counters() {
    let mut store = InMemoryStore::new();
    let ada = store.add_player("Ada").unwrap().id;
    let ben = store.add_player("Ben").unwrap().id;
    let m = store
        .create_matches(vec![GameMatch::new(ada, ben, 1, None)])
        .unwrap()
        .remove(0);
    finalize_match(&mut store, m.id, ben, Some(MatchScore::new(2, 4))).unwrap();

    let board = club_leaderboard(&store);
    assert_eq!(names(&board), vec!["Ben", "Ada"]);
    assert_eq!((board[0].matches_won, board[0].total_score), (1, 4));
    assert_eq!((board[1].matches_lost, board[1].total_score), (1, 2));
}
