use nba_impact::dataset::{PlayerRecord, Position, Statistic};
use nba_impact::leaderboard::{DEFAULT_LEADERBOARD_SIZE, LEADERBOARD_STATS, top_k};

fn player(name: &str, points: f64) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        position: Position::Forward,
        team: "Test Team".to_string(),
        games: 70,
        minutes: 30.0,
        points,
        rebounds: 5.0,
        assists: 4.0,
        steals: 1.0,
        blocks: 0.5,
        attempts: 15.0,
        efg: 0.55,
    }
}

#[test]
fn output_is_bounded_by_k_and_input() {
    let records: Vec<PlayerRecord> = (0..15)
        .map(|i| player(&format!("Player {i}"), i as f64))
        .collect();

    assert_eq!(
        top_k(&records, Statistic::Points, DEFAULT_LEADERBOARD_SIZE).len(),
        DEFAULT_LEADERBOARD_SIZE
    );
    assert_eq!(top_k(&records[..4], Statistic::Points, 10).len(), 4);
    assert_eq!(top_k(&records, Statistic::Points, 3).len(), 3);

    for stat in LEADERBOARD_STATS {
        let board = top_k(&records, stat, DEFAULT_LEADERBOARD_SIZE);
        assert!(board.len() <= DEFAULT_LEADERBOARD_SIZE.min(records.len()));
    }
}

#[test]
fn values_are_non_increasing() {
    let records = vec![
        player("A", 12.0),
        player("B", 31.5),
        player("C", 8.2),
        player("D", 31.5),
        player("E", 19.9),
    ];
    let board = top_k(&records, Statistic::Points, 10);
    for pair in board.windows(2) {
        assert!(Statistic::Points.value(&pair[0]) >= Statistic::Points.value(&pair[1]));
    }
}

#[test]
fn ties_keep_source_order() {
    let records = vec![
        player("First", 20.0),
        player("Second", 25.0),
        player("Third", 20.0),
        player("Fourth", 20.0),
    ];
    let board = top_k(&records, Statistic::Points, 10);
    let names: Vec<&str> = board.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "First", "Third", "Fourth"]);
}

#[test]
fn empty_input_yields_empty_board() {
    assert!(top_k(&[], Statistic::Points, DEFAULT_LEADERBOARD_SIZE).is_empty());
}

#[test]
fn ranks_by_the_chosen_statistic() {
    let mut rim_protector = player("Rim Protector", 10.0);
    rim_protector.blocks = 2.5;
    let mut scorer = player("Scorer", 20.0);
    scorer.blocks = 0.1;

    let board = top_k(&[rim_protector, scorer], Statistic::Blocks, 1);
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "Rim Protector");
}
