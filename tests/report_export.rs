use std::fs;

use nba_impact::dataset::{Dataset, PlayerRecord, Position};
use nba_impact::report_export::export_report;

fn player(idx: usize) -> PlayerRecord {
    PlayerRecord {
        name: format!("Player {idx}"),
        position: Position::ALL[idx % Position::ALL.len()],
        team: if idx % 2 == 0 { "Team Even" } else { "Team Odd" }.to_string(),
        games: 60 + idx as u32,
        minutes: 20.0 + idx as f64,
        points: 8.0 + idx as f64 * 2.0,
        rebounds: 3.0 + idx as f64,
        assists: 2.0 + idx as f64,
        steals: 0.5 + idx as f64 * 0.2,
        blocks: 0.2 + idx as f64 * 0.3,
        attempts: 10.0 + idx as f64 * 2.0,
        efg: 0.45 + idx as f64 * 0.02,
    }
}

#[test]
fn export_writes_workbook_with_all_views() {
    let dataset = Dataset::new((0..6).map(player).collect());
    let path = std::env::temp_dir().join(format!("player_report_{}.xlsx", std::process::id()));

    let report = export_report(&path, &dataset, None).expect("export should succeed");

    assert_eq!(report.players, 6);
    // Five selectable statistics, all six players make each board.
    assert_eq!(report.leader_rows, 30);
    assert_eq!(report.profile_rows, 6);
    // Four records clear the volume threshold, plus the median row.
    assert_eq!(report.quadrant_rows, 5);
    assert!(path.exists());

    let _ = fs::remove_file(&path);
}

#[test]
fn export_handles_empty_subset() {
    let dataset = Dataset::new((0..6).map(player).collect());
    let path = std::env::temp_dir().join(format!("player_report_empty_{}.xlsx", std::process::id()));

    let report = export_report(&path, &dataset, Some("Ghost Team")).expect("export should succeed");

    assert_eq!(report.players, 0);
    assert_eq!(report.leader_rows, 0);
    assert_eq!(report.profile_rows, 0);
    // Only the "insufficient data" note.
    assert_eq!(report.quadrant_rows, 1);

    let _ = fs::remove_file(&path);
}
