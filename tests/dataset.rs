use std::fs;

use faceit_dataset::dataset::{COLUMNS, write_dataset};
use faceit_dataset::faceit_api::MatchId;
use faceit_dataset::features::PlayerPerformance;

fn row(player: &str, kr: f64) -> PlayerPerformance {
    PlayerPerformance {
        player_id: player.to_string(),
        nickname: format!("{player}_nick"),
        team_id: 1,
        player_kd_ratio: 1.5,
        player_kr_ratio: kr,
        kills: 18,
        deaths: 12,
        assists: 4,
        headshots_percent: 50.0,
        team_win: 0,
        avg_teammate_kr: 0.5,
        avg_opponent_kr: 0.25,
        match_id: MatchId::new("1-xyz"),
        map: "de_inferno".to_string(),
    }
}

#[test]
fn creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("out.csv");
    let written = write_dataset(&path, &[row("a", 0.9)]).unwrap();
    assert_eq!(written, 1);
    assert!(path.exists());
}

#[test]
fn rows_follow_header_in_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write_dataset(&path, &[row("a", 0.9), row("b", 0.5)]).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COLUMNS.join(","));
    assert_eq!(
        lines[1],
        "a,a_nick,1,1.5,0.9,18,12,4,50.0,0,0.5,0.25,1-xyz,de_inferno,1"
    );
    assert!(lines[2].starts_with("b,b_nick,1,1.5,0.5,"));
    assert!(lines[2].ends_with(",0"));
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    fs::write(&path, "stale contents\nmore stale\nand more\nand more\n").unwrap();

    write_dataset(&path, &[row("a", 0.1)]).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("stale"));
    assert_eq!(raw.lines().count(), 2);
}

#[test]
fn unwritable_destination_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("out.csv");
    assert!(write_dataset(&path, &[row("a", 0.1)]).is_err());
}
