use std::fs;
use std::path::PathBuf;

use faceit_dataset::faceit_api::{
    MatchId, PlayerId, parse_history_json, parse_match_stats_json, parse_player_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_player_fixture() {
    let raw = read_fixture("player.json");
    let id = parse_player_json(&raw).expect("fixture should parse");
    assert_eq!(id, Some(PlayerId("5a1b-s1mple".to_string())));
}

#[test]
fn parses_history_fixture() {
    let raw = read_fixture("history.json");
    let ids = parse_history_json(&raw).expect("fixture should parse");
    assert_eq!(ids, vec![MatchId::new("1-abc"), MatchId::new("1-def")]);
}

#[test]
fn parses_match_stats_fixture() {
    let raw = read_fixture("match_stats.json");
    let stats = parse_match_stats_json(&raw).expect("fixture should parse");
    assert_eq!(stats.map.as_deref(), Some("de_mirage"));
    assert_eq!(stats.teams.len(), 2);
    assert!(stats.teams.iter().all(|t| t.players.len() == 5));

    let first = &stats.teams[0].players[0];
    assert_eq!(first.player_id.as_deref(), Some("t0p0"));
    assert_eq!(first.nickname.as_deref(), Some("nick_0_0"));
    assert_eq!(first.stats.kills.as_deref(), Some("20"));
    assert_eq!(first.stats.kr_ratio.as_deref(), Some("0.85"));
    assert_eq!(first.stats.result.as_deref(), Some("1"));
}

#[test]
fn null_bodies_are_empty() {
    assert_eq!(parse_player_json("null").expect("null should parse"), None);
    assert!(
        parse_history_json("")
            .expect("empty should parse")
            .is_empty()
    );
    let stats = parse_match_stats_json("null").expect("null should parse");
    assert!(stats.teams.is_empty());
    assert!(stats.map.is_none());
}
