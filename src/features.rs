use crate::faceit_api::{MatchId, MatchStats, RawPlayerStats};

/// Players a match must yield to be kept (two teams of five).
pub const PLAYERS_PER_MATCH: usize = 10;
pub const TEAMS_PER_MATCH: usize = 2;

/// One player's line in one match, before the dataset label is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPerformance {
    pub player_id: String,
    pub nickname: String,
    pub team_id: u8,
    pub player_kd_ratio: f64,
    pub player_kr_ratio: f64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub headshots_percent: f64,
    pub team_win: u8,
    pub avg_teammate_kr: f64,
    pub avg_opponent_kr: f64,
    pub match_id: MatchId,
    pub map: String,
}

/// Flattens one match into rows with teammate/opponent K/R context.
///
/// Returns no rows unless the payload has a map name, exactly
/// [`TEAMS_PER_MATCH`] teams and exactly [`PLAYERS_PER_MATCH`] players.
/// `team_id` is the team's position in the payload.
pub fn engineer_match(match_id: &MatchId, stats: &MatchStats) -> Vec<PlayerPerformance> {
    let Some(map) = stats.map.as_deref().filter(|m| !m.is_empty()) else {
        return Vec::new();
    };
    if stats.teams.len() != TEAMS_PER_MATCH {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(PLAYERS_PER_MATCH);
    for (team_idx, team) in stats.teams.iter().enumerate() {
        let team_id = team_idx as u8;
        for line in &team.players {
            rows.push(base_row(
                line.player_id.as_deref().unwrap_or_default(),
                line.nickname.as_deref().unwrap_or_default(),
                team_id,
                &line.stats,
                match_id,
                map,
            ));
        }
    }
    if rows.len() != PLAYERS_PER_MATCH {
        return Vec::new();
    }

    let kr_by_team: Vec<(u8, f64)> = rows.iter().map(|r| (r.team_id, r.player_kr_ratio)).collect();
    for (idx, row) in rows.iter_mut().enumerate() {
        let own_team = row.team_id;
        let teammates = kr_by_team
            .iter()
            .enumerate()
            .filter(|(other, (team, _))| *other != idx && *team == own_team)
            .map(|(_, (_, kr))| *kr);
        row.avg_teammate_kr = mean(teammates);
        let opponents = kr_by_team
            .iter()
            .filter(|(team, _)| *team != own_team)
            .map(|(_, kr)| *kr);
        row.avg_opponent_kr = mean(opponents);
    }
    rows
}

fn base_row(
    player_id: &str,
    nickname: &str,
    team_id: u8,
    stats: &RawPlayerStats,
    match_id: &MatchId,
    map: &str,
) -> PlayerPerformance {
    PlayerPerformance {
        player_id: player_id.to_string(),
        nickname: nickname.to_string(),
        team_id,
        player_kd_ratio: stat_f64(stats.kd_ratio.as_deref()),
        player_kr_ratio: stat_f64(stats.kr_ratio.as_deref()),
        kills: stat_i64(stats.kills.as_deref()),
        deaths: stat_i64(stats.deaths.as_deref()),
        assists: stat_i64(stats.assists.as_deref()),
        headshots_percent: stat_f64(stats.headshots_percent.as_deref()),
        team_win: u8::from(stats.result.as_deref() == Some("1")),
        avg_teammate_kr: 0.0,
        avg_opponent_kr: 0.0,
        match_id: match_id.clone(),
        map: map.to_string(),
    }
}

/// Absent or unparsable values read as 0.0.
pub fn stat_f64(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Absent or unparsable values read as 0; "20.0" truncates to 20.
pub fn stat_i64(raw: Option<&str>) -> i64 {
    let Some(s) = raw.map(str::trim) else {
        return 0;
    };
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
