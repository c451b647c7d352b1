use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::faceit_api::MatchId;
use crate::features::PlayerPerformance;

pub const OUTPUT_DIR: &str = "./data";
pub const OUTPUT_FILE: &str = "faceit_match_data_v2.csv";

/// K/R ratio a player must beat to count as having performed well.
pub const PERFORMED_WELL_KR: f64 = 0.7;

pub const COLUMNS: [&str; 15] = [
    "player_id",
    "nickname",
    "team_id",
    "player_kd_ratio",
    "player_kr_ratio",
    "kills",
    "deaths",
    "assists",
    "headshots_percent",
    "team_win",
    "avg_teammate_kr",
    "avg_opponent_kr",
    "match_id",
    "map",
    "performed_well",
];

pub fn default_output_path() -> PathBuf {
    PathBuf::from(OUTPUT_DIR).join(OUTPUT_FILE)
}

pub fn performed_well(row: &PlayerPerformance) -> u8 {
    u8::from(row.player_kr_ratio > PERFORMED_WELL_KR)
}

#[derive(Debug, Serialize)]
struct LabeledRecord<'a> {
    player_id: &'a str,
    nickname: &'a str,
    team_id: u8,
    player_kd_ratio: f64,
    player_kr_ratio: f64,
    kills: i64,
    deaths: i64,
    assists: i64,
    headshots_percent: f64,
    team_win: u8,
    avg_teammate_kr: f64,
    avg_opponent_kr: f64,
    match_id: &'a MatchId,
    map: &'a str,
    performed_well: u8,
}

impl<'a> From<&'a PlayerPerformance> for LabeledRecord<'a> {
    fn from(row: &'a PlayerPerformance) -> Self {
        Self {
            player_id: &row.player_id,
            nickname: &row.nickname,
            team_id: row.team_id,
            player_kd_ratio: row.player_kd_ratio,
            player_kr_ratio: row.player_kr_ratio,
            kills: row.kills,
            deaths: row.deaths,
            assists: row.assists,
            headshots_percent: row.headshots_percent,
            team_win: row.team_win,
            avg_teammate_kr: row.avg_teammate_kr,
            avg_opponent_kr: row.avg_opponent_kr,
            match_id: &row.match_id,
            map: &row.map,
            performed_well: performed_well(row),
        }
    }
}

/// Writes every row plus the `performed_well` label to `path`, replacing
/// any existing file. The header is written even when `rows` is empty.
pub fn write_dataset(path: &Path, rows: &[PlayerPerformance]) -> Result<usize> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("create output dir {}", dir.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create output csv {}", path.display()))?;
    writer.write_record(COLUMNS).context("write csv header")?;
    for row in rows {
        writer
            .serialize(LabeledRecord::from(row))
            .with_context(|| format!("write row for match {}", row.match_id))?;
    }
    writer.flush().context("flush output csv")?;
    Ok(rows.len())
}
