use std::fmt;

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::FetchError;
use crate::http_client::http_client;

const ERROR_SNIPPET_CHARS: usize = 220;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First round of a match stats payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStats {
    pub map: Option<String>,
    pub teams: Vec<TeamStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerStatLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerStatLine {
    #[serde(default, deserialize_with = "lenient_string")]
    pub player_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nickname: Option<String>,
    #[serde(rename = "player_stats", default, deserialize_with = "null_as_default")]
    pub stats: RawPlayerStats,
}

/// Stat values exactly as the platform reports them. FACEIT sends these as
/// strings, but numbers are accepted too. `Result` only counts as text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPlayerStats {
    #[serde(rename = "K/D Ratio", default, deserialize_with = "lenient_string")]
    pub kd_ratio: Option<String>,
    #[serde(rename = "K/R Ratio", default, deserialize_with = "lenient_string")]
    pub kr_ratio: Option<String>,
    #[serde(rename = "Kills", default, deserialize_with = "lenient_string")]
    pub kills: Option<String>,
    #[serde(rename = "Deaths", default, deserialize_with = "lenient_string")]
    pub deaths: Option<String>,
    #[serde(rename = "Assists", default, deserialize_with = "lenient_string")]
    pub assists: Option<String>,
    #[serde(rename = "Headshots %", default, deserialize_with = "lenient_string")]
    pub headshots_percent: Option<String>,
    #[serde(rename = "Result", default, deserialize_with = "text_only")]
    pub result: Option<String>,
}

/// The three read-only endpoints the collector needs.
pub trait FaceitApi {
    fn player_id(&self, handle: &str) -> Result<Option<PlayerId>, FetchError>;
    fn match_history(&self, player: &PlayerId, limit: u32) -> Result<Vec<MatchId>, FetchError>;
    fn match_stats(&self, match_id: &MatchId) -> Result<MatchStats, FetchError>;
}

impl<T: FaceitApi + ?Sized> FaceitApi for &T {
    fn player_id(&self, handle: &str) -> Result<Option<PlayerId>, FetchError> {
        (**self).player_id(handle)
    }

    fn match_history(&self, player: &PlayerId, limit: u32) -> Result<Vec<MatchId>, FetchError> {
        (**self).match_history(player, limit)
    }

    fn match_stats(&self, match_id: &MatchId) -> Result<MatchStats, FetchError> {
        (**self).match_stats(match_id)
    }
}

pub struct FaceitClient {
    client: Client,
    base_url: Url,
    api_key: String,
    game: String,
}

impl FaceitClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        Self::with_client(cfg, http_client()?.clone())
    }

    pub fn with_client(cfg: &Config, client: Client) -> Result<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .with_context(|| format!("invalid api base url {}", cfg.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("api base url {} cannot carry a path", cfg.base_url));
        }
        Ok(Self {
            client,
            base_url,
            api_key: cfg.api_key.clone(),
            game: cfg.game.clone(),
        })
    }

    /// Appends each segment to the base path, percent-encoding as needed.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_text(&self, url: Url, query: &[(&str, String)]) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.api_key)
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            let snippet = body
                .trim()
                .replace(['\n', '\r'], " ")
                .chars()
                .take(ERROR_SNIPPET_CHARS)
                .collect::<String>();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: snippet,
            });
        }
        Ok(body)
    }
}

impl FaceitApi for FaceitClient {
    fn player_id(&self, handle: &str) -> Result<Option<PlayerId>, FetchError> {
        let url = self.endpoint(&["players"]);
        let body = self.get_text(url, &[("nickname", handle.to_string())])?;
        parse_player_json(&body)
    }

    fn match_history(&self, player: &PlayerId, limit: u32) -> Result<Vec<MatchId>, FetchError> {
        let url = self.endpoint(&["players", player.0.as_str(), "history"]);
        let body = self.get_text(
            url,
            &[
                ("game", self.game.clone()),
                ("offset", "0".to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        parse_history_json(&body)
    }

    fn match_stats(&self, match_id: &MatchId) -> Result<MatchStats, FetchError> {
        let url = self.endpoint(&["matches", match_id.0.as_str(), "stats"]);
        let body = self.get_text(url, &[])?;
        parse_match_stats_json(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    #[serde(default)]
    player_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
struct HistoryItem {
    #[serde(default)]
    match_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchStatsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    rounds: Vec<RoundStats>,
}

#[derive(Debug, Deserialize)]
struct RoundStats {
    #[serde(default, deserialize_with = "null_as_default")]
    round_stats: RoundInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    teams: Vec<TeamStats>,
}

#[derive(Debug, Default, Deserialize)]
struct RoundInfo {
    #[serde(rename = "Map", default)]
    map: Option<String>,
}

pub fn parse_player_json(raw: &str) -> Result<Option<PlayerId>, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let resp: PlayerResponse = serde_json::from_str(trimmed)?;
    Ok(resp
        .player_id
        .filter(|id| !id.trim().is_empty())
        .map(PlayerId))
}

pub fn parse_history_json(raw: &str) -> Result<Vec<MatchId>, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let resp: HistoryResponse = serde_json::from_str(trimmed)?;
    Ok(resp
        .items
        .into_iter()
        .filter_map(|item| item.match_id)
        .filter(|id| !id.is_empty())
        .map(MatchId)
        .collect())
}

pub fn parse_match_stats_json(raw: &str) -> Result<MatchStats, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(MatchStats::default());
    }
    let resp: MatchStatsResponse = serde_json::from_str(trimmed)?;
    let Some(first) = resp.rounds.into_iter().next() else {
        return Ok(MatchStats::default());
    };
    Ok(MatchStats {
        map: first.round_stats.map,
        teams: first.teams,
    })
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text_only<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_without_id_is_absent() {
        assert_eq!(parse_player_json(r#"{"nickname":"x"}"#).unwrap(), None);
        assert_eq!(parse_player_json("null").unwrap(), None);
        assert_eq!(
            parse_player_json(r#"{"player_id":"p-1"}"#).unwrap(),
            Some(PlayerId("p-1".to_string()))
        );
    }

    #[test]
    fn history_skips_items_without_match_id() {
        let ids =
            parse_history_json(r#"{"items":[{"match_id":"m1"},{"status":"x"},{"match_id":"m2"}]}"#)
                .unwrap();
        assert_eq!(ids, vec![MatchId::new("m1"), MatchId::new("m2")]);
        assert!(parse_history_json(r#"{"items":null}"#).unwrap().is_empty());
    }

    #[test]
    fn stats_without_rounds_are_empty() {
        assert_eq!(
            parse_match_stats_json(r#"{"rounds":[]}"#).unwrap(),
            MatchStats::default()
        );
        assert_eq!(
            parse_match_stats_json(r#"{"rounds":null}"#).unwrap(),
            MatchStats::default()
        );
    }

    #[test]
    fn numeric_stats_are_accepted_as_text() {
        let raw = r#"{"rounds":[{"round_stats":{"Map":"de_nuke"},"teams":[
            {"players":[{"player_id":"a","player_stats":{"Kills":17,"K/R Ratio":0.5,"Result":"0"}}]}
        ]}]}"#;
        let stats = parse_match_stats_json(raw).unwrap();
        assert_eq!(stats.map.as_deref(), Some("de_nuke"));
        let line = &stats.teams[0].players[0];
        assert_eq!(line.stats.kills.as_deref(), Some("17"));
        assert_eq!(line.stats.kr_ratio.as_deref(), Some("0.5"));
        assert_eq!(line.stats.deaths, None);
    }

    #[test]
    fn every_team_is_kept() {
        let raw = r#"{"rounds":[{"round_stats":{"Map":"m"},"teams":[{"players":[]},{"players":[]},{"players":[]}]}]}"#;
        assert_eq!(parse_match_stats_json(raw).unwrap().teams.len(), 3);
    }

    #[test]
    fn numeric_result_is_not_a_win_flag() {
        let raw = r#"{"rounds":[{"round_stats":{"Map":"m"},"teams":[
            {"players":[{"player_id":"a","player_stats":{"Result":1}}]}
        ]}]}"#;
        let stats = parse_match_stats_json(raw).unwrap();
        assert_eq!(stats.teams[0].players[0].stats.result, None);
    }

    #[test]
    fn numeric_player_fields_are_read_as_text() {
        let raw = r#"{"rounds":[{"round_stats":{"Map":"m"},"teams":[
            {"players":[{"player_id":7,"nickname":42,"player_stats":{"Kills":"3"}}]}
        ]}]}"#;
        let line = &parse_match_stats_json(raw).unwrap().teams[0].players[0];
        assert_eq!(line.player_id.as_deref(), Some("7"));
        assert_eq!(line.nickname.as_deref(), Some("42"));
        assert_eq!(line.stats.kills.as_deref(), Some("3"));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(
            parse_history_json("<html>"),
            Err(FetchError::Decode(_))
        ));
    }
}
