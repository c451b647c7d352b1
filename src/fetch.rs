//! Recovery boundary around the endpoint calls. Every request failure is
//! logged here and turned into an absent or empty result.

use tracing::warn;

use crate::faceit_api::{FaceitApi, MatchId, MatchStats, PlayerId};

pub fn resolve_player_id(api: &impl FaceitApi, handle: &str) -> Option<PlayerId> {
    match api.player_id(handle) {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            warn!(handle, "player lookup returned no player_id");
            None
        }
        Err(err) => {
            warn!(handle, error = %err, "error fetching player id");
            None
        }
    }
}

pub fn fetch_match_history(api: &impl FaceitApi, player: &PlayerId, limit: u32) -> Vec<MatchId> {
    api.match_history(player, limit).unwrap_or_else(|err| {
        warn!(player = %player, error = %err, "error fetching match history");
        Vec::new()
    })
}

pub fn fetch_match_stats(api: &impl FaceitApi, match_id: &MatchId) -> MatchStats {
    api.match_stats(match_id).unwrap_or_else(|err| {
        warn!(match_id = %match_id, error = %err, "error fetching match stats");
        MatchStats::default()
    })
}
