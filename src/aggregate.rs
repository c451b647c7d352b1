use std::collections::HashSet;

use tracing::info;

use crate::faceit_api::{FaceitApi, MatchId};
use crate::fetch::{fetch_match_history, resolve_player_id};

#[derive(Debug, Clone, Default)]
pub struct GatherReport {
    /// Unique match ids in first-seen order.
    pub match_ids: Vec<MatchId>,
    pub handles_resolved: usize,
    pub unresolved: Vec<String>,
}

pub fn gather_match_ids(api: &impl FaceitApi, roster: &[String], limit: u32) -> GatherReport {
    let mut seen = HashSet::new();
    let mut report = GatherReport::default();

    for handle in roster {
        let Some(player_id) = resolve_player_id(api, handle) else {
            report.unresolved.push(handle.clone());
            continue;
        };
        report.handles_resolved += 1;

        info!(handle = %handle, "fetching match history");
        for match_id in fetch_match_history(api, &player_id, limit) {
            if seen.insert(match_id.clone()) {
                report.match_ids.push(match_id);
            }
        }
    }

    report
}
