use std::path::PathBuf;
use std::thread;

use anyhow::Result;
use tracing::{debug, info};

use crate::aggregate::{GatherReport, gather_match_ids};
use crate::config::Config;
use crate::dataset::write_dataset;
use crate::faceit_api::FaceitApi;
use crate::features::{PlayerPerformance, engineer_match};
use crate::fetch::fetch_match_stats;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub roster_size: usize,
    pub handles_resolved: usize,
    pub unresolved_handles: Vec<String>,
    pub matches_found: usize,
    pub matches_processed: usize,
    pub matches_skipped: usize,
    pub rows_written: usize,
}

/// Runs gather, per-match processing and the final write in that order.
pub struct Pipeline<A> {
    cfg: Config,
    api: A,
}

impl<A: FaceitApi> Pipeline<A> {
    pub fn new(cfg: Config, api: A) -> Self {
        Self { cfg, api }
    }

    pub fn run(&self) -> Result<RunSummary> {
        info!("gathering unique match ids");
        let gathered = gather_match_ids(&self.api, &self.cfg.roster, self.cfg.history_limit);
        info!(count = gathered.match_ids.len(), "found unique matches to process");

        let (rows, matches_processed) = self.process_matches(&gathered);

        let rows_written = write_dataset(&self.cfg.output_path, &rows)?;
        info!(
            rows = rows_written,
            path = %self.cfg.output_path.display(),
            "data collection complete"
        );

        Ok(RunSummary {
            output_path: self.cfg.output_path.clone(),
            roster_size: self.cfg.roster.len(),
            handles_resolved: gathered.handles_resolved,
            unresolved_handles: gathered.unresolved,
            matches_found: gathered.match_ids.len(),
            matches_processed,
            matches_skipped: gathered.match_ids.len() - matches_processed,
            rows_written,
        })
    }

    /// Fetches and flattens every gathered match. Returns the rows and the
    /// number of matches that produced them.
    pub fn process_matches(&self, gathered: &GatherReport) -> (Vec<PlayerPerformance>, usize) {
        let total = gathered.match_ids.len();
        let mut rows = Vec::new();
        let mut processed = 0usize;

        for (idx, match_id) in gathered.match_ids.iter().enumerate() {
            if !self.cfg.stats_delay.is_zero() {
                thread::sleep(self.cfg.stats_delay);
            }
            info!(match_id = %match_id, "processing match {}/{}", idx + 1, total);

            let stats = fetch_match_stats(&self.api, match_id);
            let match_rows = engineer_match(match_id, &stats);
            if match_rows.is_empty() {
                debug!(match_id = %match_id, "skipping incomplete match");
                continue;
            }
            processed += 1;
            rows.extend(match_rows);
        }

        (rows, processed)
    }
}
