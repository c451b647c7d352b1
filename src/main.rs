use anyhow::{Context, Result};

use faceit_dataset::config::Config;
use faceit_dataset::faceit_api::FaceitClient;
use faceit_dataset::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = Config::from_env().context("invalid configuration")?;
    let client = FaceitClient::new(&cfg)?;
    let summary = Pipeline::new(cfg, client).run()?;

    println!("FACEIT collection complete");
    println!("Output: {}", summary.output_path.display());
    println!(
        "Players resolved: {}/{}",
        summary.handles_resolved, summary.roster_size
    );
    if !summary.unresolved_handles.is_empty() {
        println!("  unresolved: {}", summary.unresolved_handles.join(", "));
    }
    println!(
        "Matches: {} found, {} processed, {} skipped",
        summary.matches_found, summary.matches_processed, summary.matches_skipped
    );
    println!("Player performances written: {}", summary.rows_written);

    Ok(())
}
