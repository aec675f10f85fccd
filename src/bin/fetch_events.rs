use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use offense_radar::match_stats::DEFAULT_TEAM;
use offense_radar::open_data::{
    self, DEFAULT_COMPETITION_ID, DEFAULT_SEASON_ID, OPEN_DATA_BASE_URL,
};

/// Download a season of StatsBomb open-data event files for one team
#[derive(Parser, Debug)]
#[command(name = "fetch_events", version, about)]
struct Args {
    /// Team name as spelled in the open-data match list
    #[arg(long, env = "RADAR_TEAM", default_value = DEFAULT_TEAM)]
    team: String,

    #[arg(long, env = "RADAR_COMPETITION_ID", default_value_t = DEFAULT_COMPETITION_ID)]
    competition_id: u32,

    #[arg(long, env = "RADAR_SEASON_ID", default_value_t = DEFAULT_SEASON_ID)]
    season_id: u32,

    /// Where the per-match event files are written
    #[arg(long, env = "RADAR_EVENTS_DIR", default_value = "data/events")]
    events_dir: PathBuf,

    #[arg(long, env = "STATSBOMB_OPEN_DATA_URL", default_value = OPEN_DATA_BASE_URL)]
    base_url: String,
}

fn main() -> Result<()> {
    offense_radar::load_env_files();
    offense_radar::init_tracing();

    let args = Args::parse();
    let summary = open_data::fetch_season_events(
        &args.base_url,
        args.competition_id,
        args.season_id,
        &args.team,
        &args.events_dir,
    )?;

    println!("Open-data fetch complete");
    println!("Team: {}", args.team);
    println!("Dir: {}", args.events_dir.display());
    println!(
        "Matches: {}/{}",
        summary.matches_written, summary.matches_total
    );
    if !summary.errors.is_empty() {
        println!("Errors: {}", summary.errors.len());
        for err in summary.errors.iter().take(8) {
            println!(" - {err}");
        }
    }
    if summary.matches_total == 0 {
        return Err(anyhow!(
            "no matches for {} in competition {} season {}",
            args.team,
            args.competition_id,
            args.season_id
        ));
    }

    Ok(())
}
