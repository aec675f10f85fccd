use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use offense_radar::match_index;
use offense_radar::match_stats::DEFAULT_TEAM;

/// Index per-match summary files for the match browser
#[derive(Parser, Debug)]
#[command(name = "build_matches_index", version, about)]
struct Args {
    /// Folder containing <team><YYYYMMDD><opponent>.<ext> files
    #[arg(long, env = "RADAR_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Output JSON path
    #[arg(long, env = "RADAR_INDEX_OUT", default_value = "data/matches_index.json")]
    out: PathBuf,

    /// Team name used in file names and labels
    #[arg(long, env = "RADAR_TEAM", default_value = DEFAULT_TEAM)]
    team: String,

    /// Extension of the indexed files
    #[arg(long, default_value = "csv")]
    ext: String,
}

fn main() -> Result<()> {
    offense_radar::load_env_files();
    offense_radar::init_tracing();

    let args = Args::parse();
    let entries = match_index::build_index(&args.data_dir, &args.team, &args.ext)?;
    match_index::write_index(&args.out, &entries)?;

    println!("wrote {} matches -> {}", entries.len(), args.out.display());
    Ok(())
}
