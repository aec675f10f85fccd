use anyhow::Result;
use clap::Parser;
use tracing::info;

use offense_radar::config::RadarConfig;
use offense_radar::pipeline;

fn main() -> Result<()> {
    offense_radar::load_env_files();
    offense_radar::init_tracing();

    let config = RadarConfig::parse();
    config.validate()?;
    info!(
        team = %config.team,
        events_dir = %config.events_dir.display(),
        "building offensive radar"
    );

    let report = pipeline::run(&config)?;

    println!("Radar metrics complete");
    println!("Team: {}", config.team);
    println!(
        "Matches: {} ({} events)",
        report.season.files, report.season.events
    );
    println!("Players: {}", report.export.players);
    println!("Full metrics: {}", report.export.metrics_path.display());
    println!("Radar: {}", report.export.radar_path.display());
    if let Some(path) = report.export.xlsx_path {
        println!("Workbook: {}", path.display());
    }

    Ok(())
}
