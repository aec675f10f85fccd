use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::match_stats::DEFAULT_TEAM;

/// Season offensive radar metrics from StatsBomb event files
#[derive(Parser, Debug, Clone)]
#[command(name = "offense_radar", version, about)]
pub struct RadarConfig {
    /// Team whose players are profiled (exact StatsBomb team name)
    #[arg(long, env = "RADAR_TEAM", default_value = DEFAULT_TEAM)]
    pub team: String,

    /// Directory holding one JSON event file per match
    #[arg(long, env = "RADAR_EVENTS_DIR", default_value = "data/events")]
    pub events_dir: PathBuf,

    /// Directory the CSV tables are written to
    #[arg(long, env = "RADAR_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// File name prefix for the tables (defaults to the lowercased team name)
    #[arg(long, env = "RADAR_OUT_PREFIX")]
    pub prefix: Option<String>,

    /// Also write both tables into an XLSX workbook at this path
    #[arg(long, env = "RADAR_XLSX")]
    pub xlsx: Option<PathBuf>,
}

impl RadarConfig {
    pub fn validate(&self) -> Result<()> {
        if self.team.trim().is_empty() {
            return Err(anyhow!("team name must not be empty"));
        }
        if !self.events_dir.is_dir() {
            return Err(anyhow!(
                "events dir not found: {}",
                self.events_dir.display()
            ));
        }
        Ok(())
    }

    pub fn output_prefix(&self) -> String {
        match self.prefix.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => file_stem_for_team(&self.team),
        }
    }
}

/// "Manchester United" -> "manchesterunited"
pub fn file_stem_for_team(team: &str) -> String {
    team.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_defaults_to_team_stem() {
        let cfg = RadarConfig::parse_from(["offense_radar", "--team", "West Ham United"]);
        assert_eq!(cfg.output_prefix(), "westhamunited");
        let cfg = RadarConfig::parse_from(["offense_radar", "--prefix", "lfc_1516"]);
        assert_eq!(cfg.output_prefix(), "lfc_1516");
    }
}
