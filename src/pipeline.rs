use anyhow::Result;
use tracing::info;

use crate::config::RadarConfig;
use crate::export::{self, ExportReport, Table};
use crate::metrics::{DerivedRow, derive_rows};
use crate::scores::{RadarPercentiles, RadarScores, compute_percentiles, compute_scores};
use crate::season::{self, SeasonSummary, SeasonTotals};

#[derive(Debug, Clone)]
pub struct RadarProfile {
    pub rows: Vec<DerivedRow>,
    pub scores: Vec<RadarScores>,
    pub percentiles: Vec<RadarPercentiles>,
}

impl RadarProfile {
    pub fn metrics_table(&self) -> Table {
        export::metrics_table(&self.rows, &self.scores)
    }

    pub fn radar_table(&self) -> Table {
        export::radar_table(&self.rows, &self.scores, &self.percentiles)
    }
}

/// Derived metrics, composite scores and percentiles for every player in the totals.
pub fn build_profile(totals: &SeasonTotals) -> RadarProfile {
    let rows = derive_rows(totals.values());
    let scores = compute_scores(&rows);
    let percentiles = compute_percentiles(&scores);
    RadarProfile {
        rows,
        scores,
        percentiles,
    }
}

pub struct RunReport {
    pub season: SeasonSummary,
    pub export: ExportReport,
}

pub fn run(config: &RadarConfig) -> Result<RunReport> {
    let (totals, season) = season::aggregate_dir(&config.events_dir, &config.team)?;
    let profile = build_profile(&totals);
    let scored = profile
        .scores
        .iter()
        .filter(|s| s.values().iter().any(Option::is_some))
        .count();
    info!(players = profile.rows.len(), scored, "profile built");

    let export = export::export_tables(
        &config.out_dir,
        &config.output_prefix(),
        &profile.metrics_table(),
        &profile.radar_table(),
        config.xlsx.as_deref(),
    )?;
    Ok(RunReport { season, export })
}
