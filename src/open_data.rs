use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::file_stem_for_team;
use crate::http_client::{fetch_text, http_client};

pub const OPEN_DATA_BASE_URL: &str =
    "https://raw.githubusercontent.com/statsbomb/open-data/master/data";
/// Premier League 2015/16 in the open-data catalogue.
pub const DEFAULT_COMPETITION_ID: u32 = 2;
pub const DEFAULT_SEASON_ID: u32 = 27;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenDataMatch {
    pub match_id: u64,
    #[serde(default)]
    pub match_date: String,
    pub home_team: HomeTeam,
    pub away_team: AwayTeam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomeTeam {
    pub home_team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwayTeam {
    pub away_team_name: String,
}

impl OpenDataMatch {
    pub fn involves(&self, team: &str) -> bool {
        self.home_team.home_team_name == team || self.away_team.away_team_name == team
    }

    pub fn opponent_of(&self, team: &str) -> &str {
        if self.home_team.home_team_name == team {
            &self.away_team.away_team_name
        } else {
            &self.home_team.home_team_name
        }
    }

    /// `<team><YYYYMMDD><opponent>.json`, the naming the match index understands.
    /// `None` when the match date is missing or malformed.
    pub fn file_name(&self, team: &str) -> Option<String> {
        let date = NaiveDate::parse_from_str(self.match_date.trim(), "%Y-%m-%d").ok()?;
        Some(format!(
            "{}{}{}.json",
            file_stem_for_team(team),
            date.format("%Y%m%d"),
            file_stem_for_team(self.opponent_of(team))
        ))
    }
}

#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub matches_total: usize,
    pub matches_written: usize,
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<OpenDataMatch>> {
    serde_json::from_str(raw.trim()).context("invalid open-data matches json")
}

pub fn team_matches(matches: Vec<OpenDataMatch>, team: &str) -> Vec<OpenDataMatch> {
    let mut out = matches
        .into_iter()
        .filter(|m| m.involves(team))
        .collect::<Vec<_>>();
    out.sort_by(|a, b| a.match_date.cmp(&b.match_date));
    out
}

pub fn fetch_season_events(
    base_url: &str,
    competition_id: u32,
    season_id: u32,
    team: &str,
    out_dir: &Path,
) -> Result<FetchSummary> {
    let client = http_client()?;
    let base = base_url.trim_end_matches('/');
    let url = format!("{base}/matches/{competition_id}/{season_id}.json");
    let body = fetch_text(client, &url)?;
    let matches = team_matches(parse_matches_json(&body)?, team);
    info!(competition_id, season_id, team, matches = matches.len(), "match list loaded");

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create events dir {}", out_dir.display()))?;

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for m in &matches {
        let Some(name) = m.file_name(team) else {
            warn!(match_id = m.match_id, date = %m.match_date, "match has no usable date, skipped");
            errors.push(format!("match {}: unusable match_date {:?}", m.match_id, m.match_date));
            continue;
        };
        let url = format!("{base}/events/{}.json", m.match_id);
        let path = out_dir.join(name);
        let result = fetch_text(client, &url).and_then(|raw| {
            fs::write(&path, raw).with_context(|| format!("write {}", path.display()))
        });
        match result {
            Ok(()) => files.push(path),
            Err(err) => {
                warn!(match_id = m.match_id, error = %err, "match events fetch failed");
                errors.push(format!("match {}: {err:#}", m.match_id));
            }
        }
    }

    Ok(FetchSummary {
        matches_total: matches.len(),
        matches_written: files.len(),
        files,
        errors,
    })
}
