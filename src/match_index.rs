use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::file_stem_for_team;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchIndexEntry {
    pub file: String,
    pub label: String,
    #[serde(rename = "dateKey")]
    pub date_key: String,
}

// Club names come glued together in file names ("westhamunited").
const OPPONENT_SPLITS: &[(&str, &str)] = &[
    ("afc", "afc "),
    ("westham", "west ham"),
    ("westbromwich", "west bromwich"),
    ("hotspur", " hotspur"),
    ("united", " united"),
    ("city", " city"),
    ("palace", " palace"),
    ("albion", " albion"),
];

pub fn pretty_opponent(raw: &str) -> String {
    let mut s = raw.to_lowercase();
    for (from, to) in OPPONENT_SPLITS {
        s = s.replace(from, to);
    }
    s.split_whitespace()
        .map(|word| {
            if word == "afc" {
                return "AFC".to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses `<team><YYYYMMDD><opponent>.<ext>` (case-insensitive). Returns
/// `None` for names that do not follow the pattern or carry an impossible date.
pub fn parse_match_file_name(
    file_name: &str,
    team_display: &str,
    ext: &str,
) -> Option<MatchIndexEntry> {
    let team_stem = file_stem_for_team(team_display);
    let lower = file_name.to_ascii_lowercase();
    let suffix = format!(".{}", ext.to_ascii_lowercase());

    let rest = lower.strip_prefix(&team_stem)?;
    let rest = rest.strip_suffix(&suffix)?;
    let date = rest.get(..8)?;
    if !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let start = team_stem.len() + 8;
    let opponent_raw = file_name.get(start..file_name.len() - suffix.len())?;
    if opponent_raw.is_empty() {
        return None;
    }

    // impossible dates (e.g. month 13) are dropped rather than indexed
    let parsed = NaiveDate::parse_from_str(date, "%Y%m%d").ok()?;
    let label = format!(
        "{team_display} - {} ({})",
        pretty_opponent(opponent_raw),
        parsed.format("%d/%m/%Y")
    );
    Some(MatchIndexEntry {
        file: file_name.to_string(),
        label,
        date_key: date.to_string(),
    })
}

pub fn build_index(data_dir: &Path, team_display: &str, ext: &str) -> Result<Vec<MatchIndexEntry>> {
    if !data_dir.is_dir() {
        return Err(anyhow!("data dir not found: {}", data_dir.display()));
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(data_dir)
        .with_context(|| format!("read data dir {}", data_dir.display()))?
    {
        let entry = entry.with_context(|| format!("list data dir {}", data_dir.display()))?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();

    let mut matches = names
        .iter()
        .filter_map(|name| parse_match_file_name(name, team_display, ext))
        .collect::<Vec<_>>();
    matches.sort_by(|a, b| a.date_key.cmp(&b.date_key));
    Ok(matches)
}

pub fn write_index(path: &Path, entries: &[MatchIndexEntry]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create index dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(entries).context("serialize match index")?;
    fs::write(path, json).with_context(|| format!("write match index {}", path.display()))?;
    Ok(())
}
