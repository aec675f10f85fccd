use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::events::parse_match_events_json;
use crate::match_stats::{PlayerStats, reduce_match};

/// Season totals keyed by player id, iterated in ascending id order.
pub type SeasonTotals = BTreeMap<u64, PlayerStats>;

#[derive(Debug, Clone)]
pub struct SeasonSummary {
    pub files: usize,
    pub events: usize,
    pub players: usize,
}

/// Match files in a directory (`*.json`), sorted by file name.
pub fn list_match_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read events dir {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list events dir {}", dir.display()))?;
        let path = entry.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn reduce_match_file(path: &Path, team_name: &str) -> Result<(usize, HashMap<u64, PlayerStats>)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read match file {}", path.display()))?;
    let events = parse_match_events_json(&raw)
        .with_context(|| format!("parse match file {}", path.display()))?;
    let per_player = reduce_match(&events, team_name);
    debug!(
        file = %path.display(),
        events = events.len(),
        players = per_player.len(),
        "reduced match"
    );
    Ok((events.len(), per_player))
}

/// Folds one match into the season totals. Players seen for the first time
/// are inserted as-is, so their display name comes from this match.
pub fn merge_match(totals: &mut SeasonTotals, match_stats: HashMap<u64, PlayerStats>) {
    for (player_id, stats) in match_stats {
        match totals.get_mut(&player_id) {
            Some(existing) => existing.absorb(&stats),
            None => {
                totals.insert(player_id, stats);
            }
        }
    }
}

pub fn merge_matches<I>(matches: I) -> SeasonTotals
where
    I: IntoIterator<Item = HashMap<u64, PlayerStats>>,
{
    let mut totals = SeasonTotals::new();
    for m in matches {
        merge_match(&mut totals, m);
    }
    totals
}

/// Reduces every file in parallel, then merges sequentially in the given
/// order. Any unreadable file aborts the whole run.
pub fn aggregate_files(files: &[PathBuf], team_name: &str) -> Result<(SeasonTotals, SeasonSummary)> {
    let reduced = files
        .par_iter()
        .map(|path| reduce_match_file(path, team_name))
        .collect::<Result<Vec<_>>>()?;

    let events = reduced.iter().map(|(n, _)| *n).sum::<usize>();
    let totals = merge_matches(reduced.into_iter().map(|(_, m)| m));
    let summary = SeasonSummary {
        files: files.len(),
        events,
        players: totals.len(),
    };
    info!(
        files = summary.files,
        events = summary.events,
        players = summary.players,
        team = team_name,
        "season aggregated"
    );
    Ok((totals, summary))
}

pub fn aggregate_dir(dir: &Path, team_name: &str) -> Result<(SeasonTotals, SeasonSummary)> {
    let files = list_match_files(dir)?;
    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no match files found");
    }
    aggregate_files(&files, team_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_stats::{Pressure, Stat};

    fn player(id: u64, name: &str, shots: f64, xg: f64) -> PlayerStats {
        let mut p = PlayerStats::new(id, name);
        p.stats.record(Stat::Shots, false, shots);
        p.stats.record(Stat::Xg, true, xg);
        p
    }

    #[test]
    fn merge_sums_fields_and_keeps_first_name() {
        let m1 = HashMap::from([(1, player(1, "Daniel Sturridge", 2.0, 0.4))]);
        let m2 = HashMap::from([
            (1, player(1, "D. Sturridge", 3.0, 0.1)),
            (2, player(2, "Divock Origi", 1.0, 0.2)),
        ]);
        let totals = merge_matches([m1, m2]);
        assert_eq!(totals.len(), 2);
        let first = &totals[&1];
        assert_eq!(first.player_name, "Daniel Sturridge");
        assert_eq!(first.stats.total(Stat::Shots), 5.0);
        assert!((first.stats.get(Stat::Xg, Pressure::Under) - 0.5).abs() < 1e-12);
        assert_eq!(totals[&2].stats.total(Stat::Shots), 1.0);
    }

    #[test]
    fn totals_iterate_by_player_id() {
        let m = HashMap::from([
            (9, player(9, "C", 1.0, 0.0)),
            (3, player(3, "A", 1.0, 0.0)),
            (5, player(5, "B", 1.0, 0.0)),
        ]);
        let ids = merge_matches([m]).keys().copied().collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 5, 9]);
    }
}
