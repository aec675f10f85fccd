use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use offense_radar::match_stats::{Pressure, RAW_COLUMNS, Stat};
use offense_radar::season::{
    SeasonTotals, aggregate_dir, list_match_files, merge_matches, reduce_match_file,
};

const TEAM: &str = "Liverpool";
const STURRIDGE: u64 = 3479;
const COUTINHO: u64 = 3502;
const HENDERSON: u64 = 3510;
const MIGNOLET: u64 = 3521;

fn season_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("season");
    path
}

fn load_season() -> SeasonTotals {
    let (totals, summary) = aggregate_dir(&season_dir(), TEAM).expect("fixtures should aggregate");
    assert_eq!(summary.files, 2);
    assert_eq!(summary.players, 4);
    totals
}

#[test]
fn season_totals_for_striker() {
    let totals = load_season();
    let p = &totals[&STURRIDGE];
    assert_eq!(p.player_name, "Daniel Sturridge");

    let s = &p.stats;
    assert_eq!(s.total(Stat::Shots), 2.0);
    assert_eq!(s.total(Stat::Goals), 1.0);
    assert_relative_eq!(s.total(Stat::Xg), 0.4, epsilon = 1e-9);
    assert_relative_eq!(s.total(Stat::ExecutionValue), 0.6, epsilon = 1e-9);
    assert_eq!(s.get(Stat::Shots, Pressure::Under), 1.0);
    assert_eq!(s.get(Stat::Goals, Pressure::Under), 1.0);
    assert_relative_eq!(s.get(Stat::Xg, Pressure::Under), 0.3, epsilon = 1e-9);
    assert_relative_eq!(s.get(Stat::ExecutionValue, Pressure::Under), 0.7, epsilon = 1e-9);

    assert_eq!(s.total(Stat::TouchesFinalThird), 4.0);
    assert_eq!(s.total(Stat::TouchesInBox), 2.0);
    assert_eq!(s.total(Stat::DeepTouches), 2.0);
    assert_eq!(s.total(Stat::DeepCompletions), 1.0);
    assert_eq!(s.get(Stat::TouchesFinalThird, Pressure::Under), 1.0);
    assert_eq!(s.total(Stat::Miscontrols), 1.0);
    assert_eq!(s.total(Stat::Dispossessed), 1.0);
}

#[test]
fn season_totals_for_creator() {
    let totals = load_season();
    let s = &totals[&COUTINHO].stats;
    assert_eq!(s.total(Stat::TouchesFinalThird), 4.0);
    assert_eq!(s.total(Stat::DeepCompletions), 2.0);
    assert_eq!(s.total(Stat::KeyPassesFinalThird), 2.0);
    assert_eq!(s.total(Stat::AssistsFinalThird), 1.0);
    assert_eq!(s.total(Stat::PassesIntoBox), 2.0);
    assert_eq!(s.total(Stat::PassesIntoDeepZone), 2.0);
    assert_eq!(s.total(Stat::ProgressionsPass), 1.0);
    assert_eq!(s.total(Stat::ProgressionsPassDeep), 0.0);
    assert_eq!(s.total(Stat::DribblesAttempted), 1.0);
    assert_eq!(s.total(Stat::DribblesCompleted), 1.0);
    assert_eq!(s.get(Stat::KeyPassesFinalThird, Pressure::Under), 1.0);
    assert_eq!(s.get(Stat::AssistsFinalThird, Pressure::Under), 0.0);
}

#[test]
fn players_without_counters_still_get_a_row() {
    let totals = load_season();
    let henderson = &totals[&HENDERSON].stats;
    assert_eq!(henderson.total(Stat::ProgressionsCarry), 1.0);
    assert_eq!(henderson.total(Stat::FoulsWon), 1.0);
    assert_eq!(henderson.get(Stat::FoulsWon, Pressure::Under), 1.0);
    assert_eq!(henderson.total(Stat::TouchesFinalThird), 0.0);

    let keeper = &totals[&MIGNOLET].stats;
    for (stat, pressure) in RAW_COLUMNS {
        assert_eq!(keeper.get(stat, pressure), 0.0, "{stat:?} {pressure:?}");
    }
    assert!(!totals.contains_key(&4001), "opponents are filtered out");
}

#[test]
fn under_pressure_never_exceeds_base() {
    let totals = load_season();
    for player in totals.values() {
        for stat in Stat::ALL {
            if !stat.is_count() {
                continue;
            }
            assert!(
                player.stats.get(stat, Pressure::Under) <= player.stats.total(stat),
                "{} {stat:?}",
                player.player_name
            );
        }
    }
}

#[test]
fn file_order_does_not_change_totals() {
    let expected = load_season();
    let files = list_match_files(&season_dir()).expect("list fixtures");
    let mut per_match = files
        .iter()
        .map(|path| reduce_match_file(path, TEAM).expect("reduce fixture").1)
        .collect::<Vec<_>>();

    let mut rng = StdRng::seed_from_u64(1516);
    for _ in 0..4 {
        per_match.shuffle(&mut rng);
        let totals = merge_matches(per_match.clone());
        assert_eq!(totals.len(), expected.len());
        for (id, player) in &expected {
            let other = &totals[id];
            for (stat, pressure) in RAW_COLUMNS {
                assert_relative_eq!(
                    other.stats.get(stat, pressure),
                    player.stats.get(stat, pressure),
                    epsilon = 1e-9
                );
            }
        }
    }
}

#[test]
fn season_total_is_sum_of_matches() {
    let expected = load_season();
    let files = list_match_files(&season_dir()).expect("list fixtures");
    for (stat, pressure) in RAW_COLUMNS {
        for (id, player) in &expected {
            let summed = files
                .iter()
                .map(|path| reduce_match_file(path, TEAM).expect("reduce fixture").1)
                .filter_map(|m| m.get(id).map(|p| p.stats.get(stat, pressure)))
                .sum::<f64>();
            assert_relative_eq!(player.stats.get(stat, pressure), summed, epsilon = 1e-9);
        }
    }
}

#[test]
fn unparsable_file_fails_loudly() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("good.json"), "[]").expect("write good");
    fs::write(dir.path().join("broken.json"), "{\"0\": ").expect("write broken");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write notes");

    let err = aggregate_dir(dir.path(), TEAM).expect_err("broken file should fail");
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn only_json_files_are_listed() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("b.json"), "[]").expect("write");
    fs::write(dir.path().join("a.JSON"), "[]").expect("write");
    fs::write(dir.path().join("c.csv"), "").expect("write");
    let names = list_match_files(dir.path())
        .expect("list")
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a.JSON", "b.json"]);
}
