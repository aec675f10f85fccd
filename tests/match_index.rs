use std::fs;

use offense_radar::match_index::{MatchIndexEntry, build_index, write_index};

#[test]
fn index_is_sorted_by_date_and_skips_strangers() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in [
        "liverpool20160306crystalpalace.csv",
        "Liverpool20150809StokeCity.csv",
        "liverpool20151108westhamunited.csv",
        "liverpool20151108notes.txt",
        "summary.csv",
    ] {
        fs::write(dir.path().join(name), "x").expect("write fixture");
    }

    let entries = build_index(dir.path(), "Liverpool", "csv").expect("index should build");
    let keys = entries.iter().map(|e| e.date_key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["20150809", "20151108", "20160306"]);
    assert_eq!(entries[0].label, "Liverpool - Stoke City (09/08/2015)");
    assert_eq!(entries[1].label, "Liverpool - West Ham United (08/11/2015)");
    assert_eq!(entries[2].file, "liverpool20160306crystalpalace.csv");

    let out = dir.path().join("out").join("matches_index.json");
    write_index(&out, &entries).expect("index should write");
    let raw = fs::read_to_string(&out).expect("read index");
    assert!(raw.contains("\"dateKey\": \"20150809\""));
    let back: Vec<MatchIndexEntry> = serde_json::from_str(&raw).expect("index is json");
    assert_eq!(back, entries);
}

#[test]
fn missing_data_dir_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(build_index(&dir.path().join("nope"), "Liverpool", "csv").is_err());
}
