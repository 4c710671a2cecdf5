use std::path::PathBuf;

use iqa_dashboard::data::aggregate::{compute_averages, compute_averages_with_range};
use iqa_dashboard::data::loader::load_table;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("iqa_loader_{}_{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn json_file_feeds_the_aggregator() {
    let path = temp_file(
        "weather.json",
        r#"{
            "Sunny":  [ { "0": 5, "15": 40 }, { "0": 15, "15": null } ],
            "Cloudy": [ { "-15": 30 } ]
        }"#,
    );
    let table = load_table(&path, "Weather").unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(table.labels(), vec!["Sunny", "Cloudy"]);
    let sunny = compute_averages_with_range([table.select(Some("Sunny"))]);
    let zero = sunny.get("0").unwrap();
    assert_eq!(zero.value, 10.0);
    assert_eq!(zero.range.map(|r| (r.min, r.max)), Some((5.0, 15.0)));
    assert_eq!(sunny.get("15").unwrap().value, 40.0);

    let all = compute_averages(table.datasets());
    assert_eq!(all.keys(), vec!["-15", "0", "15"]);
}

#[test]
fn csv_file_feeds_the_aggregator() {
    let path = temp_file(
        "hours.CSV",
        "selector,-15,0,15\n9-12AM,10,20,30\n9-12AM,30,,50\n12PM-3PM,1,2,3\n",
    );
    let table = load_table(&path, "Hours").unwrap();
    std::fs::remove_file(&path).unwrap();

    let morning = compute_averages([table.select(Some("9-12AM"))]);
    assert_eq!(morning.keys(), vec!["-15", "0", "15"]);
    assert_eq!(morning.values(), vec![20.0, 20.0, 40.0]);
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("iqa_loader_definitely_missing.json");
    let err = load_table(&path, "Weather").unwrap_err();
    assert!(format!("{err:#}").contains("reading JSON file"));
}
