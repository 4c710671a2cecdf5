use std::collections::HashMap;

use iqa_dashboard::data::aggregate::{
    compute_averages, compute_averages_with_range, compute_blended_average, find_extremum,
    find_global_extremum,
};
use iqa_dashboard::data::builtin::{hours_table, metric_table, weather_table};
use iqa_dashboard::data::model::{compare_keys, key_as_f64, DataTable, Dataset, Sample};

fn all_tables() -> Vec<DataTable> {
    vec![weather_table(), hours_table(), metric_table()]
}

/// A dataset with ragged keys, nulls and NaNs.
fn ragged_dataset() -> Dataset {
    let mut a = Sample::new().with("30", 70.0).with("-30", 40.0);
    a.insert("0", None);
    let mut b = Sample::new().with("0", 55.0);
    b.insert("30", Some(f64::NAN));
    let mut c = Sample::new().with("45", 90.0);
    c.insert("60", None);
    Dataset::new("Ragged", vec![a, b, c, Sample::new()])
}

/// Mean of every valid value per key, computed the slow way.
fn brute_force_means(dataset: &Dataset) -> HashMap<String, f64> {
    let mut values: HashMap<String, Vec<f64>> = HashMap::new();
    for sample in &dataset.samples {
        for (key, value) in sample.iter() {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                values.entry(key.to_string()).or_default().push(v);
            }
        }
    }
    values
        .into_iter()
        .map(|(k, vs)| (k, vs.iter().sum::<f64>() / vs.len() as f64))
        .collect()
}

fn every_dataset() -> Vec<Dataset> {
    let mut datasets: Vec<Dataset> = all_tables()
        .iter()
        .flat_map(|t| t.datasets().to_vec())
        .collect();
    datasets.push(ragged_dataset());
    datasets
}

#[test]
fn key_set_is_keys_with_a_valid_value() {
    for dataset in every_dataset() {
        let result = compute_averages([&dataset]);
        let mut expected: Vec<String> = brute_force_means(&dataset).into_keys().collect();
        expected.sort();
        let mut actual: Vec<String> = result.keys().iter().map(|k| k.to_string()).collect();
        actual.sort();
        assert_eq!(actual, expected, "dataset {:?}", dataset.label);
    }
}

#[test]
fn values_match_brute_force_mean() {
    for dataset in every_dataset() {
        let expected = brute_force_means(&dataset);
        for entry in &compute_averages([&dataset]).entries {
            let want = expected[&entry.key];
            assert!(
                (entry.value - want).abs() < 1e-9,
                "{:?} key {}: {} != {}",
                dataset.label,
                entry.key,
                entry.value,
                want
            );
        }
    }
}

#[test]
fn ragged_dataset_skips_invalid_values() {
    let result = compute_averages_with_range([&ragged_dataset()]);
    assert_eq!(result.keys(), vec!["-30", "0", "30", "45"]);
    assert_eq!(result.get("30").unwrap().value, 70.0);
    assert_eq!(result.get("0").unwrap().value, 55.0);
    assert!(result.get("60").is_none());
}

#[test]
fn output_keys_are_ordered_and_unique() {
    for dataset in every_dataset() {
        let result = compute_averages_with_range([&dataset]);
        let keys = result.keys();
        for pair in keys.windows(2) {
            assert_ne!(pair[0], pair[1]);
            assert_ne!(compare_keys(pair[0], pair[1]), std::cmp::Ordering::Greater);
        }
        assert!(keys.iter().all(|k| key_as_f64(k).is_some()));
    }
}

#[test]
fn no_input_no_output() {
    let none: [&Dataset; 0] = [];
    assert!(compute_averages(none).is_empty());
    assert!(compute_averages_with_range(none).is_empty());
}

#[test]
fn aggregation_is_idempotent() {
    let weather = weather_table();
    let first = compute_averages(weather.datasets());
    let second = compute_averages(weather.datasets());
    assert_eq!(first, second);
    assert_eq!(weather, weather_table());
}

#[test]
fn range_brackets_the_mean() {
    for dataset in every_dataset() {
        for entry in &compute_averages_with_range([&dataset]).entries {
            let range = entry.range.expect("range tracked");
            assert!(range.min <= entry.value && entry.value <= range.max);
        }
    }
}

#[test]
fn blended_series_has_no_nan_and_full_keys() {
    let weather = weather_table();
    let hours = hours_table();
    for w in weather.labels() {
        for h in hours.labels() {
            let blended = compute_blended_average(
                weather.select(Some(w)),
                hours.select(Some(h)),
                Some(w),
                Some(h),
            );
            assert_eq!(blended.len(), 4);
            for sample in &blended.samples {
                assert_eq!(sample.len(), 7);
                assert!(sample.iter().all(|(_, v)| v.is_some_and(f64::is_finite)));
            }
        }
    }
}

#[test]
fn unselected_filter_halves_the_other() {
    let weather = weather_table();
    let hours = hours_table();
    let sunny = weather.select(Some("Sunny"));
    let blended = compute_blended_average(sunny, hours.select(Some("9-12AM")), Some("Sunny"), None);

    // Every Sunny sample holds every angle, so each mean is exactly halved.
    let direct = compute_averages([sunny]);
    let halved = compute_averages([&blended]);
    assert_eq!(halved.keys(), direct.keys());
    for entry in &halved.entries {
        let full = direct.get(&entry.key).unwrap().value;
        assert!((entry.value - full / 2.0).abs() < 1e-9, "key {}", entry.key);
    }
}

#[test]
fn global_peak_beats_every_combination() {
    let weather = weather_table();
    let hours = hours_table();
    let global = find_global_extremum(&weather, &hours).expect("positive data");

    for w in weather.labels() {
        for h in hours.labels() {
            let blended = compute_blended_average(
                weather.select(Some(w)),
                hours.select(Some(h)),
                Some(w),
                Some(h),
            );
            if let Some(peak) = find_extremum(&compute_averages([&blended])) {
                assert!(peak.value <= global.value);
            }
        }
    }
    assert_eq!(global.filters.weather, "Sunny");
    assert_eq!(global.key, "45");
}

#[test]
fn equal_valued_keys_tie_in_input_order() {
    let first = Sample::new().with("30", 1.0).with("0", 2.0).with("0.0", 3.0);
    let second = Sample::new().with("-0", 4.0).with("-30", 5.0);
    let dataset = Dataset::new("Ties", vec![first, second]);

    let result = compute_averages_with_range([&dataset]);
    assert_eq!(result.keys(), vec!["-30", "0", "0.0", "-0", "30"]);
}

#[test]
fn extreme_finite_scores_never_overflow() {
    let dataset = Dataset::new(
        "Extreme",
        vec![
            Sample::new().with("0", f64::MAX).with("45", -f64::MAX),
            Sample::new().with("0", f64::MAX).with("45", -f64::MAX),
            Sample::new().with("0", f64::MAX / 2.0),
        ],
    );
    let result = compute_averages_with_range([&dataset]);
    for entry in &result.entries {
        let range = entry.range.expect("range tracked");
        assert!(entry.value.is_finite(), "key {}", entry.key);
        assert!(range.min <= entry.value && entry.value <= range.max);
    }
}
