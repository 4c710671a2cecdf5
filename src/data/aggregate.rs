use std::collections::HashMap;

use super::model::{
    compare_keys, AggregateEntry, AggregateResult, DataTable, Dataset, Sample, ValueRange,
};
use super::selection::{combinations, is_selected, FilterCombination};

/// Label used when none of the inputs carries one.
pub const DEFAULT_LABEL: &str = "IQA Value";
/// Label of the synthetic series produced by blending two selectors.
pub const COMBINED_LABEL: &str = "Combined";

// ---------------------------------------------------------------------------
// Per-key accumulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    mean: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn new(value: f64) -> Self {
        Self {
            mean: value,
            count: 1,
            min: value,
            max: value,
        }
    }

    fn add(&mut self, value: f64) {
        // Running mean; a raw sum of large finite scores can overflow.
        self.count += 1;
        let n = self.count as f64;
        self.mean += value / n - self.mean / n;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn mean(&self) -> f64 {
        self.mean.clamp(self.min, self.max)
    }
}

/// Running mean, count and min/max of every valid value, keyed in first-seen order.
///
/// Only keys with at least one valid contribution get an accumulator, so
/// the mean is never a division by zero.
fn accumulate<'a, I>(datasets: I) -> (Vec<(String, Accumulator)>, Vec<&'a str>)
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let mut order: Vec<(String, Accumulator)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut labels: Vec<&str> = Vec::new();

    for dataset in datasets {
        if let Some(label) = dataset.label.as_deref() {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        for sample in &dataset.samples {
            for key in sample.keys() {
                let Some(value) = sample.value(key) else {
                    continue;
                };
                match index.get(key) {
                    Some(&i) => order[i].1.add(value),
                    None => {
                        index.insert(key.to_string(), order.len());
                        order.push((key.to_string(), Accumulator::new(value)));
                    }
                }
            }
        }
    }

    order.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    (order, labels)
}

fn result_label(labels: &[&str]) -> String {
    if labels.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        labels.join(" / ")
    }
}

// ---------------------------------------------------------------------------
// Public aggregations
// ---------------------------------------------------------------------------

/// Per-key mean across every sample of every dataset.
///
/// Absent keys and invalid values (null, NaN, infinite) are skipped rather
/// than counted as zero. Output is ordered by numeric key.
pub fn compute_averages<'a, I>(datasets: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let (accumulated, labels) = accumulate(datasets);
    AggregateResult {
        label: result_label(&labels),
        entries: accumulated
            .into_iter()
            .map(|(key, acc)| AggregateEntry {
                key,
                value: acc.mean(),
                range: None,
            })
            .collect(),
    }
}

/// Same as [`compute_averages`] with the min and max of the contributing values.
pub fn compute_averages_with_range<'a, I>(datasets: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let (accumulated, labels) = accumulate(datasets);
    AggregateResult {
        label: result_label(&labels),
        entries: accumulated
            .into_iter()
            .map(|(key, acc)| AggregateEntry {
                key,
                value: acc.mean(),
                range: Some(ValueRange {
                    min: acc.min,
                    max: acc.max,
                }),
            })
            .collect(),
    }
}

/// Position-wise blend of two datasets into one synthetic series.
///
/// Output sample `i` holds `(a + b) / 2` for every key seen anywhere in
/// either input. A dataset whose selector is unset contributes 0 for every
/// key, and so does a key missing (or invalid) at that position. An unset
/// filter therefore halves the other filter's values instead of leaving
/// them alone.
pub fn compute_blended_average(
    a: &Dataset,
    b: &Dataset,
    selector_a: Option<&str>,
    selector_b: Option<&str>,
) -> Dataset {
    let mut keys: Vec<&str> = Vec::new();
    for sample in a.samples.iter().chain(&b.samples) {
        for key in sample.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys.sort_by(|x, y| compare_keys(x, y));

    let use_a = is_selected(selector_a);
    let use_b = is_selected(selector_b);
    let contribution = |dataset: &Dataset, used: bool, i: usize, key: &str| -> f64 {
        if !used {
            return 0.0;
        }
        dataset
            .samples
            .get(i)
            .and_then(|s| s.value(key))
            .unwrap_or(0.0)
    };

    let len = a.len().max(b.len());
    let samples = (0..len)
        .map(|i| {
            let mut blended = Sample::new();
            for &key in &keys {
                let va = contribution(a, use_a, i, key);
                let vb = contribution(b, use_b, i, key);
                blended.insert(key, Some(va / 2.0 + vb / 2.0));
            }
            blended
        })
        .collect();

    Dataset::new(COMBINED_LABEL, samples)
}

// ---------------------------------------------------------------------------
// Extremum scans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Extremum {
    pub key: String,
    pub value: f64,
}

/// The entry with the largest value; `None` when nothing is above zero.
/// Ties keep the earliest (lowest) key.
pub fn find_extremum(result: &AggregateResult) -> Option<Extremum> {
    let mut best: Option<&AggregateEntry> = None;
    for entry in &result.entries {
        if entry.value <= 0.0 {
            continue;
        }
        if best.map_or(true, |b| entry.value > b.value) {
            best = Some(entry);
        }
    }
    best.map(|e| Extremum {
        key: e.key.clone(),
        value: e.value,
    })
}

/// Highest value over every filter combination, and the combination behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalExtremum {
    pub filters: FilterCombination,
    pub key: String,
    pub value: f64,
}

/// Blend and average every (weather, hour) pair and keep the overall maximum.
/// The first combination wins ties.
pub fn find_global_extremum(weather: &DataTable, hours: &DataTable) -> Option<GlobalExtremum> {
    let mut best: Option<GlobalExtremum> = None;
    for combo in combinations(&weather.labels(), &hours.labels()) {
        let blended = compute_blended_average(
            weather.select(Some(combo.weather.as_str())),
            hours.select(Some(combo.hour.as_str())),
            Some(combo.weather.as_str()),
            Some(combo.hour.as_str()),
        );
        let Some(peak) = find_extremum(&compute_averages([&blended])) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| peak.value > b.value) {
            best = Some(GlobalExtremum {
                filters: combo,
                key: peak.key,
                value: peak.value,
            });
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Single-key views
// ---------------------------------------------------------------------------

/// Value of one key for one selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePoint {
    pub selector: String,
    /// `None` leaves a gap in the chart.
    pub value: Option<f64>,
}

/// Trace one key across every selector of a table.
///
/// Each selector reports the value from the first sample that holds a valid
/// value for `key`.
pub fn key_profile(table: &DataTable, key: &str) -> Vec<ProfilePoint> {
    table
        .datasets()
        .iter()
        .filter_map(|d| {
            let selector = d.label.clone()?;
            let value = d.samples.iter().find_map(|s| s.value(key));
            Some(ProfilePoint { selector, value })
        })
        .collect()
}

/// Mean of `key` over all samples of a dataset, counting absent values as 0.
pub fn key_distribution(dataset: &Dataset, key: &str) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let total: f64 = dataset
        .samples
        .iter()
        .map(|s| s.value(key).unwrap_or(0.0))
        .sum();
    total / dataset.len() as f64
}

/// Scale every value of a result into `[0, 1]` relative to its min and max.
/// A flat series maps to 1.0 everywhere.
pub fn normalized_intensity(result: &AggregateResult) -> Vec<f64> {
    let values = result.values();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|&v| {
            if range.abs() < f64::EPSILON {
                1.0
            } else {
                (v - min) / range
            }
        })
        .collect()
}
