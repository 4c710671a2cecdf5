//! Static study tables shipped with the dashboard.
//!
//! Weather and hour-of-day tables are two views of the same capture grid:
//! every (weather, hour) cell holds one IQA reading per viewing angle.
//! The weather table groups cells by weather, the hours table by hour
//! bucket. The metric table holds per-part scores of the inspected window.

use super::model::{DataTable, Dataset, Sample};
use super::selection::VIEWING_ANGLES;

pub const WEATHER_CONDITIONS: [&str; 3] = ["Sunny", "Cloudy", "Rainy"];
pub const HOUR_BUCKETS: [&str; 4] = ["9-12AM", "12PM-3PM", "3PM-5PM", "5PM-Sunset"];
pub const METRICS: [&str; 3] = ["Contrast", "Shading", "Exposure"];
pub const PART_COUNT: usize = 9;

/// Marks an angle that was not captured in a cell.
const ABSENT: f64 = f64::NAN;

/// `CAPTURE_GRID[weather][hour][angle]`, angles in `VIEWING_ANGLES` order.
const CAPTURE_GRID: [[[f64; 7]; 4]; 3] = [
    // Sunny
    [
        [72.4, 78.1, 84.6, 91.2, 95.8, 98.3, 101.5],
        [38.2, 44.7, 52.9, 61.4, 66.0, 70.8, 74.3],
        [58.6, 63.2, 69.5, 76.1, 82.7, 87.4, 90.2],
        [74.9, 79.3, 83.1, 88.6, 92.4, 96.7, 99.8],
    ],
    // Cloudy
    [
        [68.3, 70.1, 71.8, 73.5, 74.2, 76.9, 78.4],
        [61.7, 63.0, 64.8, 66.2, 67.5, 69.9, 71.3],
        [52.4, 55.8, 58.3, 60.1, 64.6, 68.2, 72.7],
        [63.9, 66.4, 68.7, 70.2, 73.8, 77.5, 80.6],
    ],
    // Rainy
    [
        [55.1, 58.7, 61.2, 64.9, 68.3, 72.6, 75.0],
        [47.6, 50.2, 53.8, 57.4, 61.9, 66.1, 69.7],
        [54.8, 57.3, 60.6, 63.7, 69.2, 74.5, 79.1],
        [ABSENT, 61.5, 64.2, 67.8, 72.3, 77.9, 83.4],
    ],
];

/// `METRIC_SESSIONS[metric][session][part]`, parts numbered from 1.
const METRIC_SESSIONS: [[[f64; PART_COUNT]; 3]; 3] = [
    // Contrast
    [
        [22.5, 31.4, 96.2, 54.3, 12.8, 28.6, 35.1, 33.7, 30.2],
        [25.1, 34.0, 102.7, 49.8, 10.4, 31.2, 38.4, 36.0, 29.5],
        [19.8, 29.3, 91.5, 57.6, 15.1, 26.9, 33.8, 35.2, 31.8],
    ],
    // Shading
    [
        [14.2, 45.6, 88.3, 40.1, 67.4, 71.2, 48.5, 39.7, 33.0],
        [16.8, 49.3, 92.0, 37.5, 70.9, 68.8, 45.1, 36.2, 30.4],
        [12.5, 42.9, 85.7, 43.8, 64.0, 73.5, 50.3, 41.0, 35.6],
    ],
    // Exposure
    [
        [88.4, 18.6, 55.2, 97.3, 60.5, 42.8, 58.1, 71.4, 93.6],
        [91.7, 15.2, 58.9, 101.0, 57.3, 39.6, 61.7, 74.8, 96.2],
        [85.0, 21.3, 52.4, 94.6, 63.1, 45.0, 55.3, 69.9, 90.7],
    ],
];

fn angle_sample(readings: &[f64; 7]) -> Sample {
    VIEWING_ANGLES
        .iter()
        .zip(readings)
        .filter(|(_, v)| !v.is_nan())
        .map(|(angle, &v)| (angle.to_string(), v))
        .collect()
}

/// One dataset per weather condition, one sample per hour bucket.
pub fn weather_table() -> DataTable {
    let mut table = DataTable::new("Weather");
    for (w, label) in WEATHER_CONDITIONS.iter().enumerate() {
        let samples = CAPTURE_GRID[w].iter().map(angle_sample).collect();
        table.insert(Dataset::new(*label, samples));
    }
    table
}

/// One dataset per hour bucket, one sample per weather condition.
pub fn hours_table() -> DataTable {
    let mut table = DataTable::new("Hours");
    for (h, label) in HOUR_BUCKETS.iter().enumerate() {
        let samples = CAPTURE_GRID
            .iter()
            .map(|by_hour| angle_sample(&by_hour[h]))
            .collect();
        table.insert(Dataset::new(*label, samples));
    }
    table
}

/// One dataset per image metric, one sample per capture session.
pub fn metric_table() -> DataTable {
    let mut table = DataTable::new("Metric");
    for (m, label) in METRICS.iter().enumerate() {
        let samples = METRIC_SESSIONS[m]
            .iter()
            .map(|parts| {
                parts
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| ((i + 1).to_string(), v))
                    .collect::<Sample>()
            })
            .collect();
        table.insert(Dataset::new(*label, samples));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{compute_averages, find_extremum};

    #[test]
    fn tables_have_expected_selectors() {
        assert_eq!(weather_table().labels(), WEATHER_CONDITIONS.to_vec());
        assert_eq!(hours_table().labels(), HOUR_BUCKETS.to_vec());
        assert_eq!(metric_table().labels(), METRICS.to_vec());
    }

    #[test]
    fn weather_and_hours_are_transposes() {
        let weather = weather_table();
        let hours = hours_table();
        let sunny_noon = &weather.select(Some("Sunny")).samples[1];
        let noon_sunny = &hours.select(Some("12PM-3PM")).samples[0];
        assert_eq!(sunny_noon, noon_sunny);
    }

    #[test]
    fn uncaptured_angle_is_absent() {
        let weather = weather_table();
        let rainy_evening = &weather.select(Some("Rainy")).samples[3];
        assert!(!rainy_evening.contains_key("-45"));
        assert_eq!(rainy_evening.len(), 6);
    }

    #[test]
    fn contrast_peaks_at_part_three() {
        let metrics = metric_table();
        let result = compute_averages([metrics.select(Some("Contrast"))]);
        assert_eq!(result.len(), PART_COUNT);
        assert_eq!(find_extremum(&result).unwrap().key, "3");
    }
}
