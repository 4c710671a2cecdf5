use eframe::egui::Theme;

use iqa_dashboard::color::SeriesColors;
use iqa_dashboard::data::aggregate::{
    compute_averages, compute_averages_with_range, compute_blended_average, find_extremum,
    find_global_extremum, key_distribution, key_profile, normalized_intensity, Extremum,
    GlobalExtremum, ProfilePoint,
};
use iqa_dashboard::data::builtin::{hours_table, metric_table, weather_table};
use iqa_dashboard::data::model::{AggregateResult, DataTable};
use iqa_dashboard::data::selection::Selection;
use iqa_dashboard::settings::Settings;

/// Which built-in table a loaded file replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Weather,
    Hours,
    Metric,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Weather, TableKind::Hours, TableKind::Metric];

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Weather => "Weather",
            TableKind::Hours => "Hours",
            TableKind::Metric => "Metric",
        }
    }
}

/// One bar of the per-angle distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionBar {
    pub selector: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub weather: DataTable,
    pub hours: DataTable,
    pub metrics: DataTable,

    /// Current filter choices.
    pub selection: Selection,

    /// Persisted preferences.
    pub settings: Settings,
    /// Theme actually on screen (resolves `ThemeSetting::System`).
    pub theme: Theme,

    pub weather_colors: SeriesColors,
    pub hour_colors: SeriesColors,

    // Cached aggregations, rebuilt by `recompute`.
    pub metric_series: AggregateResult,
    pub metric_heat: Vec<f64>,
    pub metric_peak: Option<Extremum>,
    pub combined_series: AggregateResult,
    pub combined_heat: Vec<f64>,
    pub combined_peak: Option<Extremum>,
    pub hour_profile: Vec<ProfilePoint>,
    pub weather_profile: Vec<ProfilePoint>,
    pub hour_distribution: Vec<DistributionBar>,
    pub weather_distribution: Vec<DistributionBar>,

    /// Depends only on the tables, not on the selection.
    pub global_peak: Option<GlobalExtremum>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// State over the built-in study tables.
    pub fn new(settings: Settings, theme: Theme) -> Self {
        let weather = weather_table();
        let hours = hours_table();
        let mut state = Self {
            weather_colors: SeriesColors::new(&weather.labels()),
            hour_colors: SeriesColors::new(&hours.labels()),
            weather,
            hours,
            metrics: metric_table(),
            selection: Selection::default(),
            settings,
            theme,
            metric_series: AggregateResult::default(),
            metric_heat: Vec::new(),
            metric_peak: None,
            combined_series: AggregateResult::default(),
            combined_heat: Vec::new(),
            combined_peak: None,
            hour_profile: Vec::new(),
            weather_profile: Vec::new(),
            hour_distribution: Vec::new(),
            weather_distribution: Vec::new(),
            global_peak: None,
            status_message: None,
        };
        state.rebuild_global_peak();
        state.recompute();
        state
    }

    /// Re-run every aggregation for the current selection.
    pub fn recompute(&mut self) {
        let sel = &self.selection;

        self.metric_series = compute_averages([self.metrics.select(Some(sel.metric.as_str()))]);
        self.metric_heat = normalized_intensity(&self.metric_series);
        self.metric_peak = find_extremum(&self.metric_series);

        let blended = compute_blended_average(
            self.weather.select(sel.weather()),
            self.hours.select(sel.hour()),
            sel.weather(),
            sel.hour(),
        );
        self.combined_series = compute_averages_with_range([&blended]);
        self.combined_heat = normalized_intensity(&self.combined_series);
        self.combined_peak = find_extremum(&self.combined_series);

        let key = sel.angle_key();
        self.hour_profile = key_profile(&self.hours, &key);
        self.weather_profile = key_profile(&self.weather, &key);
        self.hour_distribution = distribution(&self.hours, &key);
        self.weather_distribution = distribution(&self.weather, &key);

        log::debug!(
            "Recomputed for {:?}: {} / {}",
            self.selection,
            self.metric_series,
            self.combined_series
        );
    }

    fn rebuild_global_peak(&mut self) {
        self.global_peak = find_global_extremum(&self.weather, &self.hours);
    }

    pub fn set_metric(&mut self, label: &str) {
        self.selection.set_metric(label);
        self.recompute();
    }

    pub fn toggle_weather(&mut self, label: &str) {
        self.selection.toggle_weather(label);
        self.recompute();
    }

    pub fn toggle_hour(&mut self, label: &str) {
        self.selection.toggle_hour(label);
        self.recompute();
    }

    pub fn set_angle(&mut self, angle: i32) {
        if self.selection.set_angle(angle) {
            self.recompute();
        }
    }

    /// Swap in a table loaded from disk.
    pub fn replace_table(&mut self, kind: TableKind, table: DataTable) {
        match kind {
            TableKind::Weather => {
                self.weather_colors = SeriesColors::new(&table.labels());
                self.weather = table;
            }
            TableKind::Hours => {
                self.hour_colors = SeriesColors::new(&table.labels());
                self.hours = table;
            }
            TableKind::Metric => self.metrics = table,
        }
        self.rebuild_global_peak();
        self.recompute();
        self.status_message = None;
    }

    /// Flip light/dark, persist it, and return the new effective theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled(self.theme == Theme::Dark);
        self.settings.save();
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.theme
    }
}

fn distribution(table: &DataTable, key: &str) -> Vec<DistributionBar> {
    table
        .labels()
        .into_iter()
        .map(|selector| DistributionBar {
            selector: selector.to_string(),
            value: key_distribution(table.select(Some(selector)), key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_has_series() {
        let state = AppState::new(Settings::default(), Theme::Light);
        assert_eq!(state.metric_series.len(), 9);
        assert_eq!(state.metric_series.label, "Contrast");
        // No weather chosen: the hour values are halved, never dropped.
        assert_eq!(state.combined_series.len(), 7);
        assert!(state.global_peak.is_some());
        assert_eq!(state.hour_profile.len(), 4);
        assert_eq!(state.weather_distribution.len(), 3);
    }

    #[test]
    fn selection_changes_recompute() {
        let mut state = AppState::new(Settings::default(), Theme::Light);
        let before = state.combined_series.clone();
        state.toggle_weather("Sunny");
        assert_ne!(state.combined_series, before);

        state.set_metric("Exposure");
        assert_eq!(state.metric_series.label, "Exposure");

        state.set_angle(-45);
        assert_eq!(state.selection.angle, -45);
        let rainy = state
            .weather_profile
            .iter()
            .find(|p| p.selector == "Rainy")
            .unwrap();
        // Rainy's first sample holds -45, so the profile still has a value.
        assert!(rainy.value.is_some());
    }

    #[test]
    fn clearing_both_filters_gives_zero_series() {
        let mut state = AppState::new(Settings::default(), Theme::Light);
        state.toggle_hour("9-12AM");
        assert_eq!(state.selection.hour(), None);
        assert!(state.combined_series.values().iter().all(|&v| v == 0.0));
        assert_eq!(state.combined_peak, None);
    }

    #[test]
    fn replacing_table_updates_results() {
        let mut state = AppState::new(Settings::default(), Theme::Light);
        state.replace_table(TableKind::Metric, DataTable::new("Metric"));
        assert!(state.metric_series.is_empty());
        assert_eq!(state.metric_peak, None);

        state.replace_table(TableKind::Hours, DataTable::new("Hours"));
        assert_eq!(state.global_peak, None);
    }
}
