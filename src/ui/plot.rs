use std::ops::RangeInclusive;

use eframe::egui::{Color32, ScrollArea, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points, Polygon};

use iqa_dashboard::color::{
    accent, heat_color, SeriesColors, COMBINED_COLOR, MAX_COLOR, METRIC_COLOR, MIN_COLOR,
};
use iqa_dashboard::data::aggregate::ProfilePoint;
use iqa_dashboard::data::model::AggregateResult;

use crate::state::{AppState, DistributionBar};

/// Upper end of the IQA axis.
const IQA_AXIS_MAX: f64 = 120.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render every chart in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Average IQA Values for {}", state.selection.metric));
            average_chart(ui, "metric_chart", &state.metric_series, METRIC_COLOR, "Image Part");
            heat_strip(ui, "metric_heat", &state.metric_series, &state.metric_heat, METRIC_COLOR);

            ui.add_space(12.0);
            ui.heading(state.selection.title());
            average_chart(
                ui,
                "combined_chart",
                &state.combined_series,
                COMBINED_COLOR,
                "Vision Angle",
            );
            heat_strip(
                ui,
                "combined_heat",
                &state.combined_series,
                &state.combined_heat,
                COMBINED_COLOR,
            );

            ui.add_space(12.0);
            ui.heading(format!("IQA at {}°", state.selection.angle));
            let line_color = accent(state.theme);
            ui.columns(2, |cols| {
                profile_chart(
                    &mut cols[0],
                    "hour_profile",
                    &state.hour_profile,
                    "Time of Day",
                    line_color,
                );
                profile_chart(
                    &mut cols[1],
                    "weather_profile",
                    &state.weather_profile,
                    "Weather Condition",
                    line_color,
                );
            });
            ui.columns(2, |cols| {
                distribution_chart(
                    &mut cols[0],
                    "hour_distribution",
                    &state.hour_distribution,
                    &state.hour_colors,
                    "Time of Day",
                );
                distribution_chart(
                    &mut cols[1],
                    "weather_distribution",
                    &state.weather_distribution,
                    &state.weather_colors,
                    "Weather Condition",
                );
            });
        });
}

fn no_data(ui: &mut Ui) {
    ui.label("No data available");
}

// ---------------------------------------------------------------------------
// Line chart with optional min/max band
// ---------------------------------------------------------------------------

fn average_chart(ui: &mut Ui, id: &str, result: &AggregateResult, color: Color32, x_label: &str) {
    if result.is_empty() {
        no_data(ui);
        return;
    }

    Plot::new(id)
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Average Value")
        .include_y(0.0)
        .include_y(IQA_AXIS_MAX)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let min_points = result.min_points();
            let max_points = result.max_points();

            if !min_points.is_empty() {
                // Band outline: along the minima, back along the maxima.
                let band: Vec<[f64; 2]> = min_points
                    .iter()
                    .chain(max_points.iter().rev())
                    .copied()
                    .collect();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(band))
                        .fill_color(Color32::from_rgba_unmultiplied(255, 0, 0, 13))
                        .stroke(Stroke::NONE)
                        .name("IQA Range"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(min_points))
                        .radius(4.0)
                        .color(MIN_COLOR)
                        .name("Min IQA Value"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(max_points))
                        .radius(4.0)
                        .color(MAX_COLOR)
                        .name("Max IQA Value"),
                );
            }

            plot_ui.line(
                Line::new(PlotPoints::from(result.points()))
                    .name(&result.label)
                    .color(color)
                    .width(2.5),
            );
        });
}

// ---------------------------------------------------------------------------
// One-row heatmap
// ---------------------------------------------------------------------------

/// Smallest gap between neighbouring keys, so cells touch without overlapping.
fn cell_width(points: &[[f64; 2]]) -> f64 {
    let gap = points
        .windows(2)
        .map(|w| (w[1][0] - w[0][0]).abs())
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if gap.is_finite() {
        gap * 0.95
    } else {
        1.0
    }
}

fn heat_strip(ui: &mut Ui, id: &str, result: &AggregateResult, heat: &[f64], color: Color32) {
    if result.is_empty() {
        return;
    }

    let points = result.points();
    let width = cell_width(&points);
    let bars: Vec<Bar> = points
        .iter()
        .zip(&result.entries)
        .zip(heat)
        .map(|((p, entry), &intensity)| {
            Bar::new(p[0], 1.0)
                .width(width)
                .fill(heat_color(color, intensity))
                .stroke(Stroke::new(1.0, color))
                .name(format!("{}: {:.3}", entry.key, entry.value))
        })
        .collect();

    Plot::new(id)
        .height(44.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Categorical charts (one point / bar per selector)
// ---------------------------------------------------------------------------

/// X-axis labels at integer positions, blank elsewhere.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

/// Consecutive runs of present values, as line segments.
fn profile_segments(profile: &[ProfilePoint]) -> Vec<Vec<[f64; 2]>> {
    let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (i, p) in profile.iter().enumerate() {
        match p.value {
            Some(v) => current.push([i as f64, v]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn profile_chart(ui: &mut Ui, id: &str, profile: &[ProfilePoint], x_label: &str, color: Color32) {
    if profile.iter().all(|p| p.value.is_none()) {
        no_data(ui);
        return;
    }

    let labels: Vec<String> = profile.iter().map(|p| p.selector.clone()).collect();
    let present: Vec<[f64; 2]> = profile_segments(profile).into_iter().flatten().collect();

    Plot::new(id)
        .height(220.0)
        .x_axis_label(x_label)
        .y_axis_label("IQA Value")
        .x_axis_formatter(category_formatter(labels))
        .include_x(-0.5)
        .include_x(profile.len() as f64 - 0.5)
        .include_y(0.0)
        .include_y(IQA_AXIS_MAX)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for segment in profile_segments(profile) {
                plot_ui.line(Line::new(PlotPoints::from(segment)).color(color).width(2.0));
            }
            plot_ui.points(Points::new(PlotPoints::from(present)).radius(3.5).color(color));
        });
}

fn distribution_chart(
    ui: &mut Ui,
    id: &str,
    bars: &[DistributionBar],
    colors: &SeriesColors,
    x_label: &str,
) {
    if bars.is_empty() {
        no_data(ui);
        return;
    }

    let labels: Vec<String> = bars.iter().map(|b| b.selector.clone()).collect();
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let color = colors.color_for(&b.selector);
            Bar::new(i as f64, b.value)
                .width(0.7)
                .fill(color.gamma_multiply(0.35))
                .stroke(Stroke::new(1.0, color))
                .name(&b.selector)
        })
        .collect();

    Plot::new(id)
        .height(200.0)
        .x_axis_label(x_label)
        .y_axis_label("IQA Value")
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars));
        });
}
