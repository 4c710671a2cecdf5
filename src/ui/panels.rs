use eframe::egui::{self, Color32, RichText, ScrollArea, Theme, Ui};
use egui_extras::{Column, TableBuilder};

use iqa_dashboard::data::selection::VIEWING_ANGLES;

use crate::state::{AppState, TableKind};

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

fn owned_labels(labels: Vec<&str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loops.
    let metrics = owned_labels(state.metrics.labels());
    let hours = owned_labels(state.hours.labels());
    let weather = owned_labels(state.weather.labels());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Metric");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for m in &metrics {
                    if ui.selectable_label(state.selection.metric == *m, m).clicked() {
                        state.set_metric(m);
                    }
                }
            });
            ui.separator();

            ui.strong("Time of day");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for h in &hours {
                    let selected = state.selection.hour() == Some(h.as_str());
                    if ui.selectable_label(selected, h).clicked() {
                        state.toggle_hour(h);
                    }
                }
            });

            ui.strong("Weather");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for w in &weather {
                    let selected = state.selection.weather() == Some(w.as_str());
                    let text = RichText::new(w).color(state.weather_colors.color_for(w));
                    if ui.selectable_label(selected, text).clicked() {
                        state.toggle_weather(w);
                    }
                }
            });
            ui.label(
                RichText::new("Click a selected filter again to clear it.")
                    .small()
                    .weak(),
            );
            ui.separator();

            ui.strong("Viewing angle");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for angle in VIEWING_ANGLES {
                    let selected = state.selection.angle == angle;
                    if ui.selectable_label(selected, format!("{angle}°")).clicked() {
                        state.set_angle(angle);
                    }
                }
            });
            ui.separator();

            highlights(ui, state);
        });
}

/// Peak values of the current charts and of every filter combination.
fn highlights(ui: &mut Ui, state: &AppState) {
    ui.strong("Highlights");

    let mut rows: Vec<(String, String)> = Vec::new();
    rows.push((
        format!("Peak {}", state.selection.metric),
        match &state.metric_peak {
            Some(p) => format!("part {} · {:.2}", p.key, p.value),
            None => "no signal".to_string(),
        },
    ));
    rows.push((
        "Peak combined".to_string(),
        match &state.combined_peak {
            Some(p) => format!("{}° · {:.2}", p.key, p.value),
            None => "no signal".to_string(),
        },
    ));
    rows.push((
        "Best conditions".to_string(),
        match &state.global_peak {
            Some(g) => format!(
                "{} / {} at {}° · {:.2}",
                g.filters.weather, g.filters.hour, g.key, g.value
            ),
            None => "no signal".to_string(),
        },
    ));

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::remainder())
        .body(|mut body| {
            for (name, value) in &rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for kind in TableKind::ALL {
                if ui.button(format!("Open {} table…", kind.name())).clicked() {
                    open_file_dialog(state, kind);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        ui.label(format!(
            "{} weather · {} hour · {} metric selectors",
            state.weather.len(),
            state.hours.len(),
            state.metrics.len()
        ));

        ui.separator();

        let toggle_text = match state.theme {
            Theme::Dark => "☀ Light",
            Theme::Light => "🌙 Dark",
        };
        if ui.button(toggle_text).clicked() {
            state.toggle_theme();
            ui.ctx().set_theme(state.settings.theme);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, kind: TableKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {} table", kind.name()))
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match iqa_dashboard::data::loader::load_table(&path, kind.name()) {
            Ok(table) => {
                log::info!(
                    "Loaded {} table from {} with selectors {:?}",
                    kind.name(),
                    path.display(),
                    table.labels()
                );
                state.replace_table(kind, table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
