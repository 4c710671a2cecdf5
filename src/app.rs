use eframe::egui;

use iqa_dashboard::settings::Settings;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IqaDashboardApp {
    pub state: AppState,
}

impl IqaDashboardApp {
    /// Apply the persisted theme before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        cc.egui_ctx.set_theme(settings.theme);
        let theme = cc.egui_ctx.theme();
        Self {
            state: AppState::new(settings, theme),
        }
    }
}

impl eframe::App for IqaDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Follows the OS when the preference is `System`.
        self.state.theme = ctx.theme();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors and highlights ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::charts(ui, &self.state);
        });
    }
}
