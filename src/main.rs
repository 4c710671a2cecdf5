mod app;
mod state;
mod ui;

use app::IqaDashboardApp;
use eframe::egui;
use iqa_dashboard::settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IQA Dashboard – Robotic Inspection Study",
        options,
        Box::new(|cc| Ok(Box::new(IqaDashboardApp::new(cc, settings)))),
    )
}
