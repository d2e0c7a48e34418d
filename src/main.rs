use eframe::egui;
use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod app;
mod cache;
mod catalog;
mod grid;
mod resolver;

use app::CycleSyncApp;
use catalog::PhaseCatalog;

fn main() -> Result<(), eframe::Error> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .compact()
        .init();

    let catalog = match PhaseCatalog::career_default() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("failed to build phase catalog: {}", e);
            panic!("failed to build phase catalog: {}", e);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 680.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CycleSync Pro",
        options,
        Box::new(move |_cc| Box::new(CycleSyncApp::new(catalog))),
    )
}
