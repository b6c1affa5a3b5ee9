mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::Path;

use caliper_core::config::{ViewerConfig, CONFIG_FILE_NAME};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ViewerConfig::load_or_default(Path::new(CONFIG_FILE_NAME)).unwrap_or_else(|e| {
        tracing::warn!("Ignoring {CONFIG_FILE_NAME}: {e}");
        ViewerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Caliper"),
        ..Default::default()
    };

    eframe::run_native(
        "Caliper",
        options,
        Box::new(|cc| {
            let app = app::CaliperApp::new(&cc.egui_ctx, config)?;
            Ok(Box::new(app))
        }),
    )
}
