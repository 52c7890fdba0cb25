pub mod app;
pub mod colors;
pub mod grid;
pub mod search;

use crate::api::SearchClient;

/// Entry point: launch the native GUI window
pub fn run(client: SearchClient) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("SnapFind — Semantic Image Search")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SnapFind",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::SnapFindApp::new(cc, client)))),
    )
    .map_err(|e| crate::SnapFindError::Gui(format!("{}", e)))
}
