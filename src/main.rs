#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use scanview::ScanviewApp;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`)

    // Optional: a project archive to open at startup.
    let archive: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Scanview",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(match &archive {
                Some(path) => ScanviewApp::with_archive(cc, path),
                None => ScanviewApp::new(cc),
            }))
        }),
    )
}
