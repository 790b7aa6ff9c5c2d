mod app;
mod console;
mod dialogs;
mod options_panel;
mod tabs;

pub use app::ScanviewApp;
